//! Unit tests for progression series.
//!
//! T051-T052: Series extraction and summary

use chrono::NaiveDate;
use gymlog::metrics::{available_exercises, ProgressionDetail, ProgressionSeries};
use gymlog::workouts::{Exercise, Workout};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

/// Two bench sessions come back in date order with the right maximum.
#[test]
fn test_bench_press_progression() {
    // Supplied newest first, the way storage lists them
    let workouts = vec![
        Workout::new("Push B", date(3, 8))
            .with_exercise(Exercise::strength("Supino Reto", 4, "10", "50")),
        Workout::new("Push A", date(3, 1))
            .with_exercise(Exercise::strength("Supino Reto", 4, "10", "40")),
    ];

    let series = ProgressionSeries::for_exercise(&workouts, "Supino Reto");

    assert_eq!(series.len(), 2);
    assert_eq!(series.points[0].date, date(3, 1));
    assert_eq!(series.points[0].primary_value, 40.0);
    assert_eq!(series.points[1].date, date(3, 8));
    assert_eq!(series.points[1].primary_value, 50.0);
    assert_eq!(series.max_primary(), Some(50.0));
    assert_eq!(series.max_volume(), Some(2000.0));
}

/// Names match exactly, including case.
#[test]
fn test_exact_name_match() {
    let workouts = vec![Workout::new("Push", date(3, 1))
        .with_exercise(Exercise::strength("supino reto", 4, "10", "40"))];

    assert!(ProgressionSeries::for_exercise(&workouts, "Supino Reto").is_empty());
}

/// Only the first matching exercise in a workout is observed.
#[test]
fn test_first_match_per_workout() {
    let workouts = vec![Workout::new("Push", date(3, 1))
        .with_exercise(Exercise::strength("Crucifixo", 3, "12", "15"))
        .with_exercise(Exercise::strength("Crucifixo", 3, "12", "20"))];

    let series = ProgressionSeries::for_exercise(&workouts, "Crucifixo");
    assert_eq!(series.len(), 1);
    assert_eq!(series.points[0].primary_value, 15.0);
    assert_eq!(series.points[0].reps.as_deref(), Some("12"));
    assert_eq!(series.points[0].sets, Some(3));
}

/// Same-day workouts keep their input order.
#[test]
fn test_same_day_order_is_stable() {
    let workouts = vec![
        Workout::new("AM", date(3, 1)).with_exercise(Exercise::strength("Stiff", 3, "12", "30")),
        Workout::new("PM", date(3, 1)).with_exercise(Exercise::strength("Stiff", 3, "12", "35")),
    ];

    let values: Vec<f64> = ProgressionSeries::for_exercise(&workouts, "Stiff")
        .points
        .iter()
        .map(|p| p.primary_value)
        .collect();
    assert_eq!(values, vec![30.0, 35.0]);
}

/// Strength summary reports max weight, sessions and max volume.
#[test]
fn test_strength_summary() {
    let workouts = vec![
        Workout::new("1", date(1, 1)).with_exercise(Exercise::strength("Agachamento", 4, "12", "50")),
        Workout::new("2", date(1, 8)).with_exercise(Exercise::strength("Agachamento", 5, "8", "60")),
    ];

    let summary = ProgressionSeries::for_exercise(&workouts, "Agachamento")
        .summary()
        .unwrap();

    assert_eq!(summary.max_primary, 60.0);
    assert_eq!(summary.sessions, 2);
    assert_eq!(summary.detail, ProgressionDetail::Strength { max_volume: 2400.0 });
}

/// Cardio uses distance and reports its mean.
#[test]
fn test_cardio_summary() {
    let workouts = vec![
        Workout::new("1", date(2, 1)).with_exercise(Exercise::cardio("Corrida", "30", Some("5"))),
        Workout::new("2", date(2, 3)).with_exercise(Exercise::cardio("Corrida", "35", Some("6"))),
        Workout::new("3", date(2, 5)).with_exercise(Exercise::cardio("Corrida", "20", None)),
    ];

    let series = ProgressionSeries::for_exercise(&workouts, "Corrida");
    assert!(series.points.iter().all(|p| !p.strength && p.volume == 0.0));

    let summary = series.summary().unwrap();
    assert_eq!(summary.max_primary, 6.0);
    assert_eq!(summary.sessions, 3);
    assert_eq!(summary.detail, ProgressionDetail::Cardio { mean_primary: 11.0 / 3.0 });
}

/// Empty inputs give empty series and no summary.
#[test]
fn test_empty_series() {
    let series = ProgressionSeries::for_exercise(&[], "Supino Reto");
    assert!(series.is_empty());
    assert_eq!(series.summary(), None);
    assert_eq!(series.max_primary(), None);
    assert!(available_exercises(&[]).is_empty());
}

/// Distinct exercise names come back sorted.
#[test]
fn test_available_exercises() {
    let workouts = vec![
        Workout::new("1", date(1, 1))
            .with_exercise(Exercise::strength("Stiff", 3, "12", "30"))
            .with_exercise(Exercise::cardio("Esteira", "10", None)),
        Workout::new("2", date(1, 2)).with_exercise(Exercise::strength("Stiff", 3, "12", "30")),
    ];

    assert_eq!(available_exercises(&workouts), vec!["Esteira", "Stiff"]);
}
