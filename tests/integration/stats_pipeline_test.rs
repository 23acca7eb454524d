//! Integration tests for the stored-history to statistics pipeline.
//!
//! T131: Log workouts, read them back, derive dashboard figures
//!
//! Tests the end-to-end flow:
//! 1. Instantiate templates and log ad-hoc workouts into a store
//! 2. Record body weight in the profile
//! 3. Compute stats, calories and progression from what the store returns

use chrono::{Duration, NaiveDate};
use gymlog::metrics::{
    available_exercises, workout_calories, FrequencyWindow, ProgressionDetail, ProgressionSeries,
    WorkoutStats,
};
use gymlog::storage::{Database, JsonStore, RecordStore, UserProfile};
use gymlog::workouts::{Exercise, Workout};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()
}

/// Four weeks of training: chest every week, legs twice, one old run.
fn log_history(store: &mut dyn RecordStore) {
    let templates = store.list_templates().unwrap();
    let chest = templates.iter().find(|t| t.name == "Chest Day").unwrap();
    let legs = templates.iter().find(|t| t.name == "Leg Day").unwrap();

    for week in 0..4 {
        let date = today() - Duration::days(week * 7);
        store.save_workout(&chest.instantiate(date)).unwrap();
    }
    for offset in [2, 9] {
        store
            .save_workout(&legs.instantiate(today() - Duration::days(offset)))
            .unwrap();
    }

    let old_run = Workout::new("Long run", today() - Duration::days(60))
        .with_exercise(Exercise::cardio("Corrida", "45", Some("8")));
    store.save_workout(&old_run).unwrap();
}

fn check_pipeline(store: &mut dyn RecordStore) {
    log_history(store);

    let mut profile = UserProfile::default();
    profile.set_weight(75.0).unwrap();
    store.save_profile(&profile).unwrap();

    let workouts = store.list_workouts().unwrap();
    let stats = WorkoutStats::compute(&workouts, today()).unwrap();

    assert_eq!(stats.total_workouts, 7);
    // 4 chest × 4 + 2 legs × 4 + 1 run
    assert_eq!(stats.total_exercises, 25);
    assert_eq!(stats.weekly_frequency, 6.0 / 4.0);

    // Chest Day: 1600 + 1050 + 540 + 900; Leg Day: 2400 + 3600 + 1080 + 2400
    assert_eq!(stats.total_volume, 4.0 * 4090.0 + 2.0 * 9480.0);

    let top = stats.most_frequent_exercise.unwrap();
    assert_eq!(top.count, 4);
    assert_eq!(top.name, "Supino Reto");

    // A longer window picks up the old run too.
    let wide = WorkoutStats::compute_with_window(
        &workouts,
        today(),
        FrequencyWindow { days: 90, weeks: 12.0 },
    )
    .unwrap();
    assert_eq!(wide.weekly_frequency, 7.0 / 12.0);

    // Calories use the stored body weight.
    let weight = store.load_profile().unwrap().weight_kg;
    let run = workouts.iter().find(|w| w.name == "Long run").unwrap();
    assert!((workout_calories(run, weight) - 8.0 * 75.0 * 0.75).abs() < 1e-9);
    assert_eq!(workout_calories(run, None), 0.0);

    let bench = ProgressionSeries::for_exercise(&workouts, "Supino Reto");
    assert_eq!(bench.len(), 4);
    assert!(bench.points.windows(2).all(|w| w[0].date < w[1].date));
    let summary = bench.summary().unwrap();
    assert_eq!(summary.max_primary, 40.0);
    assert_eq!(summary.detail, ProgressionDetail::Strength { max_volume: 1600.0 });

    let names = available_exercises(&workouts);
    assert_eq!(names.len(), 9);
    assert!(names.contains(&"Corrida".to_string()));
}

#[test]
fn test_pipeline_sqlite() {
    let dir = TempDir::new().unwrap();
    let mut db = Database::open(&dir.path().join("gymlog.db")).unwrap();
    check_pipeline(&mut db);
}

#[test]
fn test_pipeline_json() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonStore::open(dir.path()).unwrap();
    check_pipeline(&mut store);
}

/// A progression improving week over week shows up in order.
#[test]
fn test_progression_after_edits() {
    let dir = TempDir::new().unwrap();
    let mut db = Database::open(&dir.path().join("gymlog.db")).unwrap();

    for (week, load) in [(3, "40"), (2, "42.5"), (1, "45"), (0, "50")] {
        let workout = Workout::new("Push", today() - Duration::days(week * 7))
            .with_exercise(Exercise::strength("Supino Reto", 4, "8", load));
        RecordStore::save_workout(&mut db, &workout).unwrap();
    }

    let workouts = RecordStore::list_workouts(&db).unwrap();
    let series = ProgressionSeries::for_exercise(&workouts, "Supino Reto");
    let loads: Vec<f64> = series.points.iter().map(|p| p.primary_value).collect();

    assert_eq!(loads, vec![40.0, 42.5, 45.0, 50.0]);
    assert_eq!(series.max_volume(), Some(1600.0));
}
