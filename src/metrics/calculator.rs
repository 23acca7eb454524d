//! Calorie and training-volume calculations.
//!
//! T031: Implement lenient numeric parsing for user-entered fields
//! T032: Per-exercise and per-workout calorie estimation
//! T033: Per-exercise and per-workout training volume
//!
//! Exercise fields are free text. Every numeric read goes through
//! [`parse_numeric_or_zero`] so the zero-on-failure policy lives in one place.

use crate::metrics::met::met_value;
use crate::workouts::types::{Exercise, ExerciseKind, Workout};

/// Minutes assumed per strength set when no duration is logged.
pub const MINUTES_PER_SET: f64 = 1.5;

/// Parse the leading decimal number of `input`.
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// so `"10-12"` reads as 10 and `"42.5 kg"` as 42.5. Returns `None` when the
/// text does not start with a number or the result is not finite.
pub fn parse_numeric(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A bare trailing dot is accepted ("5." == 5) but not a lone dot.
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the leading number of `input`, treating anything unreadable as zero.
pub fn parse_numeric_or_zero(input: &str) -> f64 {
    parse_numeric(input).unwrap_or(0.0)
}

/// Duration of an exercise in minutes.
///
/// Cardio uses its logged duration; strength is estimated from the set
/// count. Returns `None` when there is no usable positive duration.
pub fn exercise_minutes(exercise: &Exercise) -> Option<f64> {
    let minutes = match &exercise.kind {
        ExerciseKind::Cardio { duration, .. } => parse_numeric(duration)?,
        ExerciseKind::Strength { sets, .. } => f64::from(*sets) * MINUTES_PER_SET,
    };

    (minutes.is_finite() && minutes > 0.0).then_some(minutes)
}

/// Estimated calories for one exercise: MET × kg × hours.
pub fn exercise_calories(exercise: &Exercise, body_weight_kg: f64) -> f64 {
    match exercise_minutes(exercise) {
        Some(minutes) => met_value(&exercise.name) * body_weight_kg * (minutes / 60.0),
        None => 0.0,
    }
}

/// Estimated calories for a whole workout.
///
/// Without a known positive body weight the estimate is unavailable and
/// reported as zero.
pub fn workout_calories(workout: &Workout, body_weight_kg: Option<f64>) -> f64 {
    match body_weight_kg {
        Some(weight) if weight.is_finite() && weight > 0.0 => workout
            .exercises
            .iter()
            .map(|e| exercise_calories(e, weight))
            .sum(),
        _ => 0.0,
    }
}

/// Training volume of one exercise: weight × reps × sets.
///
/// Cardio exercises carry no load and contribute zero.
pub fn exercise_volume(exercise: &Exercise) -> f64 {
    match &exercise.kind {
        ExerciseKind::Strength { sets, reps, weight } => {
            parse_numeric_or_zero(weight) * parse_numeric_or_zero(reps) * f64::from(*sets)
        }
        ExerciseKind::Cardio { .. } => 0.0,
    }
}

/// Training volume of a workout.
pub fn workout_volume(workout: &Workout) -> f64 {
    workout.exercises.iter().map(exercise_volume).sum()
}
