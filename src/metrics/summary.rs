//! Aggregate statistics over a workout history.
//!
//! T041: Totals (workouts, exercises, volume)
//! T042: Rolling weekly frequency
//! T043: Most frequent exercise

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::metrics::calculator::workout_volume;
use crate::workouts::types::Workout;

/// Default rolling window for weekly frequency.
pub const FREQUENCY_WINDOW_DAYS: i64 = 28;

/// Rolling window used to average workouts per week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyWindow {
    /// Window length in days, counted back from today
    pub days: i64,
    /// Number of weeks the count is divided by
    pub weeks: f64,
}

impl Default for FrequencyWindow {
    fn default() -> Self {
        Self {
            days: FREQUENCY_WINDOW_DAYS,
            weeks: 4.0,
        }
    }
}

/// An exercise name and how many times it was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCount {
    pub name: String,
    pub count: usize,
}

/// Dashboard statistics for a non-empty workout history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    /// Number of workouts
    pub total_workouts: usize,
    /// Number of exercise entries across all workouts
    pub total_exercises: usize,
    /// Sum of training volume in kg
    pub total_volume: f64,
    /// Average workouts per week over the trailing window
    pub weekly_frequency: f64,
    /// Most logged exercise, if any exercise was logged at all
    pub most_frequent_exercise: Option<ExerciseCount>,
}

impl WorkoutStats {
    /// Compute statistics with the default 28-day window.
    ///
    /// Returns `None` for an empty history so callers can tell "no data
    /// yet" apart from measured zeros.
    pub fn compute(workouts: &[Workout], today: NaiveDate) -> Option<Self> {
        Self::compute_with_window(workouts, today, FrequencyWindow::default())
    }

    /// Compute statistics with a custom frequency window.
    pub fn compute_with_window(
        workouts: &[Workout],
        today: NaiveDate,
        window: FrequencyWindow,
    ) -> Option<Self> {
        if workouts.is_empty() {
            return None;
        }

        Some(Self {
            total_workouts: total_workouts(workouts),
            total_exercises: total_exercises(workouts),
            total_volume: total_volume(workouts),
            weekly_frequency: weekly_frequency(workouts, today, window),
            most_frequent_exercise: most_frequent_exercise(workouts),
        })
    }
}

/// Number of workouts.
pub fn total_workouts(workouts: &[Workout]) -> usize {
    workouts.len()
}

/// Number of exercise entries across all workouts.
pub fn total_exercises(workouts: &[Workout]) -> usize {
    workouts.iter().map(|w| w.exercises.len()).sum()
}

/// Total training volume across all workouts.
pub fn total_volume(workouts: &[Workout]) -> f64 {
    workouts.iter().map(workout_volume).sum()
}

/// Average workouts per week over the trailing window ending `today`.
///
/// A workout counts when its date is on or after `today - window.days`.
/// A window reaching past the earliest representable date counts every
/// workout. A negative length or a non-positive or non-finite divisor
/// yields 0.
pub fn weekly_frequency(workouts: &[Workout], today: NaiveDate, window: FrequencyWindow) -> f64 {
    if window.days < 0 || !window.weeks.is_finite() || window.weeks <= 0.0 {
        return 0.0;
    }

    let cutoff = Duration::try_days(window.days).and_then(|span| today.checked_sub_signed(span));
    let recent = workouts
        .iter()
        .filter(|w| cutoff.map_or(true, |c| w.date >= c))
        .count();

    recent as f64 / window.weeks
}

/// The exercise name logged most often.
///
/// Each occurrence counts once regardless of sets or reps. Ties go to the
/// name encountered first when walking workouts and exercises in order.
pub fn most_frequent_exercise(workouts: &[Workout]) -> Option<ExerciseCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for exercise in workouts.iter().flat_map(|w| &w.exercises) {
        let count = counts.entry(exercise.name.as_str()).or_insert_with(|| {
            order.push(exercise.name.as_str());
            0
        });
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for name in order {
        let count = counts[name];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }

    best.map(|(name, count)| ExerciseCount {
        name: name.to_string(),
        count,
    })
}
