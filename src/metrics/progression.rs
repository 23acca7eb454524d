//! Per-exercise progression series for charting.
//!
//! T051: Extract a date-ordered series for one exercise
//! T052: Summarize a series (max, sessions, volume or mean)
//!
//! A series is a pure function of the workout list it was built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::metrics::calculator::{exercise_volume, parse_numeric_or_zero};
use crate::workouts::types::{ExerciseKind, Workout};

/// One observation of an exercise on a workout date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPoint {
    /// Workout date
    pub date: NaiveDate,
    /// Load in kg for strength, distance in km for cardio
    pub primary_value: f64,
    /// Logged repetitions (strength only)
    pub reps: Option<String>,
    /// Logged sets (strength only)
    pub sets: Option<u32>,
    /// weight × reps × sets, zero for cardio
    pub volume: f64,
    /// Whether this observation was a strength exercise
    pub strength: bool,
}

/// Date-ordered observations of a single exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSeries {
    /// Exercise name the series was built for
    pub exercise: String,
    /// Observations in ascending date order
    pub points: Vec<ProgressionPoint>,
}

/// Shape of the summary depends on the exercise type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProgressionDetail {
    /// Heaviest single-session volume
    Strength { max_volume: f64 },
    /// Average distance per session
    Cardio { mean_primary: f64 },
}

/// Headline numbers for a progression series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSummary {
    /// Highest primary value observed
    pub max_primary: f64,
    /// Number of sessions in the series
    pub sessions: usize,
    /// Type-specific figure
    pub detail: ProgressionDetail,
}

impl ProgressionSeries {
    /// Build the series for `exercise_name` (exact, case-sensitive match).
    ///
    /// Workouts are ordered by date with a stable sort, so workouts on the
    /// same day keep their input order. Only the first matching exercise of
    /// each workout is observed.
    pub fn for_exercise(workouts: &[Workout], exercise_name: &str) -> Self {
        let mut matching: Vec<&Workout> = workouts
            .iter()
            .filter(|w| w.find_exercise(exercise_name).is_some())
            .collect();
        matching.sort_by_key(|w| w.date);

        let points = matching
            .into_iter()
            .filter_map(|w| {
                let exercise = w.find_exercise(exercise_name)?;
                let point = match &exercise.kind {
                    ExerciseKind::Strength { sets, reps, weight } => ProgressionPoint {
                        date: w.date,
                        primary_value: parse_numeric_or_zero(weight),
                        reps: Some(reps.clone()),
                        sets: Some(*sets),
                        volume: exercise_volume(exercise),
                        strength: true,
                    },
                    ExerciseKind::Cardio { distance, .. } => ProgressionPoint {
                        date: w.date,
                        primary_value: distance.as_deref().map_or(0.0, parse_numeric_or_zero),
                        reps: None,
                        sets: None,
                        volume: exercise_volume(exercise),
                        strength: false,
                    },
                };
                Some(point)
            })
            .collect();

        Self {
            exercise: exercise_name.to_string(),
            points,
        }
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Highest primary value, if any observation exists.
    pub fn max_primary(&self) -> Option<f64> {
        self.points.iter().map(|p| p.primary_value).reduce(f64::max)
    }

    /// Heaviest single-session volume, if any observation exists.
    pub fn max_volume(&self) -> Option<f64> {
        self.points.iter().map(|p| p.volume).reduce(f64::max)
    }

    /// Mean primary value, if any observation exists.
    pub fn mean_primary(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.primary_value).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Summary figures; `None` for an empty series.
    ///
    /// The type-specific figure follows the most recent observation.
    pub fn summary(&self) -> Option<ProgressionSummary> {
        let latest = self.points.last()?;

        let detail = if latest.strength {
            ProgressionDetail::Strength {
                max_volume: self.max_volume()?,
            }
        } else {
            ProgressionDetail::Cardio {
                mean_primary: self.mean_primary()?,
            }
        };

        Some(ProgressionSummary {
            max_primary: self.max_primary()?,
            sessions: self.points.len(),
            detail,
        })
    }
}

/// Distinct exercise names across all workouts, sorted.
pub fn available_exercises(workouts: &[Workout]) -> Vec<String> {
    workouts
        .iter()
        .flat_map(|w| w.exercises.iter().map(|e| e.name.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
