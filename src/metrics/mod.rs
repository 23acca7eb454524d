//! Metrics module for derived training figures.
//!
//! Everything here is a pure function of the workouts and body weight it is
//! handed; nothing reads from storage.

pub mod calculator;
pub mod met;
pub mod progression;
pub mod summary;

pub use calculator::{
    exercise_calories, exercise_volume, parse_numeric, parse_numeric_or_zero, workout_calories,
    workout_volume,
};
pub use met::{met_value, DEFAULT_MET};
pub use progression::{
    available_exercises, ProgressionDetail, ProgressionPoint, ProgressionSeries,
    ProgressionSummary,
};
pub use summary::{ExerciseCount, FrequencyWindow, WorkoutStats};
