//! GymLog - Personal Workout Logger
//!
//! Logs strength and cardio workouts, keeps a daily training diary and a
//! body-weight profile, manages reusable workout templates, and derives
//! training statistics (calories, volume, weekly frequency, progression)
//! from the logged history.

pub mod diary;
pub mod metrics;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use diary::DiaryEntry;
pub use metrics::{ProgressionSeries, WorkoutStats};
pub use storage::{open_store, RecordStore, StoreError, UserProfile};
pub use workouts::{Exercise, ExerciseKind, Workout, WorkoutTemplate};
