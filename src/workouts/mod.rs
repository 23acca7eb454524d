//! Workout module for logged training sessions and templates.

pub mod catalog;
pub mod library;
pub mod types;

pub use catalog::{default_exercise_names, DEFAULT_EXERCISES};
pub use library::{builtin_templates, SearchCriteria};
pub use types::{
    Exercise, ExerciseKind, TemplateCategory, ValidationError, Workout, WorkoutTemplate,
};
