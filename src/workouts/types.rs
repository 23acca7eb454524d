//! Workout, exercise and template types.
//!
//! T011: Define Exercise with tagged strength/cardio payloads
//! T012: Define Workout and WorkoutTemplate structs
//! T013: Define TemplateCategory enum
//! T014: Define ValidationError

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Payload of an exercise, keyed by its type.
///
/// Numeric fields stay as the text the user typed ("10-12", "40kg").
/// They are only interpreted by the metrics engine, which treats
/// anything it cannot read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Resistance work measured in sets of repetitions at a load.
    Strength {
        /// Number of sets (must be positive)
        sets: u32,
        /// Repetitions per set, may be a range such as "10-12"
        reps: String,
        /// Load in kilograms
        weight: String,
    },
    /// Continuous effort measured by time and optionally distance.
    Cardio {
        /// Duration in minutes
        duration: String,
        /// Distance in kilometers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance: Option<String>,
    },
}

impl ExerciseKind {
    /// Strength payload.
    pub fn strength(sets: u32, reps: impl Into<String>, weight: impl Into<String>) -> Self {
        ExerciseKind::Strength {
            sets,
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    /// Cardio payload.
    pub fn cardio(duration: impl Into<String>, distance: Option<String>) -> Self {
        ExerciseKind::Cardio {
            duration: duration.into(),
            distance,
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Strength { .. } => "strength",
            ExerciseKind::Cardio { .. } => "cardio",
        }
    }
}

/// One logged movement within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Free-text name, also the MET lookup key
    pub name: String,
    /// Type-specific fields
    #[serde(flatten)]
    pub kind: ExerciseKind,
    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    /// Create a new exercise with a fresh identifier.
    pub fn new(name: impl Into<String>, kind: ExerciseKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            notes: None,
        }
    }

    /// Create a strength exercise.
    pub fn strength(
        name: impl Into<String>,
        sets: u32,
        reps: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self::new(name, ExerciseKind::strength(sets, reps, weight))
    }

    /// Create a cardio exercise.
    pub fn cardio(name: impl Into<String>, duration: impl Into<String>, distance: Option<&str>) -> Self {
        Self::new(
            name,
            ExerciseKind::cardio(duration, distance.map(str::to_string)),
        )
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Copy of this exercise under a new identifier.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Check the exercise can be saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName("exercise"));
        }
        if let ExerciseKind::Strength { sets: 0, .. } = self.kind {
            return Err(ValidationError::ZeroSets(self.name.clone()));
        }
        Ok(())
    }
}

/// A named, dated collection of exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Exercises in the order they were logged
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Workout {
    /// Create an empty workout on the given date.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            exercises: Vec::new(),
            notes: None,
        }
    }

    /// Append an exercise (builder style).
    pub fn with_exercise(mut self, exercise: Exercise) -> Self {
        self.exercises.push(exercise);
        self
    }

    /// Find the first exercise with exactly this name.
    pub fn find_exercise(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name == name)
    }

    /// Remove the exercise at `index`, if present.
    pub fn remove_exercise(&mut self, index: usize) -> Option<Exercise> {
        (index < self.exercises.len()).then(|| self.exercises.remove(index))
    }

    /// Check the workout and all its exercises can be saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName("workout"));
        }
        self.exercises.iter().try_for_each(Exercise::validate)
    }
}

/// Muscle-group category of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Cardio,
    #[default]
    FullBody,
}

impl TemplateCategory {
    /// All categories in display order.
    pub const ALL: [TemplateCategory; 7] = [
        TemplateCategory::Chest,
        TemplateCategory::Back,
        TemplateCategory::Legs,
        TemplateCategory::Arms,
        TemplateCategory::Shoulders,
        TemplateCategory::Cardio,
        TemplateCategory::FullBody,
    ];

    /// Stable identifier used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Chest => "chest",
            TemplateCategory::Back => "back",
            TemplateCategory::Legs => "legs",
            TemplateCategory::Arms => "arms",
            TemplateCategory::Shoulders => "shoulders",
            TemplateCategory::Cardio => "cardio",
            TemplateCategory::FullBody => "full-body",
        }
    }
}

impl std::str::FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown template category '{}'", s))
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateCategory::Chest => write!(f, "Chest"),
            TemplateCategory::Back => write!(f, "Back"),
            TemplateCategory::Legs => write!(f, "Legs"),
            TemplateCategory::Arms => write!(f, "Arms"),
            TemplateCategory::Shoulders => write!(f, "Shoulders"),
            TemplateCategory::Cardio => write!(f, "Cardio"),
            TemplateCategory::FullBody => write!(f, "Full Body"),
        }
    }
}

/// A reusable named blueprint for a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Muscle-group category
    #[serde(default)]
    pub category: TemplateCategory,
    /// Blueprint exercises; ids are replaced on instantiation
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl WorkoutTemplate {
    /// Create an empty template.
    pub fn new(name: impl Into<String>, category: TemplateCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            category,
            exercises: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an exercise.
    pub fn with_exercise(mut self, exercise: Exercise) -> Self {
        self.exercises.push(exercise);
        self
    }

    /// Build a workout from this template on `date`.
    ///
    /// Every exercise is copied under a fresh identifier so the workout
    /// never shares ids with the template or with other instances.
    pub fn instantiate(&self, date: NaiveDate) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            date,
            exercises: self.exercises.iter().map(Exercise::duplicate).collect(),
            notes: None,
        }
    }
}

/// Input rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("strength exercise '{0}' must have at least one set")]
    ZeroSets(String),

    #[error("body weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("{field} must be between 1 and 5, got {value}")]
    OutOfScale { field: &'static str, value: u8 },
}
