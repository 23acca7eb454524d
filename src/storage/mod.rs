//! Storage module for records and configuration.
//!
//! Two interchangeable backends implement [`RecordStore`]: an SQLite
//! database and a directory of JSON documents. Which one is used is a
//! configuration choice.

pub mod config;
pub mod database;
pub mod json_store;
pub mod schema;

pub use config::{AppConfig, ConfigError, StorageBackend, UserProfile};
pub use database::{Database, DatabaseError};
pub use json_store::JsonStore;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::diary::types::DiaryEntry;
use crate::workouts::catalog::normalize_exercise_name;
use crate::workouts::types::{ValidationError, Workout, WorkoutTemplate};

/// Persistence for workouts, diary, profile, templates and the exercise catalog.
///
/// Writes are last-writer-wins; there is no versioning or conflict handling.
pub trait RecordStore {
    /// All workouts, newest date first.
    fn list_workouts(&self) -> Result<Vec<Workout>, StoreError>;

    /// Workout by ID.
    fn get_workout(&self, id: &Uuid) -> Result<Option<Workout>, StoreError>;

    /// Validate and insert or replace a workout.
    fn save_workout(&mut self, workout: &Workout) -> Result<(), StoreError>;

    /// Delete a workout; `NotFound` if it does not exist.
    fn delete_workout(&mut self, id: &Uuid) -> Result<(), StoreError>;

    /// All diary entries, newest first.
    fn list_diary_entries(&self) -> Result<Vec<DiaryEntry>, StoreError>;

    /// Store the entry for its date, replacing any entry already there.
    fn upsert_diary_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError>;

    /// Delete the entry for a date; `NotFound` if there is none.
    fn delete_diary_entry(&mut self, date: NaiveDate) -> Result<(), StoreError>;

    /// The profile, blank if never saved.
    fn load_profile(&self) -> Result<UserProfile, StoreError>;

    /// Save the profile.
    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError>;

    /// All templates.
    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, StoreError>;

    /// Insert or replace a template.
    fn save_template(&mut self, template: &WorkoutTemplate) -> Result<(), StoreError>;

    /// Delete a template; `NotFound` if it does not exist.
    fn delete_template(&mut self, id: &Uuid) -> Result<(), StoreError>;

    /// Exercise names offered when logging, oldest first.
    fn list_exercise_names(&self) -> Result<Vec<String>, StoreError>;

    /// Add a trimmed, non-blank name to the catalog.
    ///
    /// Returns false, without writing, when the name is already listed.
    fn add_exercise_name(&mut self, name: &str) -> Result<bool, StoreError>;
}

impl RecordStore for Database {
    fn list_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        Ok(Database::list_workouts(self)?)
    }

    fn get_workout(&self, id: &Uuid) -> Result<Option<Workout>, StoreError> {
        Ok(Database::get_workout(self, id)?)
    }

    fn save_workout(&mut self, workout: &Workout) -> Result<(), StoreError> {
        workout.validate()?;
        Database::save_workout(self, workout)?;
        tracing::info!("Saved workout {} ({})", workout.name, workout.id);
        Ok(())
    }

    fn delete_workout(&mut self, id: &Uuid) -> Result<(), StoreError> {
        Database::delete_workout(self, id)?;
        tracing::info!("Deleted workout {}", id);
        Ok(())
    }

    fn list_diary_entries(&self) -> Result<Vec<DiaryEntry>, StoreError> {
        Ok(Database::list_diary_entries(self)?)
    }

    fn upsert_diary_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError> {
        Ok(Database::upsert_diary_entry(self, &entry)?)
    }

    fn delete_diary_entry(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        Ok(Database::delete_diary_entry(self, date)?)
    }

    fn load_profile(&self) -> Result<UserProfile, StoreError> {
        Ok(Database::load_profile(self)?)
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        Ok(Database::save_profile(self, profile)?)
    }

    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, StoreError> {
        Ok(Database::list_templates(self)?)
    }

    fn save_template(&mut self, template: &WorkoutTemplate) -> Result<(), StoreError> {
        Ok(Database::save_template(self, template)?)
    }

    fn delete_template(&mut self, id: &Uuid) -> Result<(), StoreError> {
        Ok(Database::delete_template(self, id)?)
    }

    fn list_exercise_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(Database::list_exercise_names(self)?)
    }

    fn add_exercise_name(&mut self, name: &str) -> Result<bool, StoreError> {
        let name = normalize_exercise_name(name)?;
        let added = Database::add_exercise_name(self, &name)?;
        if added {
            tracing::info!("Added exercise '{}' to the catalog", name);
        }
        Ok(added)
    }
}

impl RecordStore for JsonStore {
    fn list_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        JsonStore::list_workouts(self)
    }

    fn get_workout(&self, id: &Uuid) -> Result<Option<Workout>, StoreError> {
        JsonStore::get_workout(self, id)
    }

    fn save_workout(&mut self, workout: &Workout) -> Result<(), StoreError> {
        workout.validate()?;
        JsonStore::save_workout(self, workout)?;
        tracing::info!("Saved workout {} ({})", workout.name, workout.id);
        Ok(())
    }

    fn delete_workout(&mut self, id: &Uuid) -> Result<(), StoreError> {
        JsonStore::delete_workout(self, id)?;
        tracing::info!("Deleted workout {}", id);
        Ok(())
    }

    fn list_diary_entries(&self) -> Result<Vec<DiaryEntry>, StoreError> {
        JsonStore::list_diary_entries(self)
    }

    fn upsert_diary_entry(&mut self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError> {
        JsonStore::upsert_diary_entry(self, entry)
    }

    fn delete_diary_entry(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        JsonStore::delete_diary_entry(self, date)
    }

    fn load_profile(&self) -> Result<UserProfile, StoreError> {
        JsonStore::load_profile(self)
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        JsonStore::save_profile(self, profile)
    }

    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, StoreError> {
        JsonStore::list_templates(self)
    }

    fn save_template(&mut self, template: &WorkoutTemplate) -> Result<(), StoreError> {
        JsonStore::save_template(self, template)
    }

    fn delete_template(&mut self, id: &Uuid) -> Result<(), StoreError> {
        JsonStore::delete_template(self, id)
    }

    fn list_exercise_names(&self) -> Result<Vec<String>, StoreError> {
        JsonStore::list_exercise_names(self)
    }

    fn add_exercise_name(&mut self, name: &str) -> Result<bool, StoreError> {
        let added = JsonStore::add_exercise_name(self, name)?;
        if added {
            tracing::info!("Added exercise '{}' to the catalog", name.trim());
        }
        Ok(added)
    }
}

/// Open the backend selected in `config`.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn RecordStore>, StoreError> {
    tracing::debug!("Using {} storage backend", config.storage.backend);

    let store: Box<dyn RecordStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(Database::open(&config.database_path())?),
        StorageBackend::Json => Box::new(JsonStore::open(&config.data_dir)?),
    };

    Ok(store)
}

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),
}

impl StoreError {
    /// Whether the error means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound(_) | StoreError::Database(DatabaseError::NotFound(_))
        )
    }
}
