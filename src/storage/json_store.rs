//! Local key-value store with one JSON document per collection.
//!
//! T090: Implement file-backed collections for offline-only installs
//!
//! Each collection lives in `<dir>/<key>.json`. A missing file reads as an
//! empty collection (or a blank profile). Writes replace the whole document.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::diary::journal::{remove_entry_for_date, upsert_entry};
use crate::diary::types::DiaryEntry;
use crate::storage::config::UserProfile;
use crate::storage::StoreError;
use crate::workouts::catalog::{add_unique, default_exercise_names};
use crate::workouts::library::builtin_templates;
use crate::workouts::types::{Workout, WorkoutTemplate};

pub const WORKOUTS_KEY: &str = "gym-workouts";
pub const DIARY_KEY: &str = "gym-diary";
pub const PROFILE_KEY: &str = "gym-user-profile";
pub const TEMPLATES_KEY: &str = "gym-workout-templates";
pub const EXERCISES_KEY: &str = "gym-exercises";

/// File-backed JSON document store.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        tracing::debug!("Opened JSON store at {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a document, `None` if it was never written.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Replace a document via a sibling temp file and rename.
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// All workouts, newest date first.
    pub fn list_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        let mut workouts: Vec<Workout> = self.read(WORKOUTS_KEY)?.unwrap_or_default();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    /// Workout by ID.
    pub fn get_workout(&self, id: &Uuid) -> Result<Option<Workout>, StoreError> {
        Ok(self.list_workouts()?.into_iter().find(|w| w.id == *id))
    }

    /// Insert or replace a workout by ID.
    pub fn save_workout(&self, workout: &Workout) -> Result<(), StoreError> {
        let mut workouts: Vec<Workout> = self.read(WORKOUTS_KEY)?.unwrap_or_default();
        match workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => *existing = workout.clone(),
            None => workouts.push(workout.clone()),
        }
        self.write(WORKOUTS_KEY, &workouts)
    }

    /// Delete a workout by ID.
    pub fn delete_workout(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut workouts: Vec<Workout> = self.read(WORKOUTS_KEY)?.unwrap_or_default();
        let before = workouts.len();
        workouts.retain(|w| w.id != *id);
        if workouts.len() == before {
            return Err(StoreError::NotFound(format!("Workout {}", id)));
        }
        self.write(WORKOUTS_KEY, &workouts)
    }

    /// All diary entries, newest first.
    pub fn list_diary_entries(&self) -> Result<Vec<DiaryEntry>, StoreError> {
        let mut entries: Vec<DiaryEntry> = self.read(DIARY_KEY)?.unwrap_or_default();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Insert or replace the entry on the entry's date.
    pub fn upsert_diary_entry(&self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError> {
        let mut entries: Vec<DiaryEntry> = self.read(DIARY_KEY)?.unwrap_or_default();
        let stored = upsert_entry(&mut entries, entry).clone();
        self.write(DIARY_KEY, &entries)?;
        Ok(stored)
    }

    /// Delete the entry for a date.
    pub fn delete_diary_entry(&self, date: NaiveDate) -> Result<(), StoreError> {
        let mut entries: Vec<DiaryEntry> = self.read(DIARY_KEY)?.unwrap_or_default();
        if remove_entry_for_date(&mut entries, date).is_none() {
            return Err(StoreError::NotFound(format!("Diary entry {}", date)));
        }
        self.write(DIARY_KEY, &entries)
    }

    /// The profile, blank if never saved.
    pub fn load_profile(&self) -> Result<UserProfile, StoreError> {
        Ok(self.read(PROFILE_KEY)?.unwrap_or_default())
    }

    /// Save the profile.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.write(PROFILE_KEY, profile)
    }

    /// All templates; the built-ins until templates are first saved.
    pub fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, StoreError> {
        Ok(self.read(TEMPLATES_KEY)?.unwrap_or_else(builtin_templates))
    }

    /// Insert or replace a template by ID.
    pub fn save_template(&self, template: &WorkoutTemplate) -> Result<(), StoreError> {
        let mut templates = self.list_templates()?;
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        self.write(TEMPLATES_KEY, &templates)
    }

    /// Delete a template by ID.
    pub fn delete_template(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut templates = self.list_templates()?;
        let before = templates.len();
        templates.retain(|t| t.id != *id);
        if templates.len() == before {
            return Err(StoreError::NotFound(format!("Template {}", id)));
        }
        self.write(TEMPLATES_KEY, &templates)
    }

    /// Catalog names; the defaults until a name is first added.
    pub fn list_exercise_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read(EXERCISES_KEY)?.unwrap_or_else(default_exercise_names))
    }

    /// Append a name to the catalog. Returns false if it was already there.
    pub fn add_exercise_name(&self, name: &str) -> Result<bool, StoreError> {
        let mut names = self.list_exercise_names()?;
        if !add_unique(&mut names, name)? {
            return Ok(false);
        }
        self.write(EXERCISES_KEY, &names)?;
        Ok(true)
    }
}
