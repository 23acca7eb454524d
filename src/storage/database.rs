//! Database operations using rusqlite.
//!
//! T009: Implement Database struct with connection and migration
//! T080: Implement workout CRUD operations
//! T085: Implement diary upsert-on-date
//! T115: Implement UserProfile persistence
//! T120: Implement template CRUD with built-in seeding
//! T125: Implement the exercise name catalog

use crate::diary::types::{DiaryEntry, Scale};
use crate::storage::config::UserProfile;
use crate::storage::schema::{
    CURRENT_VERSION, EXERCISE_CATALOG_SCHEMA, SCHEMA, SCHEMA_VERSION_TABLE,
};
use crate::workouts::catalog::DEFAULT_EXERCISES;
use crate::workouts::library::builtin_templates;
use crate::workouts::types::{Exercise, TemplateCategory, Workout, WorkoutTemplate};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

const WORKOUT_COLUMNS: &str = "id, name, date, exercises_json, notes";
const DIARY_COLUMNS: &str = "id, date, notes, mood, weight_kg, energy";
const TEMPLATE_COLUMNS: &str = "id, name, description, category, exercises_json";

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        tracing::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            // Fresh databases start with the built-in templates.
            for template in builtin_templates() {
                self.save_template(&template)?;
            }

            self.record_version(1)?;
        }

        if from_version < 2 {
            self.conn
                .execute_batch(EXERCISE_CATALOG_SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            for name in DEFAULT_EXERCISES {
                self.add_exercise_name(name)?;
            }

            self.record_version(2)?;
        }

        tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        Ok(())
    }

    fn record_version(&self, version: i32) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                [version],
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // ========== Workout CRUD Operations (T080) ==========

    /// Insert a workout, or replace the one with the same ID.
    pub fn save_workout(&self, workout: &Workout) -> Result<(), DatabaseError> {
        let exercises_json = serde_json::to_string(&workout.exercises)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        let now = timestamp(Utc::now());

        self.conn
            .execute(
                "INSERT INTO workouts (id, name, date, exercises_json, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    date = excluded.date,
                    exercises_json = excluded.exercises_json,
                    notes = excluded.notes,
                    updated_at = excluded.updated_at",
                params![
                    workout.id.to_string(),
                    workout.name,
                    workout.date.format(DATE_FORMAT).to_string(),
                    exercises_json,
                    workout.notes,
                    now,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a workout by ID.
    pub fn get_workout(&self, id: &Uuid) -> Result<Option<Workout>, DatabaseError> {
        let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?1");

        let row = self
            .conn
            .query_row(&sql, params![id.to_string()], WorkoutRow::from_row)
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(WorkoutRow::into_workout).transpose()
    }

    /// Get all workouts, newest date first.
    pub fn list_workouts(&self) -> Result<Vec<Workout>, DatabaseError> {
        let sql = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts ORDER BY date DESC, created_at DESC"
        );

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], WorkoutRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut workouts = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            workouts.push(row.into_workout()?);
        }

        Ok(workouts)
    }

    /// Delete a workout by ID.
    pub fn delete_workout(&self, id: &Uuid) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id.to_string()])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Workout {}", id)));
        }

        Ok(())
    }

    /// Count workouts in the database.
    pub fn count_workouts(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    // ========== Diary Operations (T085) ==========

    /// Insert or replace the entry for the entry's date.
    ///
    /// An existing entry on that date keeps its ID. Returns the stored entry.
    pub fn upsert_diary_entry(&self, entry: &DiaryEntry) -> Result<DiaryEntry, DatabaseError> {
        let date = entry.date.format(DATE_FORMAT).to_string();

        self.conn
            .execute(
                "INSERT INTO diary_entries (id, date, notes, mood, weight_kg, energy, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(date) DO UPDATE SET
                    notes = excluded.notes,
                    mood = excluded.mood,
                    weight_kg = excluded.weight_kg,
                    energy = excluded.energy,
                    updated_at = excluded.updated_at",
                params![
                    entry.id.to_string(),
                    date,
                    entry.notes,
                    entry.mood.map(Scale::value),
                    entry.weight_kg,
                    entry.energy.map(Scale::value),
                    timestamp(Utc::now()),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        self.get_diary_entry(entry.date)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Diary entry {}", date)))
    }

    /// Get the diary entry for a date.
    pub fn get_diary_entry(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, DatabaseError> {
        let sql = format!("SELECT {DIARY_COLUMNS} FROM diary_entries WHERE date = ?1");

        let row = self
            .conn
            .query_row(
                &sql,
                params![date.format(DATE_FORMAT).to_string()],
                DiaryRow::from_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(DiaryRow::into_entry).transpose()
    }

    /// Get all diary entries, newest first.
    pub fn list_diary_entries(&self) -> Result<Vec<DiaryEntry>, DatabaseError> {
        let sql = format!("SELECT {DIARY_COLUMNS} FROM diary_entries ORDER BY date DESC");

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], DiaryRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            entries.push(row.into_entry()?);
        }

        Ok(entries)
    }

    /// Delete the diary entry for a date.
    pub fn delete_diary_entry(&self, date: NaiveDate) -> Result<(), DatabaseError> {
        let date = date.format(DATE_FORMAT).to_string();
        let rows_affected = self
            .conn
            .execute("DELETE FROM diary_entries WHERE date = ?1", params![date])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Diary entry {}", date)));
        }

        Ok(())
    }

    // ========== User Profile Operations (T115) ==========

    /// Load the profile, or a blank one if none was saved yet.
    pub fn load_profile(&self) -> Result<UserProfile, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT weight_kg, updated_at FROM user_profile WHERE id = 1",
                [],
                |row| Ok((row.get::<_, Option<f64>>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match row {
            Some((weight_kg, updated_at)) => Ok(UserProfile {
                weight_kg,
                updated_at: parse_timestamp(&updated_at)?,
            }),
            None => Ok(UserProfile::default()),
        }
    }

    /// Save the singleton profile.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO user_profile (id, weight_kg, updated_at) VALUES (1, ?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET
                    weight_kg = excluded.weight_kg,
                    updated_at = excluded.updated_at",
                params![profile.weight_kg, timestamp(profile.updated_at)],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    // ========== Template Operations (T120) ==========

    /// Insert a template, or replace the one with the same ID.
    pub fn save_template(&self, template: &WorkoutTemplate) -> Result<(), DatabaseError> {
        let exercises_json = serde_json::to_string(&template.exercises)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO workout_templates (id, name, description, category, exercises_json, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    category = excluded.category,
                    exercises_json = excluded.exercises_json",
                params![
                    template.id.to_string(),
                    template.name,
                    template.description,
                    template.category.as_str(),
                    exercises_json,
                    timestamp(Utc::now()),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get all templates in creation order.
    pub fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, DatabaseError> {
        let sql = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM workout_templates ORDER BY created_at ASC, rowid ASC"
        );

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], TemplateRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut templates = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            templates.push(row.into_template()?);
        }

        Ok(templates)
    }

    /// Delete a template by ID.
    pub fn delete_template(&self, id: &Uuid) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM workout_templates WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Template {}", id)));
        }

        Ok(())
    }

    // ========== Exercise Catalog (T125) ==========

    /// Catalog names in the order they were added.
    pub fn list_exercise_names(&self) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM exercise_catalog ORDER BY position")
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        rows.collect::<SqliteResult<Vec<String>>>()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Append a name to the catalog. Returns false if it was already there.
    pub fn add_exercise_name(&self, name: &str) -> Result<bool, DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO exercise_catalog (name, created_at) VALUES (?1, ?2)",
                params![name, timestamp(Utc::now())],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(rows_affected > 0)
    }
}

/// Internal struct for reading workout rows.
struct WorkoutRow {
    id: String,
    name: String,
    date: String,
    exercises_json: String,
    notes: Option<String>,
}

impl WorkoutRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            date: row.get(2)?,
            exercises_json: row.get(3)?,
            notes: row.get(4)?,
        })
    }

    fn into_workout(self) -> Result<Workout, DatabaseError> {
        let exercises: Vec<Exercise> = serde_json::from_str(&self.exercises_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        Ok(Workout {
            id: parse_uuid(&self.id)?,
            name: self.name,
            date: parse_date(&self.date)?,
            exercises,
            notes: self.notes,
        })
    }
}

/// Internal struct for reading diary rows.
struct DiaryRow {
    id: String,
    date: String,
    notes: String,
    mood: Option<u8>,
    weight_kg: Option<f64>,
    energy: Option<u8>,
}

impl DiaryRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            notes: row.get(2)?,
            mood: row.get(3)?,
            weight_kg: row.get(4)?,
            energy: row.get(5)?,
        })
    }

    fn into_entry(self) -> Result<DiaryEntry, DatabaseError> {
        let scale = |field: &'static str, value: Option<u8>| {
            value
                .map(|v| Scale::new(field, v))
                .transpose()
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))
        };

        Ok(DiaryEntry {
            id: parse_uuid(&self.id)?,
            date: parse_date(&self.date)?,
            notes: self.notes,
            mood: scale("mood", self.mood)?,
            weight_kg: self.weight_kg,
            energy: scale("energy", self.energy)?,
        })
    }
}

/// Internal struct for reading template rows.
struct TemplateRow {
    id: String,
    name: String,
    description: Option<String>,
    category: String,
    exercises_json: String,
}

impl TemplateRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            exercises_json: row.get(4)?,
        })
    }

    fn into_template(self) -> Result<WorkoutTemplate, DatabaseError> {
        let category: TemplateCategory = self
            .category
            .parse()
            .map_err(DatabaseError::DeserializationError)?;
        let exercises: Vec<Exercise> = serde_json::from_str(&self.exercises_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        Ok(WorkoutTemplate {
            id: parse_uuid(&self.id)?,
            name: self.name,
            description: self.description,
            category,
            exercises,
        })
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::DeserializationError(e.to_string()))
}

fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::DeserializationError(format!("date '{}': {}", s, e)))
}

/// Fixed-width RFC 3339 so stored timestamps sort as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(e.to_string()))
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
