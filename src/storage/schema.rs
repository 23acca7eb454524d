//! Database schema definitions for gymlog.
//!
//! T008: Define database schema SQL

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Workouts table; exercises are stored as a JSON array
CREATE TABLE IF NOT EXISTS workouts (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    date TEXT NOT NULL,
    exercises_json TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date);

-- Diary entries table; one row per day
CREATE TABLE IF NOT EXISTS diary_entries (
    id TEXT PRIMARY KEY,
    date TEXT NOT NULL UNIQUE,
    notes TEXT NOT NULL DEFAULT '',
    mood INTEGER CHECK (mood BETWEEN 1 AND 5),
    weight_kg REAL,
    energy INTEGER CHECK (energy BETWEEN 1 AND 5),
    updated_at TEXT NOT NULL
);

-- Singleton user profile
CREATE TABLE IF NOT EXISTS user_profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    weight_kg REAL,
    updated_at TEXT NOT NULL
);

-- Workout templates table
CREATE TABLE IF NOT EXISTS workout_templates (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    category TEXT NOT NULL,
    exercises_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// Version 2: exercise name catalog, listed in insertion order.
pub const EXERCISE_CATALOG_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS exercise_catalog (
    position INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);
"#;

/// Schema version table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 2;
