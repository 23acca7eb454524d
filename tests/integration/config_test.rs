//! Integration tests for configuration-driven store selection.
//!
//! T010: Config file picks the backend and stats window

use chrono::NaiveDate;
use gymlog::storage::config::{load_config_from, save_config};
use gymlog::storage::{open_store, StorageBackend};
use gymlog::workouts::{Exercise, Workout};
use tempfile::TempDir;

/// Without a config file the SQLite backend is used.
#[test]
fn test_default_backend_is_sqlite() {
    let dir = TempDir::new().unwrap();
    let config = load_config_from(dir.path()).unwrap();

    let mut store = open_store(&config).unwrap();
    store
        .save_workout(&Workout::new("Push", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()))
        .unwrap();

    assert!(dir.path().join("gymlog.db").exists());
    assert!(!dir.path().join("gym-workouts.json").exists());
}

/// A saved config switches to the JSON backend on the next load.
#[test]
fn test_json_backend_from_config() {
    let dir = TempDir::new().unwrap();
    let mut config = load_config_from(dir.path()).unwrap();
    config.storage.backend = StorageBackend::Json;
    save_config(&config).unwrap();

    let config = load_config_from(dir.path()).unwrap();
    let mut store = open_store(&config).unwrap();
    let workout = Workout::new("Cardio", NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
        .with_exercise(Exercise::cardio("Esteira", "25", Some("4")));
    store.save_workout(&workout).unwrap();

    assert!(dir.path().join("gym-workouts.json").exists());
    assert!(!dir.path().join("gymlog.db").exists());
    assert_eq!(store.list_workouts().unwrap(), vec![workout]);
}

/// The stats window in the config file reaches the metrics engine.
#[test]
fn test_stats_window_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[stats]\nfrequency_window_days = 7\nfrequency_weeks = 1.0\n",
    )
    .unwrap();

    let window = load_config_from(dir.path()).unwrap().stats.frequency_window();
    assert_eq!(window.days, 7);
    assert_eq!(window.weeks, 1.0);
}
