//! Integration tests for the record stores.
//!
//! T080: Both backends behave the same behind RecordStore
//! T125: Exercise catalog in both backends

use chrono::NaiveDate;
use gymlog::diary::{entry_for_date, DiaryEntry, DiaryUpdate, Scale};
use gymlog::storage::{Database, JsonStore, RecordStore, StoreError, UserProfile};
use gymlog::workouts::library::is_builtin;
use gymlog::workouts::{
    Exercise, TemplateCategory, ValidationError, Workout, WorkoutTemplate, DEFAULT_EXERCISES,
};
use tempfile::TempDir;
use uuid::Uuid;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

/// Open one store of each kind in its own temp directory.
fn stores() -> Vec<(TempDir, Box<dyn RecordStore>)> {
    let sqlite_dir = TempDir::new().unwrap();
    let sqlite = Database::open(&sqlite_dir.path().join("gymlog.db")).unwrap();

    let json_dir = TempDir::new().unwrap();
    let json = JsonStore::open(json_dir.path()).unwrap();

    vec![
        (sqlite_dir, Box::new(sqlite) as Box<dyn RecordStore>),
        (json_dir, Box::new(json) as Box<dyn RecordStore>),
    ]
}

/// Workouts round-trip with their exercises and list newest first.
#[test]
fn test_workout_crud() {
    for (_dir, mut store) in stores() {
        let older = Workout::new("Legs", day(5, 1))
            .with_exercise(Exercise::strength("Agachamento", 4, "12", "50"))
            .with_exercise(Exercise::cardio("Bicicleta", "15", Some("6.2")));
        let newer = Workout::new("Push", day(5, 3))
            .with_exercise(Exercise::strength("Supino Reto", 4, "10", "40").with_notes("paused reps"));

        store.save_workout(&older).unwrap();
        store.save_workout(&newer).unwrap();

        let listed = store.list_workouts().unwrap();
        assert_eq!(listed, vec![newer.clone(), older.clone()]);
        assert_eq!(store.get_workout(&older.id).unwrap(), Some(older.clone()));

        store.delete_workout(&older.id).unwrap();
        assert_eq!(store.get_workout(&older.id).unwrap(), None);
        assert!(store.delete_workout(&older.id).unwrap_err().is_not_found());
    }
}

/// Saving an existing id replaces the record.
#[test]
fn test_workout_update() {
    for (_dir, mut store) in stores() {
        let mut workout = Workout::new("Pull", day(6, 1))
            .with_exercise(Exercise::strength("Remada", 3, "10", "45"));
        store.save_workout(&workout).unwrap();

        workout.remove_exercise(0);
        workout.name = "Pull (light)".to_string();
        store.save_workout(&workout).unwrap();

        let listed = store.list_workouts().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Pull (light)");
        assert!(listed[0].exercises.is_empty());
    }
}

/// Invalid workouts never reach storage.
#[test]
fn test_invalid_workout_rejected() {
    for (_dir, mut store) in stores() {
        let blank = Workout::new("  ", day(6, 1));
        assert!(matches!(store.save_workout(&blank), Err(StoreError::Invalid(_))));

        let no_sets = Workout::new("Push", day(6, 1))
            .with_exercise(Exercise::strength("Supino Reto", 0, "10", "40"));
        assert!(matches!(store.save_workout(&no_sets), Err(StoreError::Invalid(_))));

        assert!(store.list_workouts().unwrap().is_empty());
    }
}

/// One diary entry per date, the first id survives rewrites.
#[test]
fn test_diary_upsert() {
    for (_dir, mut store) in stores() {
        let first = store
            .upsert_diary_entry(DiaryEntry::new(day(7, 1)).with_notes("tired").with_mood(2).unwrap())
            .unwrap();
        let second = store
            .upsert_diary_entry(
                DiaryEntry::new(day(7, 1))
                    .with_notes("better after coffee")
                    .with_energy(4)
                    .unwrap()
                    .with_weight(78.5),
            )
            .unwrap();
        store.upsert_diary_entry(DiaryEntry::new(day(7, 2))).unwrap();

        assert_eq!(second.id, first.id);

        let entries = store.list_diary_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, day(7, 2));
        assert_eq!(entries[1].notes, "better after coffee");
        assert_eq!(entries[1].mood, None);
        assert_eq!(entries[1].weight_kg, Some(78.5));

        store.delete_diary_entry(day(7, 1)).unwrap();
        assert!(store.delete_diary_entry(day(7, 1)).unwrap_err().is_not_found());
    }
}

/// Updating one field of a stored entry keeps the rest.
#[test]
fn test_diary_partial_update() {
    for (_dir, mut store) in stores() {
        let original = store
            .upsert_diary_entry(
                DiaryEntry::new(day(7, 5))
                    .with_notes("long run")
                    .with_weight(77.0),
            )
            .unwrap();

        let entries = store.list_diary_entries().unwrap();
        let update = DiaryUpdate {
            mood: Some(4),
            ..Default::default()
        };
        let merged = update
            .apply(entry_for_date(&entries, day(7, 5)), day(7, 5))
            .unwrap();
        store.upsert_diary_entry(merged).unwrap();

        let entries = store.list_diary_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, original.id);
        assert_eq!(entries[0].notes, "long run");
        assert_eq!(entries[0].weight_kg, Some(77.0));
        assert_eq!(entries[0].mood.map(Scale::value), Some(4));
    }
}

/// The catalog starts with the defaults and only grows by new names.
#[test]
fn test_exercise_catalog() {
    for (_dir, mut store) in stores() {
        assert_eq!(store.list_exercise_names().unwrap(), DEFAULT_EXERCISES.to_vec());

        assert!(store.add_exercise_name("Hip Thrust").unwrap());
        assert!(!store.add_exercise_name("Hip Thrust").unwrap());
        assert!(!store.add_exercise_name(" Natação ").unwrap());
        assert!(matches!(
            store.add_exercise_name(""),
            Err(StoreError::Invalid(ValidationError::EmptyName("exercise")))
        ));

        let names = store.list_exercise_names().unwrap();
        assert_eq!(names.len(), DEFAULT_EXERCISES.len() + 1);
        assert_eq!(names.last().map(String::as_str), Some("Hip Thrust"));
    }
}

/// Catalog additions survive reopening.
#[test]
fn test_exercise_catalog_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut db = Database::open(&dir.path().join("gymlog.db")).unwrap();
        RecordStore::add_exercise_name(&mut db, "Farmer Walk").unwrap();
        let mut json = JsonStore::open(dir.path()).unwrap();
        RecordStore::add_exercise_name(&mut json, "Farmer Walk").unwrap();
    }

    let db = Database::open(&dir.path().join("gymlog.db")).unwrap();
    let json = JsonStore::open(dir.path()).unwrap();
    for store in [&db as &dyn RecordStore, &json as &dyn RecordStore] {
        let names = store.list_exercise_names().unwrap();
        assert_eq!(names.last().map(String::as_str), Some("Farmer Walk"));
    }
}

/// The profile starts blank and keeps a saved weight.
#[test]
fn test_profile() {
    for (_dir, mut store) in stores() {
        assert_eq!(store.load_profile().unwrap().weight_kg, None);

        let mut profile = UserProfile::default();
        profile.set_weight(81.0).unwrap();
        store.save_profile(&profile).unwrap();

        assert_eq!(store.load_profile().unwrap().weight_kg, Some(81.0));
    }
}

/// Built-ins are present until deleted; user templates are added.
#[test]
fn test_templates() {
    for (_dir, mut store) in stores() {
        let templates = store.list_templates().unwrap();
        assert_eq!(templates.len(), 3);
        assert!(templates.iter().all(|t| is_builtin(&t.id)));

        let arms = WorkoutTemplate::new("Arm Blast", TemplateCategory::Arms)
            .with_description("Biceps and triceps")
            .with_exercise(Exercise::strength("Rosca Direta", 3, "10", "14"));
        store.save_template(&arms).unwrap();

        store.delete_template(&templates[0].id).unwrap();
        assert!(store.delete_template(&Uuid::new_v4()).unwrap_err().is_not_found());

        let names: Vec<String> = store
            .list_templates()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Leg Day", "Basic Cardio", "Arm Blast"]);
    }
}

/// Records survive reopening the same location.
#[test]
fn test_reopen() {
    let dir = TempDir::new().unwrap();
    let workout = Workout::new("Run", day(8, 1))
        .with_exercise(Exercise::cardio("Corrida", "30", Some("5")));

    {
        let mut db = Database::open(&dir.path().join("gymlog.db")).unwrap();
        RecordStore::save_workout(&mut db, &workout).unwrap();
    }
    let db = Database::open(&dir.path().join("gymlog.db")).unwrap();
    assert_eq!(db.get_workout(&workout.id).unwrap(), Some(workout.clone()));

    {
        let mut json = JsonStore::open(dir.path()).unwrap();
        RecordStore::save_workout(&mut json, &workout).unwrap();
    }
    let json = JsonStore::open(dir.path()).unwrap();
    assert_eq!(json.get_workout(&workout.id).unwrap(), Some(workout));
}
