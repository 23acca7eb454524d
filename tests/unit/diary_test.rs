//! Unit tests for the training diary.
//!
//! T061-T064: Entries, one-per-date upsert, display dates, partial updates

use chrono::NaiveDate;
use gymlog::diary::{
    entry_for_date, format_display_date, remove_entry_for_date, upsert_entry, DiaryEntry,
    DiaryUpdate, Scale,
};
use gymlog::workouts::ValidationError;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

/// Ratings outside 1..=5 name the offending field.
#[test]
fn test_rating_validation() {
    let err = DiaryEntry::new(day(4, 1)).with_mood(0).unwrap_err();
    assert_eq!(err, ValidationError::OutOfScale { field: "mood", value: 0 });

    let err = DiaryEntry::new(day(4, 1)).with_energy(9).unwrap_err();
    assert_eq!(err, ValidationError::OutOfScale { field: "energy", value: 9 });

    let entry = DiaryEntry::new(day(4, 1))
        .with_mood(Scale::MIN)
        .unwrap()
        .with_energy(Scale::MAX)
        .unwrap();
    assert_eq!(entry.mood.map(Scale::value), Some(1));
    assert_eq!(entry.energy.map(Scale::value), Some(5));
}

/// Non-positive body weight is not recorded.
#[test]
fn test_weight_must_be_positive() {
    assert_eq!(DiaryEntry::new(day(4, 1)).with_weight(72.4).weight_kg, Some(72.4));
    assert_eq!(DiaryEntry::new(day(4, 1)).with_weight(0.0).weight_kg, None);
    assert_eq!(DiaryEntry::new(day(4, 1)).with_weight(-3.0).weight_kg, None);
}

/// Writing twice on one date keeps a single entry with the first id.
#[test]
fn test_one_entry_per_date() {
    let mut entries = Vec::new();
    let original = upsert_entry(&mut entries, DiaryEntry::new(day(4, 1)).with_notes("legs"))
        .id;
    upsert_entry(
        &mut entries,
        DiaryEntry::new(day(4, 1)).with_notes("legs, then cardio"),
    );

    assert_eq!(entries.len(), 1);
    let entry = entry_for_date(&entries, day(4, 1)).unwrap();
    assert_eq!(entry.id, original);
    assert_eq!(entry.notes, "legs, then cardio");
}

/// Removing a date returns the entry once.
#[test]
fn test_remove_entry() {
    let mut entries = vec![DiaryEntry::new(day(4, 1)), DiaryEntry::new(day(4, 2))];

    assert!(remove_entry_for_date(&mut entries, day(4, 1)).is_some());
    assert!(remove_entry_for_date(&mut entries, day(4, 1)).is_none());
    assert_eq!(entries.len(), 1);
}

/// Setting only the mood keeps the day's notes, energy and weight.
#[test]
fn test_partial_update_keeps_other_fields() {
    let mut entries = Vec::new();
    let original = upsert_entry(
        &mut entries,
        DiaryEntry::new(day(4, 3))
            .with_notes("deadlift PR")
            .with_energy(3)
            .unwrap()
            .with_weight(81.5),
    )
    .clone();

    let update = DiaryUpdate {
        mood: Some(4),
        ..Default::default()
    };
    let merged = update
        .apply(entry_for_date(&entries, day(4, 3)), day(4, 3))
        .unwrap();
    upsert_entry(&mut entries, merged);

    let entry = entry_for_date(&entries, day(4, 3)).unwrap();
    assert_eq!(entry.id, original.id);
    assert_eq!(entry.notes, "deadlift PR");
    assert_eq!(entry.energy.map(Scale::value), Some(3));
    assert_eq!(entry.weight_kg, Some(81.5));
    assert_eq!(entry.mood.map(Scale::value), Some(4));
}

/// A zero weight in an update clears the stored weight.
#[test]
fn test_partial_update_can_clear_weight() {
    let existing = DiaryEntry::new(day(4, 3)).with_weight(81.5);
    let update = DiaryUpdate {
        weight_kg: Some(0.0),
        ..Default::default()
    };

    let merged = update.apply(Some(&existing), day(4, 3)).unwrap();
    assert_eq!(merged.weight_kg, None);
    assert!(DiaryUpdate::default().is_empty());
}

/// Relative labels for today and yesterday, DD/MM/YYYY otherwise.
#[test]
fn test_display_dates() {
    let today = day(4, 10);

    assert_eq!(format_display_date(today, today), "Today");
    assert_eq!(format_display_date(day(4, 9), today), "Yesterday");
    assert_eq!(format_display_date(day(4, 8), today), "08/04/2024");
    assert_eq!(format_display_date(day(4, 11), today), "11/04/2024");
}
