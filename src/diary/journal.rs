//! Upsert-on-date helpers over a list of diary entries.
//!
//! T062: One entry per date via replace-or-append
//! T063: Relative display dates
//! T064: Partial updates that keep untouched fields

use chrono::NaiveDate;

use super::types::DiaryEntry;
use crate::workouts::types::ValidationError;

/// Fields to change on a day's entry. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryUpdate {
    pub notes: Option<String>,
    pub mood: Option<u8>,
    pub energy: Option<u8>,
    /// A non-positive weight clears the recorded weight
    pub weight_kg: Option<f64>,
}

impl DiaryUpdate {
    /// Overlay the update on `existing`, or on a blank entry for `date`.
    ///
    /// Ratings are validated before anything is returned.
    pub fn apply(
        self,
        existing: Option<&DiaryEntry>,
        date: NaiveDate,
    ) -> Result<DiaryEntry, ValidationError> {
        let mut entry = existing
            .cloned()
            .unwrap_or_else(|| DiaryEntry::new(date));

        if let Some(notes) = self.notes {
            entry = entry.with_notes(notes);
        }
        if let Some(mood) = self.mood {
            entry = entry.with_mood(mood)?;
        }
        if let Some(energy) = self.energy {
            entry = entry.with_energy(energy)?;
        }
        if let Some(weight) = self.weight_kg {
            entry = entry.with_weight(weight);
        }
        Ok(entry)
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.notes.is_none()
            && self.mood.is_none()
            && self.energy.is_none()
            && self.weight_kg.is_none()
    }
}

/// Insert `entry`, replacing any entry already on the same date.
///
/// A replaced entry keeps its original id. Returns the stored entry.
pub fn upsert_entry(entries: &mut Vec<DiaryEntry>, mut entry: DiaryEntry) -> &DiaryEntry {
    match entries.iter().position(|e| e.date == entry.date) {
        Some(index) => {
            entry.id = entries[index].id;
            entries[index] = entry;
            &entries[index]
        }
        None => {
            entries.push(entry);
            &entries[entries.len() - 1]
        }
    }
}

/// The entry for a date, if any.
pub fn entry_for_date(entries: &[DiaryEntry], date: NaiveDate) -> Option<&DiaryEntry> {
    entries.iter().find(|e| e.date == date)
}

/// Remove the entry for a date. Returns it if one existed.
pub fn remove_entry_for_date(entries: &mut Vec<DiaryEntry>, date: NaiveDate) -> Option<DiaryEntry> {
    let index = entries.iter().position(|e| e.date == date)?;
    Some(entries.remove(index))
}

/// "Today", "Yesterday", or DD/MM/YYYY.
pub fn format_display_date(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => date.format("%d/%m/%Y").to_string(),
    }
}
