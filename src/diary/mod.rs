//! Training diary module.
//!
//! Daily free-form notes with optional mood, energy and body weight.

pub mod journal;
pub mod types;

pub use journal::{
    entry_for_date, format_display_date, remove_entry_for_date, upsert_entry, DiaryUpdate,
};
pub use types::{DiaryEntry, Scale};
