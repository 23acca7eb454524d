//! Diary entry types.
//!
//! T061: Define DiaryEntry and the 1-5 Scale newtype

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workouts::types::ValidationError;

/// A rating on a 1 to 5 scale (mood, energy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Scale(u8);

impl Scale {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a rating for the named field.
    pub fn new(field: &'static str, value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfScale { field, value })
        }
    }

    /// The raw rating.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Scale {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Scale::new("rating", value)
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A single day's note plus optional body metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Day the entry belongs to; one entry per date
    pub date: NaiveDate,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Mood rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Scale>,
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Energy rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Scale>,
}

impl DiaryEntry {
    /// Create an empty entry for a date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            notes: String::new(),
            mood: None,
            weight_kg: None,
            energy: None,
        }
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the mood rating.
    pub fn with_mood(mut self, mood: u8) -> Result<Self, ValidationError> {
        self.mood = Some(Scale::new("mood", mood)?);
        Ok(self)
    }

    /// Set the energy rating.
    pub fn with_energy(mut self, energy: u8) -> Result<Self, ValidationError> {
        self.energy = Some(Scale::new("energy", energy)?);
        Ok(self)
    }

    /// Set the body weight; zero or negative clears it.
    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = (weight_kg.is_finite() && weight_kg > 0.0).then_some(weight_kg);
        self
    }
}
