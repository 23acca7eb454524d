//! Exercise name catalog offered when logging a workout.
//!
//! T025: Default exercise names
//! T026: Append-only catalog without duplicates

use crate::workouts::types::ValidationError;

/// Names every new catalog starts with, in display order.
pub const DEFAULT_EXERCISES: [&str; 24] = [
    "Supino Reto",
    "Supino Inclinado",
    "Crucifixo",
    "Agachamento",
    "Leg Press",
    "Rosca Direta",
    "Rosca Martelo",
    "Tríceps Pulley",
    "Remada",
    "Puxada",
    "Desenvolvimento",
    "Elevação Lateral",
    "Stiff",
    "Panturrilha",
    "Esteira",
    "Bicicleta",
    "Elíptico",
    "Transport",
    "Escada",
    "Remo",
    "Corrida",
    "Caminhada",
    "Ciclismo",
    "Natação",
];

/// The default catalog as owned names.
pub fn default_exercise_names() -> Vec<String> {
    DEFAULT_EXERCISES.iter().map(|name| name.to_string()).collect()
}

/// Trim a candidate name, rejecting blanks.
pub fn normalize_exercise_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName("exercise"));
    }
    Ok(name.to_string())
}

/// Append `name` unless the catalog already holds it exactly.
///
/// Returns whether the catalog changed.
pub fn add_unique(names: &mut Vec<String>, name: &str) -> Result<bool, ValidationError> {
    let name = normalize_exercise_name(name)?;
    if names.iter().any(|existing| *existing == name) {
        return Ok(false);
    }
    names.push(name);
    Ok(true)
}
