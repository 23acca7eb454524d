//! Metabolic-equivalent (MET) lookup for calorie estimation.
//!
//! T030: Embed the MET table and lookup
//!
//! Values are approximate, taken from the Compendium of Physical Activities.
//! Keys are lower-case exercise names as they are logged in the app.

/// MET for generic resistance training, used when nothing matches.
pub const DEFAULT_MET: f64 = 4.8;

/// Known exercises and their MET values, in lookup order.
pub const MET_TABLE: &[(&str, f64)] = &[
    // Strength
    ("supino reto", 5.0),
    ("supino inclinado", 5.0),
    ("agachamento", 5.5),
    ("leg press", 4.0),
    ("rosca direta", 4.0),
    ("tríceps pulley", 3.5),
    ("remada", 5.0),
    ("puxada", 5.0),
    ("desenvolvimento", 4.5),
    ("stiff", 6.0),
    ("musculação geral", DEFAULT_MET),
    // Cardio
    ("corrida", 8.0),
    ("caminhada", 3.5),
    ("esteira", 7.0),
    ("bicicleta", 7.5),
    ("elíptico", 5.0),
    ("escada", 8.0),
    ("natação", 7.0),
    ("remo", 6.0),
];

/// Look up the MET value for an exercise name.
///
/// Tries an exact (case-insensitive) match first, then the first table key
/// contained in the name, then falls back to [`DEFAULT_MET`]. When several
/// keys are contained in the name the earliest table entry wins.
pub fn met_value(exercise_name: &str) -> f64 {
    let name = exercise_name.to_lowercase();

    if let Some((_, met)) = MET_TABLE.iter().find(|(key, _)| *key == name) {
        return *met;
    }

    MET_TABLE
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, met)| *met)
        .unwrap_or(DEFAULT_MET)
}
