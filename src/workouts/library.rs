//! Built-in workout templates.
//!
//! T019: Define the seed template set
//! T020: Implement template seeding logic
//! T021: Add search/filter helpers

use uuid::Uuid;

use super::types::{Exercise, TemplateCategory, WorkoutTemplate};

// Stable ids so seeded templates keep their identity across reseeds.
const CHEST_DAY_ID: Uuid = Uuid::from_u128(0x6d0c_2f31_5a41_4a8e_9b1f_0000_0000_0001);
const LEG_DAY_ID: Uuid = Uuid::from_u128(0x6d0c_2f31_5a41_4a8e_9b1f_0000_0000_0002);
const BASIC_CARDIO_ID: Uuid = Uuid::from_u128(0x6d0c_2f31_5a41_4a8e_9b1f_0000_0000_0003);

/// Template filter.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Only templates in this category
    pub category: Option<TemplateCategory>,
    /// Case-insensitive substring of the name or description
    pub query: Option<String>,
}

impl SearchCriteria {
    /// Filter by category.
    pub fn category(category: TemplateCategory) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    /// Filter by text.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    fn matches(&self, template: &WorkoutTemplate) -> bool {
        if let Some(category) = self.category {
            if template.category != category {
                return false;
            }
        }

        match &self.query {
            Some(query) => {
                let needle = query.to_lowercase();
                template.name.to_lowercase().contains(&needle)
                    || template
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Search templates, preserving input order.
pub fn search<'a>(
    templates: &'a [WorkoutTemplate],
    criteria: &SearchCriteria,
) -> Vec<&'a WorkoutTemplate> {
    templates.iter().filter(|t| criteria.matches(t)).collect()
}

/// Whether the template is one of the seeded built-ins.
pub fn is_builtin(id: &Uuid) -> bool {
    [CHEST_DAY_ID, LEG_DAY_ID, BASIC_CARDIO_ID].contains(id)
}

/// Templates a fresh installation starts with.
pub fn builtin_templates() -> Vec<WorkoutTemplate> {
    let mut chest = WorkoutTemplate::new("Chest Day", TemplateCategory::Chest)
        .with_description("Chest and triceps focus")
        .with_exercise(Exercise::strength("Supino Reto", 4, "10-12", "40"))
        .with_exercise(Exercise::strength("Supino Inclinado", 3, "10-12", "35"))
        .with_exercise(Exercise::strength("Crucifixo", 3, "12-15", "15"))
        .with_exercise(Exercise::strength("Tríceps Pulley", 3, "12-15", "25"));
    chest.id = CHEST_DAY_ID;

    let mut legs = WorkoutTemplate::new("Leg Day", TemplateCategory::Legs)
        .with_description("Quads, hamstrings and calves")
        .with_exercise(Exercise::strength("Agachamento", 4, "12-15", "50"))
        .with_exercise(Exercise::strength("Leg Press", 3, "15-20", "80"))
        .with_exercise(Exercise::strength("Stiff", 3, "12-15", "30"))
        .with_exercise(Exercise::strength("Panturrilha", 4, "15-20", "40"));
    legs.id = LEG_DAY_ID;

    let mut cardio = WorkoutTemplate::new("Basic Cardio", TemplateCategory::Cardio)
        .with_description("Steady cardiovascular session")
        .with_exercise(Exercise::cardio("Esteira", "20", None))
        .with_exercise(Exercise::cardio("Bicicleta", "15", None));
    cardio.id = BASIC_CARDIO_ID;

    vec![chest, legs, cardio]
}
