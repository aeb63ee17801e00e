//src/grouping.rs
use crate::catalog::ExerciseCategory;
use crate::store::ExerciseEntry;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseGroup {
    pub category: ExerciseCategory,
    pub exercises: Vec<ExerciseEntry>,
}

/// Groups a workout's exercises back into their catalog categories.
///
/// Categories come out in catalog order and only when at least one exercise
/// belongs to them. Within a group the input order is kept. Names that are
/// not in the catalog are left out.
#[must_use]
pub fn group_by_category(exercises: &[ExerciseEntry]) -> Vec<ExerciseGroup> {
    ExerciseCategory::iter()
        .filter_map(|category| {
            let matching: Vec<ExerciseEntry> = exercises
                .iter()
                .filter(|ex| category.contains(&ex.name))
                .cloned()
                .collect();
            (!matching.is_empty()).then_some(ExerciseGroup {
                category,
                exercises: matching,
            })
        })
        .collect()
}

/// Flattens groups back into one list, group by group.
#[must_use]
pub fn flatten_groups(groups: &[ExerciseGroup]) -> Vec<ExerciseEntry> {
    groups
        .iter()
        .flat_map(|group| group.exercises.iter().cloned())
        .collect()
}
