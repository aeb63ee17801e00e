//src/catalog.rs
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The closed set of exercise categories, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[strum(ascii_case_insensitive)]
pub enum ExerciseCategory {
    Push,
    Pull,
    Legs,
    Core,
}

const PUSH_EXERCISES: &[&str] = &["Push-ups", "Dips", "Handstand Push-ups"];
const PULL_EXERCISES: &[&str] = &["Pull-ups", "Chin-ups", "Rows"];
const LEGS_EXERCISES: &[&str] = &["Squats", "Lunges", "Pistol Squats"];
const CORE_EXERCISES: &[&str] = &["Plank", "L-sit", "Leg Raises"];

impl ExerciseCategory {
    pub const COUNT: usize = 4;
    pub const ALL: [Self; Self::COUNT] = [Self::Push, Self::Pull, Self::Legs, Self::Core];

    /// Position of the category in `ALL`, used to index `CategoryMap`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical exercise names of this category, in catalog order.
    #[must_use]
    pub const fn exercises(self) -> &'static [&'static str] {
        match self {
            Self::Push => PUSH_EXERCISES,
            Self::Pull => PULL_EXERCISES,
            Self::Legs => LEGS_EXERCISES,
            Self::Core => CORE_EXERCISES,
        }
    }

    #[must_use]
    pub fn contains(self, exercise_name: &str) -> bool {
        self.exercises().contains(&exercise_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExerciseDefinition {
    pub category: ExerciseCategory,
    pub name: &'static str,
}

/// Every exercise in the catalog, category by category.
pub fn definitions() -> impl Iterator<Item = ExerciseDefinition> {
    ExerciseCategory::iter().flat_map(|category| {
        category
            .exercises()
            .iter()
            .map(move |&name| ExerciseDefinition { category, name })
    })
}

/// Fixed-size storage with one slot per `ExerciseCategory`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryMap<T>([T; ExerciseCategory::COUNT]);

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(ExerciseCategory) -> T) -> Self {
        Self(std::array::from_fn(|i| f(ExerciseCategory::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExerciseCategory, &T)> {
        ExerciseCategory::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ExerciseCategory, &mut T)> {
        ExerciseCategory::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> Index<ExerciseCategory> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: ExerciseCategory) -> &T {
        &self.0[category.index()]
    }
}

impl<T> IndexMut<ExerciseCategory> for CategoryMap<T> {
    fn index_mut(&mut self, category: ExerciseCategory) -> &mut T {
        &mut self.0[category.index()]
    }
}
