//src/store.rs
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(u64);

impl WorkoutId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkoutId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One exercise of a workout with its set/rep targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

impl ExerciseEntry {
    pub fn new(name: impl Into<String>, sets: u32, reps: u32) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
        }
    }
}

impl fmt::Display for ExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} sets × {} reps", self.name, self.sets, self.reps)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: WorkoutId,
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutRecord {
    /// The canonical `YYYY-MM-DD` form of the record's date.
    #[must_use]
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Exercise names joined with ", ", as shown on the calendar.
    #[must_use]
    pub fn title(&self) -> String {
        self.exercises
            .iter()
            .map(|ex| ex.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A workout that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseEntry>,
}

/// What a store mutation did. Sent to subscribers after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added(Vec<WorkoutId>),
    Updated(WorkoutId),
    Removed(WorkoutId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange, &[WorkoutRecord])>;

/// The authoritative in-memory list of workouts.
///
/// Ids come from a counter owned by the store, so records created in the
/// same instant never collide. The store does not validate dates or
/// exercises; callers are expected to have checked for conflicts first.
pub struct WorkoutStore {
    records: Vec<WorkoutRecord>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }
}

impl fmt::Debug for WorkoutStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkoutStore")
            .field("records", &self.records)
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WorkoutStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every workout, assigning fresh ids in order.
    /// Returns the ids that were assigned.
    pub fn add(&mut self, workouts: impl IntoIterator<Item = NewWorkout>) -> Vec<WorkoutId> {
        let mut added = Vec::new();
        for workout in workouts {
            let id = self.allocate_id();
            debug!(%id, date = %workout.date, "adding workout");
            self.records.push(WorkoutRecord {
                id,
                date: workout.date,
                exercises: workout.exercises,
            });
            added.push(id);
        }
        if !added.is_empty() {
            self.notify(&StoreChange::Added(added.clone()));
        }
        added
    }

    /// Replaces the exercises of the record with `id`.
    /// Returns `false` and changes nothing when no such record exists.
    pub fn update(&mut self, id: WorkoutId, exercises: Vec<ExerciseEntry>) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!(%id, "update ignored, workout not found");
            return false;
        };
        record.exercises = exercises;
        debug!(%id, "updated workout");
        self.notify(&StoreChange::Updated(id));
        true
    }

    /// Deletes the record with `id`, returning it if it existed.
    pub fn remove(&mut self, id: WorkoutId) -> Option<WorkoutRecord> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            debug!(%id, "remove ignored, workout not found");
            return None;
        };
        let removed = self.records.remove(pos);
        debug!(%id, date = %removed.date, "removed workout");
        self.notify(&StoreChange::Removed(id));
        Some(removed)
    }

    #[must_use]
    pub fn find_by_date(&self, date: NaiveDate) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    #[must_use]
    pub fn find_by_id(&self, id: WorkoutId) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    /// All records ordered by date, oldest first. Ties keep id order.
    #[must_use]
    pub fn sorted_by_date(&self) -> Vec<&WorkoutRecord> {
        let mut sorted: Vec<&WorkoutRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| (r.date, r.id));
        sorted
    }

    pub fn records_in_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &WorkoutRecord> + '_ {
        self.records
            .iter()
            .filter(move |r| r.date.year() == year && r.date.month() == month)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registers a listener that runs after every effective mutation with
    /// the change and the new contents of the store.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreChange, &[WorkoutRecord]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    fn allocate_id(&mut self) -> WorkoutId {
        let id = WorkoutId(self.next_id);
        self.next_id += 1;
        id
    }

    fn notify(&mut self, change: &StoreChange) {
        let records = &self.records;
        for (_, listener) in &mut self.listeners {
            listener(change, records);
        }
    }
}
