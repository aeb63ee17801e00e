//src/form.rs
use crate::catalog::{CategoryMap, ExerciseCategory};
use crate::store::{ExerciseEntry, NewWorkout, WorkoutId, WorkoutRecord};
use chrono::{Days, NaiveDate};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 8;
pub const DEFAULT_RECURRING_WEEKS: u32 = 1;
pub const MAX_SETS_OR_REPS: u32 = 999;
pub const MAX_RECURRING_WEEKS: u32 = 104;

/// Values a fresh draft starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftDefaults {
    pub sets: u32,
    pub reps: u32,
    pub recurring_weeks: u32,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            recurring_weeks: DEFAULT_RECURRING_WEEKS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Sets,
    Reps,
    RecurringWeeks,
}

impl NumericField {
    /// Largest value the field accepts.
    #[must_use]
    pub const fn max(self) -> u32 {
        match self {
            Self::Sets | Self::Reps => MAX_SETS_OR_REPS,
            Self::RecurringWeeks => MAX_RECURRING_WEEKS,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sets => write!(f, "sets"),
            Self::Reps => write!(f, "reps"),
            Self::RecurringWeeks => write!(f, "number of weeks"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please select at least one exercise.")]
    NoExerciseSelected,
    #[error("Invalid {field}: '{input}' is not a positive whole number up to {}.", .field.max())]
    InvalidNumber { field: NumericField, input: String },
    #[error("There is no exercise #{index} in {category}.")]
    UnknownExercise {
        category: ExerciseCategory,
        index: usize,
    },
    #[error("Repeating {weeks} weeks from {start} runs past the supported date range.")]
    DateOutOfRange { start: NaiveDate, weeks: u32 },
    #[error("The workout form is not open.")]
    NotOpen,
}

/// One row of the draft: a catalog exercise and what the user entered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftExercise {
    pub name: &'static str,
    pub checked: bool,
    pub sets: u32,
    pub reps: u32,
}

/// Uncommitted contents of the workout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    exercises: CategoryMap<Vec<DraftExercise>>,
    is_recurring: bool,
    recurring_weeks: u32,
    expanded: CategoryMap<bool>,
    focused_category: Option<ExerciseCategory>,
}

impl FormDraft {
    /// Every catalog exercise unchecked with the default sets/reps.
    #[must_use]
    pub fn new(defaults: DraftDefaults) -> Self {
        Self {
            exercises: CategoryMap::from_fn(|category| {
                category
                    .exercises()
                    .iter()
                    .map(|&name| DraftExercise {
                        name,
                        checked: false,
                        sets: defaults.sets,
                        reps: defaults.reps,
                    })
                    .collect()
            }),
            is_recurring: false,
            recurring_weeks: defaults.recurring_weeks,
            expanded: CategoryMap::default(),
            focused_category: None,
        }
    }

    /// A draft with the record's exercises checked and their stored values.
    #[must_use]
    pub fn for_record(record: &WorkoutRecord, defaults: DraftDefaults) -> Self {
        let mut draft = Self::new(defaults);
        for entry in &record.exercises {
            for (_, rows) in draft.exercises.iter_mut() {
                if let Some(row) = rows.iter_mut().find(|row| row.name == entry.name) {
                    row.checked = true;
                    row.sets = entry.sets;
                    row.reps = entry.reps;
                }
            }
        }
        draft
    }

    #[must_use]
    pub fn exercises(&self, category: ExerciseCategory) -> &[DraftExercise] {
        &self.exercises[category]
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.is_recurring
    }

    #[must_use]
    pub const fn recurring_weeks(&self) -> u32 {
        self.recurring_weeks
    }

    #[must_use]
    pub fn is_expanded(&self, category: ExerciseCategory) -> bool {
        self.expanded[category]
    }

    #[must_use]
    pub const fn focused_category(&self) -> Option<ExerciseCategory> {
        self.focused_category
    }

    /// The checked exercises in catalog order.
    #[must_use]
    pub fn selected(&self) -> Vec<ExerciseEntry> {
        self.exercises
            .values()
            .flatten()
            .filter(|row| row.checked)
            .map(|row| ExerciseEntry::new(row.name, row.sets, row.reps))
            .collect()
    }

    #[must_use]
    pub fn checked_count(&self, category: ExerciseCategory) -> usize {
        self.exercises[category].iter().filter(|r| r.checked).count()
    }

    fn row_mut(
        &mut self,
        category: ExerciseCategory,
        index: usize,
    ) -> Result<&mut DraftExercise, FormError> {
        self.exercises[category]
            .get_mut(index)
            .ok_or(FormError::UnknownExercise { category, index })
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Closed,
    OpenForCreate { date: NaiveDate, draft: FormDraft },
    OpenForEdit { record: WorkoutRecord, draft: FormDraft },
}

/// The store mutation a valid submit asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(Vec<NewWorkout>),
    Update {
        id: WorkoutId,
        exercises: Vec<ExerciseEntry>,
    },
}

/// Parses user input for a numeric field, accepting integers from 1 up to
/// the field's maximum.
pub fn parse_positive(field: NumericField, input: &str) -> Result<u32, FormError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(value) if (1..=field.max()).contains(&value) => Ok(value),
        _ => Err(FormError::InvalidNumber {
            field,
            input: trimmed.to_string(),
        }),
    }
}

/// `start` followed by one date per week for `weeks` weeks.
pub fn recurrence_dates(start: NaiveDate, weeks: u32) -> Result<Vec<NaiveDate>, FormError> {
    if weeks > MAX_RECURRING_WEEKS {
        return Err(FormError::InvalidNumber {
            field: NumericField::RecurringWeeks,
            input: weeks.to_string(),
        });
    }
    (0..=u64::from(weeks))
        .map(|week| {
            start
                .checked_add_days(Days::new(week * 7))
                .ok_or(FormError::DateOutOfRange { start, weeks })
        })
        .collect()
}

fn step(field: NumericField, value: u32, delta: i64) -> u32 {
    let stepped = i64::from(value)
        .saturating_add(delta)
        .clamp(1, i64::from(field.max()));
    u32::try_from(stepped).unwrap_or(1)
}

/// The create/edit form state machine.
///
/// `Closed -> OpenForCreate | OpenForEdit -> Closed`. A fresh draft is built
/// every time the form opens, so closing always discards what was entered.
#[derive(Debug, Clone)]
pub struct WorkoutForm {
    state: FormState,
    defaults: DraftDefaults,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self::new(DraftDefaults::default())
    }
}

impl WorkoutForm {
    #[must_use]
    pub const fn new(defaults: DraftDefaults) -> Self {
        Self {
            state: FormState::Closed,
            defaults,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn defaults(&self) -> DraftDefaults {
        self.defaults
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, FormState::OpenForEdit { .. })
    }

    #[must_use]
    pub const fn title(&self) -> Option<&'static str> {
        match self.state {
            FormState::Closed => None,
            FormState::OpenForCreate { .. } => Some("Add Workout Session"),
            FormState::OpenForEdit { .. } => Some("Edit Workout Session"),
        }
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match &self.state {
            FormState::Closed => None,
            FormState::OpenForCreate { date, .. } => Some(*date),
            FormState::OpenForEdit { record, .. } => Some(record.date),
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&FormDraft> {
        match &self.state {
            FormState::Closed => None,
            FormState::OpenForCreate { draft, .. } | FormState::OpenForEdit { draft, .. } => {
                Some(draft)
            }
        }
    }

    fn draft_mut(&mut self) -> Result<&mut FormDraft, FormError> {
        match &mut self.state {
            FormState::Closed => Err(FormError::NotOpen),
            FormState::OpenForCreate { draft, .. } | FormState::OpenForEdit { draft, .. } => {
                Ok(draft)
            }
        }
    }

    pub fn open_create(&mut self, date: NaiveDate) {
        debug!(%date, "opening workout form for a new date");
        self.state = FormState::OpenForCreate {
            date,
            draft: FormDraft::new(self.defaults),
        };
    }

    pub fn open_edit(&mut self, record: &WorkoutRecord) {
        debug!(id = %record.id, date = %record.date, "opening workout form for edit");
        self.state = FormState::OpenForEdit {
            record: record.clone(),
            draft: FormDraft::for_record(record, self.defaults),
        };
    }

    /// Closes the form and throws the draft away.
    /// Returns `false` if it was already closed.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = FormState::Closed;
        was_open
    }

    /// Flips the checkbox of one exercise and returns its new value.
    pub fn toggle_checked(
        &mut self,
        category: ExerciseCategory,
        index: usize,
    ) -> Result<bool, FormError> {
        let row = self.draft_mut()?.row_mut(category, index)?;
        row.checked = !row.checked;
        Ok(row.checked)
    }

    pub fn set_sets(
        &mut self,
        category: ExerciseCategory,
        index: usize,
        input: &str,
    ) -> Result<u32, FormError> {
        let value = parse_positive(NumericField::Sets, input).inspect_err(|e| warn!("{e}"))?;
        self.draft_mut()?.row_mut(category, index)?.sets = value;
        Ok(value)
    }

    pub fn set_reps(
        &mut self,
        category: ExerciseCategory,
        index: usize,
        input: &str,
    ) -> Result<u32, FormError> {
        let value = parse_positive(NumericField::Reps, input).inspect_err(|e| warn!("{e}"))?;
        self.draft_mut()?.row_mut(category, index)?.reps = value;
        Ok(value)
    }

    /// Moves the sets of one exercise by `delta`, staying between 1 and the
    /// field's maximum.
    pub fn adjust_sets(
        &mut self,
        category: ExerciseCategory,
        index: usize,
        delta: i64,
    ) -> Result<u32, FormError> {
        let row = self.draft_mut()?.row_mut(category, index)?;
        row.sets = step(NumericField::Sets, row.sets, delta);
        Ok(row.sets)
    }

    pub fn adjust_reps(
        &mut self,
        category: ExerciseCategory,
        index: usize,
        delta: i64,
    ) -> Result<u32, FormError> {
        let row = self.draft_mut()?.row_mut(category, index)?;
        row.reps = step(NumericField::Reps, row.reps, delta);
        Ok(row.reps)
    }

    pub fn toggle_recurring(&mut self) -> Result<bool, FormError> {
        let draft = self.draft_mut()?;
        draft.is_recurring = !draft.is_recurring;
        Ok(draft.is_recurring)
    }

    pub fn set_recurring_weeks(&mut self, input: &str) -> Result<u32, FormError> {
        let weeks =
            parse_positive(NumericField::RecurringWeeks, input).inspect_err(|e| warn!("{e}"))?;
        self.draft_mut()?.recurring_weeks = weeks;
        Ok(weeks)
    }

    pub fn adjust_recurring_weeks(&mut self, delta: i64) -> Result<u32, FormError> {
        let draft = self.draft_mut()?;
        draft.recurring_weeks =
            step(NumericField::RecurringWeeks, draft.recurring_weeks, delta);
        Ok(draft.recurring_weeks)
    }

    /// Expands or collapses a category and returns whether it is now expanded.
    pub fn toggle_category(&mut self, category: ExerciseCategory) -> Result<bool, FormError> {
        let draft = self.draft_mut()?;
        draft.expanded[category] = !draft.expanded[category];
        Ok(draft.expanded[category])
    }

    pub fn focus_category(&mut self, category: ExerciseCategory) -> Result<(), FormError> {
        self.draft_mut()?.focused_category = Some(category);
        Ok(())
    }

    pub fn blur(&mut self) -> Result<(), FormError> {
        self.draft_mut()?.focused_category = None;
        Ok(())
    }

    /// Validates the draft and turns it into a store mutation.
    ///
    /// On success the form is closed. On failure nothing changes and the
    /// form stays open.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let submission = match &self.state {
            FormState::Closed => return Err(FormError::NotOpen),
            FormState::OpenForCreate { date, draft } => {
                let selected = Self::checked_exercises(draft)?;
                let dates = if draft.is_recurring {
                    recurrence_dates(*date, draft.recurring_weeks)?
                } else {
                    vec![*date]
                };
                Submission::Create(
                    dates
                        .into_iter()
                        .map(|date| NewWorkout {
                            date,
                            exercises: selected.clone(),
                        })
                        .collect(),
                )
            }
            // Recurrence only applies when creating.
            FormState::OpenForEdit { record, draft } => Submission::Update {
                id: record.id,
                exercises: Self::checked_exercises(draft)?,
            },
        };
        self.state = FormState::Closed;
        Ok(submission)
    }

    fn checked_exercises(draft: &FormDraft) -> Result<Vec<ExerciseEntry>, FormError> {
        let selected = draft.selected();
        if selected.is_empty() {
            warn!("workout form submitted without any exercise");
            return Err(FormError::NoExerciseSelected);
        }
        Ok(selected)
    }
}
