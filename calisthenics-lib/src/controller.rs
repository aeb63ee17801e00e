//src/controller.rs
use crate::events::{project_events, CalendarEvent};
use crate::form::{DraftDefaults, FormError, Submission, WorkoutForm};
use crate::store::{WorkoutId, WorkoutRecord, WorkoutStore};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),
}

/// Parses a date coming from the calendar. Accepts `YYYY-MM-DD` or an ISO
/// date-time, in which case only the date part is kept.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, InputError> {
    let trimmed = input.trim();
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(trimmed.to_string()))
}

/// What a click on the calendar led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    OpenedForm,
    ShowedDetails(WorkoutId),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Vec<WorkoutId>),
    Updated(WorkoutId),
    /// The workout being edited no longer exists; nothing was saved.
    Missing(WorkoutId),
}

/// What the shell should currently show on top of the calendar.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Calendar,
    Details(&'a WorkoutRecord),
    Form(&'a WorkoutForm),
}

/// Routes calendar signals to the form and the store.
///
/// Only one of the form or the details panel is open at a time; clicks on
/// the calendar are ignored while either is showing. Lookups that find
/// nothing are no-ops.
#[derive(Debug, Default)]
pub struct InteractionController {
    store: WorkoutStore,
    form: WorkoutForm,
    details: Option<WorkoutId>,
}

impl InteractionController {
    #[must_use]
    pub fn new(defaults: DraftDefaults) -> Self {
        Self::with_store(WorkoutStore::new(), defaults)
    }

    #[must_use]
    pub fn with_store(store: WorkoutStore, defaults: DraftDefaults) -> Self {
        Self {
            store,
            form: WorkoutForm::new(defaults),
            details: None,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &WorkoutStore {
        &self.store
    }

    /// Mutable store access, for subscribing to changes.
    pub fn store_mut(&mut self) -> &mut WorkoutStore {
        &mut self.store
    }

    #[must_use]
    pub const fn form(&self) -> &WorkoutForm {
        &self.form
    }

    /// The form, for editing the open draft.
    pub fn form_mut(&mut self) -> &mut WorkoutForm {
        &mut self.form
    }

    /// The record shown in the details panel, if it still exists.
    #[must_use]
    pub fn details(&self) -> Option<&WorkoutRecord> {
        self.details.and_then(|id| self.store.find_by_id(id))
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        if self.form.is_open() {
            View::Form(&self.form)
        } else if let Some(record) = self.details() {
            View::Details(record)
        } else {
            View::Calendar
        }
    }

    #[must_use]
    pub fn events(&self) -> Vec<CalendarEvent> {
        project_events(self.store.records())
    }

    fn is_busy(&self) -> bool {
        self.form.is_open() || self.details().is_some()
    }

    /// Shows the workout of `date` if there is one, otherwise opens the
    /// form to create one.
    pub fn on_date_click(&mut self, date: NaiveDate) -> ClickOutcome {
        if self.is_busy() {
            debug!(%date, "date click ignored while a panel is open");
            return ClickOutcome::Ignored;
        }
        if let Some(record) = self.store.find_by_date(date) {
            let id = record.id;
            self.details = Some(id);
            ClickOutcome::ShowedDetails(id)
        } else {
            self.form.open_create(date);
            ClickOutcome::OpenedForm
        }
    }

    /// Shows the details of the workout behind a calendar event.
    pub fn on_event_click(&mut self, id: &str) -> ClickOutcome {
        if self.is_busy() {
            return ClickOutcome::Ignored;
        }
        let Ok(id) = id.parse::<WorkoutId>() else {
            debug!(id, "event click with an unreadable id");
            return ClickOutcome::Ignored;
        };
        match self.store.find_by_id(id) {
            Some(record) => {
                self.details = Some(record.id);
                ClickOutcome::ShowedDetails(record.id)
            }
            None => {
                debug!(%id, "event click for a missing workout");
                ClickOutcome::Ignored
            }
        }
    }

    /// Closes the details panel and opens the form pre-filled with the
    /// workout. Returns `false` if the workout is gone.
    pub fn on_edit_requested(&mut self, id: WorkoutId) -> bool {
        let Some(record) = self.store.find_by_id(id) else {
            debug!(%id, "edit requested for a missing workout");
            return false;
        };
        self.form.open_edit(record);
        self.details = None;
        true
    }

    pub fn on_delete_requested(&mut self, id: WorkoutId) -> Option<WorkoutRecord> {
        self.details = None;
        self.store.remove(id)
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    /// Submits the open form and applies the result to the store.
    ///
    /// A date holds at most one workout: recurring dates that already have
    /// one are skipped.
    pub fn submit_form(&mut self) -> Result<SubmitOutcome, FormError> {
        match self.form.submit()? {
            Submission::Create(workouts) => {
                let (fresh, taken): (Vec<_>, Vec<_>) = workouts
                    .into_iter()
                    .partition(|workout| self.store.find_by_date(workout.date).is_none());
                for workout in &taken {
                    debug!(date = %workout.date, "date already has a workout, skipped");
                }
                Ok(SubmitOutcome::Created(self.store.add(fresh)))
            }
            Submission::Update { id, exercises } => {
                if self.store.update(id, exercises) {
                    Ok(SubmitOutcome::Updated(id))
                } else {
                    debug!(%id, "edited workout was deleted before saving");
                    Ok(SubmitOutcome::Missing(id))
                }
            }
        }
    }

    pub fn cancel_form(&mut self) -> bool {
        self.form.cancel()
    }

    /// Escape closes whichever panel is open. Returns `false` if none was.
    pub fn on_escape(&mut self) -> bool {
        if self.form.cancel() {
            return true;
        }
        self.details.take().is_some()
    }
}
