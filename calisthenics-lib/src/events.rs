//src/events.rs
use crate::store::{WorkoutId, WorkoutRecord};
use chrono::NaiveDate;

/// A workout as the calendar displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: WorkoutId,
    pub title: String,
    pub date: NaiveDate,
    pub is_all_day: bool,
}

impl From<&WorkoutRecord> for CalendarEvent {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            id: record.id,
            title: record.title(),
            date: record.date,
            is_all_day: true,
        }
    }
}

/// Projects every record into a display event, keeping store order.
#[must_use]
pub fn project_events(records: &[WorkoutRecord]) -> Vec<CalendarEvent> {
    records.iter().map(CalendarEvent::from).collect()
}
