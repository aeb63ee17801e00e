// calisthenics-tui/src/app/navigation_helpers.rs
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use ratatui::widgets::ListState;

pub fn list_next(state: &mut ListState, list_len: usize) {
    if list_len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if i >= list_len - 1 => 0,
        Some(i) => i + 1,
        None => 0,
    };
    state.select(Some(i));
}

pub fn list_previous(state: &mut ListState, list_len: usize) {
    if list_len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(0) => list_len - 1,
        Some(i) => i - 1,
        None => list_len.saturating_sub(1),
    };
    state.select(Some(i));
}

/// Moves a date by whole days, staying put at the edge of the date range.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    };
    shifted.unwrap_or(date)
}

/// Moves a date by whole months; the day is clamped to the target month.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let delta = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    };
    shifted.unwrap_or(date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First cell of a six-week month grid whose columns begin on `week_start`.
pub fn month_grid_start(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let first = first_of_month(date);
    let offset = match week_start {
        Weekday::Sun => first.weekday().num_days_from_sunday(),
        _ => first.weekday().num_days_from_monday(),
    };
    shift_days(first, -i64::from(offset))
}
