// calisthenics-tui/src/app/modals.rs
mod workout_form;

use super::state::{ActiveModal, App};
use calisthenics_lib::{ClickOutcome, WorkoutId};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

pub use workout_form::handle_workout_form_input;

pub fn handle_help_modal_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
            app.active_modal = ActiveModal::None;
        }
        _ => {} // Ignore other keys in help
    }
}

pub fn handle_details_input(app: &mut App, workout_id: WorkoutId, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => {
            if app.service.controller.on_edit_requested(workout_id) {
                workout_form::focus_first_field(app);
            } else {
                app.set_error(format!("Workout {workout_id} no longer exists"));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(removed) = app.service.controller.on_delete_requested(workout_id) {
                info!(id = %removed.id, date = %removed.date, "workout deleted");
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => app.service.controller.close_details(),
        _ => {}
    }
}

/// Opens the form or the details for the date under the calendar cursor.
pub fn activate_cursor_date(app: &mut App) {
    if app.service.controller.on_date_click(app.cursor_date) == ClickOutcome::OpenedForm {
        workout_form::focus_first_field(app);
    }
}
