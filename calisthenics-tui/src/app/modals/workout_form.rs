// calisthenics-tui/src/app/modals/workout_form.rs
use crate::app::state::{App, FormField};
use anyhow::Result;
use calisthenics_lib::{ExerciseCategory, FormDraft, FormError, SubmitOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

/// The focusable fields of the form in display order. Exercises only show
/// when their category is expanded, sets/reps only when checked, and the
/// recurrence controls only when creating.
pub fn form_fields(draft: &FormDraft, editing: bool) -> Vec<FormField> {
    let mut fields = Vec::new();
    for category in ExerciseCategory::ALL {
        fields.push(FormField::Category(category));
        if !draft.is_expanded(category) {
            continue;
        }
        for (index, row) in draft.exercises(category).iter().enumerate() {
            fields.push(FormField::Exercise { category, index });
            if row.checked {
                fields.push(FormField::Sets { category, index });
                fields.push(FormField::Reps { category, index });
            }
        }
    }
    if !editing {
        fields.push(FormField::Recurring);
        if draft.is_recurring() {
            fields.push(FormField::Weeks);
        }
    }
    fields.push(FormField::Save);
    fields.push(FormField::Cancel);
    fields
}

pub(crate) fn focus_first_field(app: &mut App) {
    app.reset_form_focus();
    sync_focused_category(app);
}

// Mirrors the shell's focus into the draft so the focused category is
// part of the form state.
fn sync_focused_category(app: &mut App) {
    let form = app.service.controller.form_mut();
    let result = match app.form_focus.category() {
        Some(category) => form.focus_category(category),
        None => form.blur(),
    };
    if let Err(e) = result {
        debug!("focus not synced: {e}");
    }
}

// Current stored value of the focused number field
fn focused_value(app: &App) -> Option<u32> {
    let form = app.service.controller.form();
    let draft = form.draft()?;
    match app.form_focus {
        FormField::Sets { category, index } => {
            draft.exercises(category).get(index).map(|row| row.sets)
        }
        FormField::Reps { category, index } => {
            draft.exercises(category).get(index).map(|row| row.reps)
        }
        FormField::Weeks => Some(draft.recurring_weeks()),
        _ => None,
    }
}

/// Applies typed digits to the draft. Returns `false` if they were rejected.
fn commit_numeric_input(app: &mut App) -> bool {
    let Some(input) = app.numeric_input.take() else {
        return true;
    };
    let form = app.service.controller.form_mut();
    let result = match app.form_focus {
        FormField::Sets { category, index } => form.set_sets(category, index, &input),
        FormField::Reps { category, index } => form.set_reps(category, index, &input),
        FormField::Weeks => form.set_recurring_weeks(&input),
        _ => return true,
    };
    record_result(app, result)
}

fn record_result<T>(app: &mut App, result: Result<T, FormError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            app.form_error = Some(e.to_string());
            false
        }
    }
}

fn adjust_focused(app: &mut App, delta: i64) {
    if !commit_numeric_input(app) {
        return;
    }
    let form = app.service.controller.form_mut();
    let result = match app.form_focus {
        FormField::Sets { category, index } => form.adjust_sets(category, index, delta),
        FormField::Reps { category, index } => form.adjust_reps(category, index, delta),
        FormField::Weeks => form.adjust_recurring_weeks(delta),
        _ => return,
    };
    record_result(app, result);
}

fn move_focus(app: &mut App, fields: &[FormField], step: isize) {
    if !commit_numeric_input(app) {
        return; // Stay on the field until the value is fixed
    }
    let len = fields.len() as isize;
    let current = fields
        .iter()
        .position(|f| *f == app.form_focus)
        .unwrap_or(0) as isize;
    app.form_focus = fields[(current + step).rem_euclid(len) as usize];
    sync_focused_category(app);
}

fn submit(app: &mut App) {
    if !commit_numeric_input(app) {
        return;
    }
    match app.service.controller.submit_form() {
        Ok(SubmitOutcome::Created(ids)) => {
            info!(count = ids.len(), "workouts scheduled");
            app.reset_form_focus();
        }
        Ok(SubmitOutcome::Updated(id)) => {
            info!(%id, "workout updated");
            app.reset_form_focus();
        }
        Ok(SubmitOutcome::Missing(id)) => {
            app.reset_form_focus();
            app.set_error(format!("Workout {id} was deleted, changes not saved"));
        }
        Err(e) => app.form_error = Some(e.to_string()), // Form stays open
    }
}

fn cancel(app: &mut App) {
    app.service.controller.cancel_form();
    app.reset_form_focus();
}

fn handle_numeric_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.numeric_input.get_or_insert_with(String::new).push(c);
        }
        KeyCode::Backspace => {
            if app.numeric_input.is_none() {
                app.numeric_input = focused_value(app).map(|v| v.to_string());
            }
            if let Some(input) = app.numeric_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char('+') | KeyCode::Right => adjust_focused(app, 1),
        KeyCode::Char('-') | KeyCode::Left => adjust_focused(app, -1),
        KeyCode::Enter => {
            commit_numeric_input(app);
        }
        _ => {}
    }
}

fn handle_field_key(app: &mut App, key: KeyEvent) {
    let toggles = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
    let form = app.service.controller.form_mut();
    match app.form_focus {
        FormField::Category(category) => {
            if toggles || matches!(key.code, KeyCode::Left | KeyCode::Right) {
                let result = form.toggle_category(category);
                record_result(app, result);
            }
        }
        FormField::Exercise { category, index } => {
            if toggles {
                let result = form.toggle_checked(category, index);
                record_result(app, result);
            }
        }
        FormField::Sets { .. } | FormField::Reps { .. } | FormField::Weeks => {
            handle_numeric_key(app, key);
        }
        FormField::Recurring => {
            if toggles {
                let result = form.toggle_recurring();
                record_result(app, result);
            }
        }
        FormField::Save if key.code == KeyCode::Enter => submit(app),
        FormField::Cancel if key.code == KeyCode::Enter => cancel(app),
        FormField::Save | FormField::Cancel => {}
    }
}

pub fn handle_workout_form_input(app: &mut App, key: KeyEvent) -> Result<()> {
    let form = app.service.controller.form();
    let Some(draft) = form.draft() else {
        return Ok(());
    };
    let fields = form_fields(draft, form.is_editing());
    if !fields.contains(&app.form_focus) {
        // The focused row disappeared (collapsed category, unchecked exercise)
        app.form_focus = fields[0];
        app.numeric_input = None;
    }

    if key.code != KeyCode::Enter {
        app.form_error = None; // Clear error on input
    }

    match key.code {
        KeyCode::Esc => cancel(app),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => submit(app),
        KeyCode::Tab | KeyCode::Down => move_focus(app, &fields, 1),
        KeyCode::BackTab | KeyCode::Up => move_focus(app, &fields, -1),
        _ => handle_field_key(app, key),
    }
    Ok(())
}
