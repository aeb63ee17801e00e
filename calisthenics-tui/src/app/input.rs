// src/app/input.rs
use super::{
    modals::{
        activate_cursor_date, handle_details_input, handle_help_modal_input,
        handle_workout_form_input,
    },
    navigation_helpers::{first_of_month, list_next, list_previous, shift_days, shift_months},
    state::{ActiveModal, ActiveTab, App},
};
use anyhow::Result;
use calisthenics_lib::View;
use crossterm::event::{KeyCode, KeyEvent};

// Main key event handler method on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Handle based on active modal first
        if self.active_modal == ActiveModal::Help {
            handle_help_modal_input(self, key);
            return Ok(());
        }

        // Then whichever panel the controller has open
        let details_id = match self.service.controller.view() {
            View::Form(_) => return handle_workout_form_input(self, key),
            View::Details(record) => Some(record.id),
            View::Calendar => None,
        };
        if let Some(id) = details_id {
            handle_details_input(self, id, key);
            return Ok(());
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            KeyCode::F(1) => self.active_tab = ActiveTab::Calendar,
            KeyCode::F(2) => self.active_tab = ActiveTab::Agenda,
            KeyCode::Tab => {
                self.active_tab = match self.active_tab {
                    ActiveTab::Calendar => ActiveTab::Agenda,
                    ActiveTab::Agenda => ActiveTab::Calendar,
                }
            }
            _ => {
                // Delegate to tab-specific handler
                match self.active_tab {
                    ActiveTab::Calendar => self.handle_calendar_input(key),
                    ActiveTab::Agenda => self.handle_agenda_input(key),
                }
            }
        }
        Ok(())
    }

    // --- Tab-Specific Input Handling ---
    fn handle_calendar_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
            KeyCode::PageUp | KeyCode::Char('[') => {
                self.cursor_date = shift_months(self.cursor_date, -1);
            }
            KeyCode::PageDown | KeyCode::Char(']') => {
                self.cursor_date = shift_months(self.cursor_date, 1);
            }
            KeyCode::Home => self.cursor_date = first_of_month(self.cursor_date),
            KeyCode::Char('t') => self.cursor_date = self.today,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('a') => {
                activate_cursor_date(self);
            }
            _ => {}
        }
    }

    fn handle_agenda_input(&mut self, key: KeyEvent) {
        let len = self.service.controller.store().len();
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => list_previous(&mut self.agenda_list_state, len),
            KeyCode::Char('j') | KeyCode::Down => list_next(&mut self.agenda_list_state, len),
            KeyCode::Enter => {
                if let Some(id) = self.selected_agenda_workout() {
                    // Same path a click on the calendar event takes
                    self.service.controller.on_event_click(&id.to_string());
                }
            }
            KeyCode::Char('g') => {
                let date = self
                    .selected_agenda_workout()
                    .and_then(|id| self.service.controller.store().find_by_id(id))
                    .map(|record| record.date);
                if let Some(date) = date {
                    self.cursor_date = date;
                    self.active_tab = ActiveTab::Calendar;
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, days: i64) {
        self.cursor_date = shift_days(self.cursor_date, days);
    }
}
