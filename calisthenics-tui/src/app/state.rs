// calisthenics-tui/src/app/state.rs
use calisthenics_lib::{
    CalendarEvent, ExerciseCategory, StandardColor, TrackerService, WorkoutId,
};
use chrono::{Local, NaiveDate};
use ratatui::widgets::ListState;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

// Represents the active UI tab
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Calendar,
    Agenda,
}

/// Focusable parts of the workout form, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Category(ExerciseCategory),
    Exercise {
        category: ExerciseCategory,
        index: usize,
    },
    Sets {
        category: ExerciseCategory,
        index: usize,
    },
    Reps {
        category: ExerciseCategory,
        index: usize,
    },
    Recurring,
    Weeks,
    Save,
    Cancel,
}

impl FormField {
    pub const fn category(self) -> Option<ExerciseCategory> {
        match self {
            Self::Category(category)
            | Self::Exercise { category, .. }
            | Self::Sets { category, .. }
            | Self::Reps { category, .. } => Some(category),
            Self::Recurring | Self::Weeks | Self::Save | Self::Cancel => None,
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Sets { .. } | Self::Reps { .. } | Self::Weeks)
    }
}

// Modals owned by the shell. The workout form and the details panel are
// driven by the controller in the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveModal {
    None,
    Help,
}

// Holds the application state
pub struct App {
    pub service: TrackerService,
    pub active_tab: ActiveTab,
    pub should_quit: bool,
    pub active_modal: ActiveModal,
    pub last_error: Option<String>, // For status bar errors
    pub error_clear_time: Option<Instant>,
    pub header_color: StandardColor,
    pub event_color: StandardColor,

    // === Calendar Tab State ===
    pub today: NaiveDate,
    pub cursor_date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    events_stale: Rc<Cell<bool>>,

    // === Agenda Tab State ===
    pub agenda_list_state: ListState,

    // === Workout Form State ===
    pub form_focus: FormField,
    pub numeric_input: Option<String>, // Digits typed into the focused number field
    pub form_error: Option<String>,
}

impl App {
    pub fn new(mut service: TrackerService, start_date: NaiveDate) -> Self {
        let events_stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&events_stale);
        service
            .controller
            .store_mut()
            .subscribe(move |_, _| flag.set(true));

        let (header_color, event_color, theme_error) = match service.theme_colors() {
            Ok((header, event)) => (header, event, None),
            Err(e) => {
                warn!("falling back to default colors: {e}");
                (StandardColor::Green, StandardColor::Blue, Some(e.to_string()))
            }
        };

        let mut app = App {
            service,
            active_tab: ActiveTab::Calendar,
            should_quit: false,
            active_modal: ActiveModal::None,
            last_error: None,
            error_clear_time: None,
            header_color,
            event_color,
            today: Local::now().date_naive(),
            cursor_date: start_date,
            events: Vec::new(),
            events_stale,
            agenda_list_state: ListState::default(),
            form_focus: FormField::Category(ExerciseCategory::Push),
            numeric_input: None,
            form_error: None,
        };
        if let Some(msg) = theme_error {
            app.set_error(msg);
        }
        app.agenda_list_state.select(Some(0));
        app
    }

    // Method to set status bar errors
    pub fn set_error(&mut self, msg: String) {
        self.last_error = Some(msg);
        self.error_clear_time = Some(Instant::now() + STATUS_TIMEOUT);
    }

    // Method to clear expired error messages (called in refresh_data)
    pub(crate) fn clear_expired_error(&mut self) {
        if let Some(clear_time) = self.error_clear_time {
            if Instant::now() >= clear_time {
                self.last_error = None;
                self.error_clear_time = None;
            }
        }
    }

    /// Re-projects calendar events after the store has changed.
    pub fn refresh_data(&mut self) {
        self.clear_expired_error();
        self.today = Local::now().date_naive();
        if self.events_stale.replace(false) {
            self.events = self.service.controller.events();
            let len = self.service.controller.store().len();
            match self.agenda_list_state.selected() {
                _ if len == 0 => self.agenda_list_state.select(None),
                Some(i) if i >= len => self.agenda_list_state.select(Some(len - 1)),
                None => self.agenda_list_state.select(Some(0)),
                Some(_) => {}
            }
        }
    }

    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter().filter(move |e| e.date == date)
    }

    /// Id of the workout highlighted in the agenda list.
    pub fn selected_agenda_workout(&self) -> Option<WorkoutId> {
        let index = self.agenda_list_state.selected()?;
        self.service
            .controller
            .store()
            .sorted_by_date()
            .get(index)
            .map(|record| record.id)
    }

    pub(crate) fn reset_form_focus(&mut self) {
        self.form_focus = FormField::Category(ExerciseCategory::Push);
        self.numeric_input = None;
        self.form_error = None;
    }
}
