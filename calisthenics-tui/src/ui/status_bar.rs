// calisthenics-tui/src/ui/status_bar.rs
use crate::app::{ActiveModal, ActiveTab, App};
use calisthenics_lib::View;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

fn status_text(app: &App) -> &'static str {
    if app.active_modal == ActiveModal::Help {
        return " [Esc/Enter/?] Close Help ";
    }
    match app.service.controller.view() {
        View::Form(_) => {
            " [Esc] Cancel | [Ctrl-S] Save | [Tab/↑↓] Navigate | [Space] Toggle | [+/-] Inc/Dec Number "
        }
        View::Details(_) => " [e/Enter] Edit | [d/Del] Delete | [Esc] Close ",
        View::Calendar => match app.active_tab {
            ActiveTab::Calendar => {
                "[←→/hl] Day | [↑↓/jk] Week | [PgUp/PgDn] Month | [t]oday | [Enter] Open | [?] Help | [Q]uit "
            }
            ActiveTab::Agenda => "[↑↓/jk] Nav | [Enter] Details | [g]o to date | [?] Help | [Q]uit ",
        },
    }
}

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let error_text = app.last_error.as_deref().unwrap_or("");

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(80), Constraint::Percentage(20)])
        .split(area);

    let status_paragraph = Paragraph::new(status_text(app))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status_paragraph, status_chunks[0]);

    let error_paragraph = Paragraph::new(error_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::Red))
        .alignment(Alignment::Right);
    f.render_widget(error_paragraph, status_chunks[1]);
}
