// calisthenics-tui/src/ui/modals.rs
mod workout;

use crate::{
    app::{ActiveModal, App},
    ui::{layout::centered_rect, to_color},
};
use calisthenics_lib::{group_by_category, View, WorkoutRecord};
use ratatui::{
    layout::Margin,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_modal(f: &mut Frame, app: &App) {
    match app.service.controller.view() {
        View::Form(_) => workout::render_workout_form(f, app),
        View::Details(record) => render_details_modal(f, app, record),
        View::Calendar => {}
    }
    if app.active_modal == ActiveModal::Help {
        render_help_modal(f);
    }
}

fn render_help_modal(f: &mut Frame) {
    let block = Block::default()
        .title("Help (?)")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 70, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text = vec![
        Line::from("--- Global ---").style(Style::new().bold().underlined()),
        Line::from(" Q: Quit Application"),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(" F1/F2 or Tab: Switch Tabs"),
        Line::from(""),
        Line::from("--- Calendar Tab (F1) ---").style(Style::new().bold().underlined()),
        Line::from(" h/l / ←/→: Previous/Next Day"),
        Line::from(" k/j / ↑/↓: Previous/Next Week"),
        Line::from(" PgUp/PgDown or [/]: Previous/Next Month"),
        Line::from(" Home: First Day of Month, t: Today"),
        Line::from(" Enter / Space / a: Add a workout, or show the one scheduled"),
        Line::from(""),
        Line::from("--- Agenda Tab (F2) ---").style(Style::new().bold().underlined()),
        Line::from(" k/j / ↑/↓: Navigate Workouts"),
        Line::from(" Enter: Show Workout Details"),
        Line::from(" g: Go to the Workout's Day in the Calendar"),
        Line::from(""),
        Line::from("--- Workout Details ---").style(Style::new().bold().underlined()),
        Line::from(" e / Enter: Edit, d / Delete: Delete, Esc: Close"),
        Line::from(""),
        Line::from("--- Workout Form ---").style(Style::new().bold().underlined()),
        Line::from(" Tab/↓ and Shift-Tab/↑: Move Between Fields"),
        Line::from(" Space / Enter: Expand Category, Check Exercise, Toggle Repeat"),
        Line::from(" 0-9, Backspace: Type a Number; +/- or ←/→: Step It"),
        Line::from(" Ctrl-S: Save, Esc: Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc, ?, or Enter to close ",
            Style::new().italic().yellow(),
        )),
    ];

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: false });
    f.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn render_details_modal(f: &mut Frame, app: &App, record: &WorkoutRecord) {
    let block = Block::default()
        .title(format!("Workout of {}", record.date.format("%A, %B %-d, %Y")))
        .borders(Borders::ALL)
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let header_style = Style::new().fg(to_color(app.header_color)).bold();
    let mut lines = Vec::new();
    for group in group_by_category(&record.exercises) {
        lines.push(Line::styled(group.category.to_string(), header_style));
        lines.extend(
            group
                .exercises
                .iter()
                .map(|entry| Line::from(format!("  {entry}"))),
        );
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " [e] Edit   [d] Delete   [Esc] Close ",
        Style::new().italic().yellow(),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 2,
        }),
    );
}
