// calisthenics-tui/src/ui/modals/workout.rs
use crate::{
    app::{App, FormField},
    ui::{layout::centered_rect, to_color},
};
use calisthenics_lib::{ExerciseCategory, FormDraft};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().reversed()
    } else {
        Style::default()
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Text of a number field, showing the typed digits while it has focus.
fn number_text(app: &App, field: FormField, stored: u32) -> String {
    match &app.numeric_input {
        Some(input) if app.form_focus == field && field.is_numeric() => format!("{input}_"),
        _ => stored.to_string(),
    }
}

fn category_lines(
    app: &App,
    draft: &FormDraft,
    category: ExerciseCategory,
    lines: &mut Vec<Line<'static>>,
    focus_line: &mut usize,
) {
    let header_field = FormField::Category(category);
    if app.form_focus == header_field {
        *focus_line = lines.len();
    }
    let expanded = draft.is_expanded(category);
    let marker = if expanded { "▾" } else { "▸" };
    let mut header = vec![Span::styled(
        format!("{marker} {category}"),
        focus_style(app.form_focus == header_field)
            .fg(to_color(app.header_color))
            .add_modifier(Modifier::BOLD),
    )];
    let checked = draft.checked_count(category);
    if checked > 0 {
        header.push(Span::styled(
            format!("  ({checked} selected)"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(header));

    if !expanded {
        return;
    }
    for (index, row) in draft.exercises(category).iter().enumerate() {
        let exercise = FormField::Exercise { category, index };
        let sets = FormField::Sets { category, index };
        let reps = FormField::Reps { category, index };
        if [exercise, sets, reps].contains(&app.form_focus) {
            *focus_line = lines.len();
        }

        let mut spans = vec![
            Span::raw("    "),
            Span::styled(
                format!("{} {:<18}", checkbox(row.checked), row.name),
                focus_style(app.form_focus == exercise),
            ),
        ];
        if row.checked {
            spans.push(Span::raw("  Sets: "));
            spans.push(Span::styled(
                format!(" {} ", number_text(app, sets, row.sets)),
                focus_style(app.form_focus == sets),
            ));
            spans.push(Span::raw("  Reps: "));
            spans.push(Span::styled(
                format!(" {} ", number_text(app, reps, row.reps)),
                focus_style(app.form_focus == reps),
            ));
        }
        lines.push(Line::from(spans));
    }
}

pub(super) fn render_workout_form(f: &mut Frame, app: &App) {
    let form = app.service.controller.form();
    let (Some(draft), Some(date), Some(title)) = (form.draft(), form.date(), form.title()) else {
        return;
    };

    let block = Block::default()
        .title(format!("{title} ({})", date.format("%a %Y-%m-%d")))
        .borders(Borders::ALL)
        .border_style(Style::new().yellow());
    let area = centered_rect(70, 80, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = area.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Categories and recurrence
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Error
        ])
        .split(inner_area);

    let mut lines = Vec::new();
    let mut focus_line = 0;
    for category in ExerciseCategory::ALL {
        category_lines(app, draft, category, &mut lines, &mut focus_line);
    }

    // Recurrence only applies to new sessions
    if !form.is_editing() {
        lines.push(Line::from(""));
        if app.form_focus == FormField::Recurring {
            focus_line = lines.len();
        }
        lines.push(Line::from(Span::styled(
            format!("{} Repeat every week", checkbox(draft.is_recurring())),
            focus_style(app.form_focus == FormField::Recurring),
        )));
        if draft.is_recurring() {
            if app.form_focus == FormField::Weeks {
                focus_line = lines.len();
            }
            lines.push(Line::from(vec![
                Span::raw("    Number of weeks: "),
                Span::styled(
                    format!(
                        " {} ",
                        number_text(app, FormField::Weeks, draft.recurring_weeks())
                    ),
                    focus_style(app.form_focus == FormField::Weeks),
                ),
            ]));
        }
    }

    // Keep the focused line on screen
    let visible = usize::from(chunks[0].height);
    let scroll = (focus_line + 1).saturating_sub(visible);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[0]);

    let button_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    let save_button = Paragraph::new(" Save ")
        .alignment(ratatui::layout::Alignment::Center)
        .style(focus_style(app.form_focus == FormField::Save));
    f.render_widget(save_button, button_layout[0]);
    let cancel_button = Paragraph::new(" Cancel ")
        .alignment(ratatui::layout::Alignment::Center)
        .style(focus_style(app.form_focus == FormField::Cancel));
    f.render_widget(cancel_button, button_layout[1]);

    if let Some(err) = &app.form_error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            chunks[3],
        );
    }
}
