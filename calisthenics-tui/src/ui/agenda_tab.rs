// calisthenics-tui/src/ui/agenda_tab.rs
use crate::{app::App, ui::to_color};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_agenda_tab(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Scheduled Workouts")
        .border_style(Style::default().fg(Color::Yellow));

    let store = app.service.controller.store();
    if store.is_empty() {
        let hint = Paragraph::new("Nothing scheduled yet. Pick a day in the calendar (F1).")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let date_style = Style::default()
        .fg(to_color(app.header_color))
        .add_modifier(Modifier::BOLD);
    let list_items: Vec<ListItem> = store
        .sorted_by_date()
        .into_iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(record.date.format("%Y-%m-%d %a").to_string(), date_style),
                Span::raw("  "),
                Span::raw(record.title()),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.agenda_list_state);
}
