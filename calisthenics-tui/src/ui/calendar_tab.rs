// calisthenics-tui/src/ui/calendar_tab.rs
use crate::{
    app::{navigation_helpers::month_grid_start, App},
    ui::to_color,
};
use chrono::{Datelike, Days, NaiveDate};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Text},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

const GRID_WEEKS: u16 = 6;

pub fn render_calendar_tab(f: &mut Frame, app: &App, area: Rect) {
    let header_color = to_color(app.header_color);
    let scheduled = app
        .service
        .controller
        .store()
        .records_in_month(app.cursor_date.year(), app.cursor_date.month())
        .count();
    let title = match scheduled {
        0 => app.cursor_date.format(" %B %Y ").to_string(),
        1 => app.cursor_date.format(" %B %Y (1 workout) ").to_string(),
        n => format!("{}({n} workouts) ", app.cursor_date.format(" %B %Y ")),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::new().fg(header_color).bold());

    let week_start = app.service.config.week_start.weekday();
    let mut weekday = week_start;
    let header_cells = (0..7).map(|_| {
        let cell = Cell::from(weekday.to_string()).style(Style::new().fg(header_color).bold());
        weekday = weekday.succ();
        cell
    });
    let header = Row::new(header_cells).height(1).bottom_margin(0);

    // Borders take two lines, the weekday header one more
    let row_height = (area.height.saturating_sub(3) / GRID_WEEKS).max(1);
    let grid_start = month_grid_start(app.cursor_date, week_start);
    let rows = (0..u64::from(GRID_WEEKS)).map(|week| {
        let cells = (0..7).map(|day| {
            grid_start
                .checked_add_days(Days::new(week * 7 + day))
                .map_or_else(|| Cell::from(""), |date| day_cell(app, date))
        });
        Row::new(cells).height(row_height)
    });

    let widths = [Constraint::Ratio(1, 7); 7];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn day_cell(app: &App, date: NaiveDate) -> Cell<'static> {
    let in_month = date.month() == app.cursor_date.month() && date.year() == app.cursor_date.year();

    let mut number_style = Style::new();
    if !in_month {
        number_style = number_style.fg(Color::DarkGray);
    }
    if date == app.today {
        number_style = number_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let mut lines = vec![Line::styled(format!("{:>2}", date.day()), number_style)];
    let event_style = Style::new().fg(to_color(app.event_color));
    lines.extend(
        app.events_on(date)
            .map(|event| Line::styled(event.title.clone(), event_style)),
    );

    let cell = Cell::from(Text::from(lines));
    if date == app.cursor_date {
        cell.style(Style::new().reversed())
    } else {
        cell
    }
}
