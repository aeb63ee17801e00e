// calisthenics-tui/src/ui.rs
mod agenda_tab;
mod calendar_tab;
mod layout;
mod modals;
mod status_bar;

pub use layout::render_ui;

use calisthenics_lib::StandardColor;
use ratatui::style::Color;

// Maps the configured theme colors onto the terminal palette. The "dark"
// config names are the base ANSI colors; the plain names are the bright ones.
pub(crate) const fn to_color(color: StandardColor) -> Color {
    match color {
        StandardColor::Black => Color::Black,
        StandardColor::Red => Color::LightRed,
        StandardColor::Green => Color::LightGreen,
        StandardColor::Yellow => Color::LightYellow,
        StandardColor::Blue => Color::LightBlue,
        StandardColor::Magenta => Color::LightMagenta,
        StandardColor::Cyan => Color::LightCyan,
        StandardColor::White => Color::White,
        StandardColor::DarkGrey => Color::DarkGray,
        StandardColor::DarkRed => Color::Red,
        StandardColor::DarkGreen => Color::Green,
        StandardColor::DarkYellow => Color::Yellow,
        StandardColor::DarkBlue => Color::Blue,
        StandardColor::DarkMagenta => Color::Magenta,
        StandardColor::DarkCyan => Color::Cyan,
        StandardColor::Grey => Color::Gray,
    }
}
