//! Styling utilities and color schemes

use crate::types::Variant;
use ratatui::style::{Color, Modifier, Style};

/// Spinner frames, advanced by the app loop
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn unfocused_border() -> Color {
    Color::DarkGray
}

pub fn border_for(focused: bool) -> Style {
    if focused {
        Style::default().fg(focused_border())
    } else {
        Style::default().fg(unfocused_border())
    }
}

pub fn variant_color(variant: Variant) -> Color {
    match variant {
        Variant::Default => Color::Green,
        Variant::Destructive => Color::Red,
    }
}

pub fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

pub fn modal_background() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White)
}

pub fn help_text() -> Style {
    Style::default().fg(Color::Rgb(150, 150, 150))
}
