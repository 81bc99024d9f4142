//! Reusable UI components
//!
//! - Header (title, base URL, auth)
//! - Footer (command help)
//! - Notification bar
//! - Loading / error / empty messages for the tables

use super::styling::{self, SPINNER};
use crate::state::AppState;
use crate::types::{InputMode, Notification, PanelFocus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the application header with base URL and auth info
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    base_url: Option<&str>,
    masked_token: Option<&str>,
) {
    let url = base_url.unwrap_or("No base URL configured");
    let auth_status = match masked_token {
        Some(display) => format!("🔒 {display} | 'a':edit 'A':logout"),
        None => "🔓 Not authenticated | 'a':set token".to_string(),
    };

    let header = Paragraph::new(format!("loyalty tiers - {url} | {auth_status}"))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer with command help for the current focus
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = match (&state.input_mode, state.focus, state.panel.is_list()) {
        (InputMode::ConfirmDelete(_), _, _) => "y:Confirm n/Esc:Cancel",
        (InputMode::EnteringToken | InputMode::EnteringUrl, _, _) => {
            "Enter:Save Ctrl+L:Clear Ctrl+W:Delete word Esc:Cancel"
        }
        (_, PanelFocus::Sidebar, _) => {
            "j/k:Panel 1-4:Jump Enter:Open r:Refresh | ,:URL a:Auth A:Logout x:Dismiss q:Quit"
        }
        (_, PanelFocus::Content, true) => "j/k:Row e:Edit d:Delete r:Refresh Esc:Back",
        (_, PanelFocus::Content, false) => {
            "Tab/↓:Next ↑:Prev Space:Toggle ←/→:Pick tier Ctrl+L:Clear Enter:Submit Esc:Back"
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render the latest notification
pub fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let color = styling::variant_color(notification.variant);

    let text = Line::from(vec![
        Span::styled(
            notification.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(notification.description.as_str()),
    ]);

    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(widget, area);
}

/// Render loading spinner animation
pub fn render_loading_spinner(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    what: &str,
    spinner_index: usize,
) {
    let text = format!(
        "{} Fetching {what}\n\nPlease wait...",
        SPINNER[spinner_index % SPINNER.len()]
    );

    let loading = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(loading, area);
}

/// Render a list fetch error with retry instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, title: &str, error: &str) {
    let error_widget = Paragraph::new(format!("❌ {error}\n\nPress [r] to retry"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(error_widget, area);
}

pub fn render_empty_message(frame: &mut Frame, area: Rect, title: &str, what: &str) {
    let empty = Paragraph::new(format!("No {what} found\n\nPress [r] to refresh"))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(empty, area);
}
