//! Modal dialog rendering
//!
//! - Base URL modal
//! - Token input modal
//! - Delete confirmation modal

use super::styling;
use crate::state::AppState;
use crate::types::DeleteTarget;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the token input modal for bearer authentication
pub fn render_token_input_modal(frame: &mut Frame, state: &AppState) {
    render_text_input_modal(
        frame,
        " Enter Bearer Token ",
        "Token:",
        &state.token_input,
        None,
    );
}

/// Render the API base URL modal
pub fn render_url_input_modal(frame: &mut Frame, state: &AppState) {
    let hint = "Endpoints such as loyalty/tier/list are joined onto this URL";
    render_text_input_modal(
        frame,
        " Loyalty API Base URL ",
        "Base URL:",
        &state.url_input,
        Some(hint),
    );
}

/// Render the yes/no prompt shown before a delete
pub fn render_confirm_delete_modal(frame: &mut Frame, target: &DeleteTarget) {
    let modal_area = centered(frame.area(), 0.5, 60.0, 7);
    frame.render_widget(Clear, modal_area);

    let title = match target {
        DeleteTarget::Tier(_) => " Delete Tier? ",
        DeleteTarget::Config(_) => " Delete Config? ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(styling::modal_background());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let message = Paragraph::new(target.prompt())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let actions = Paragraph::new("[Y] Yes, delete  |  [N] Cancel")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[2]);
}

fn render_text_input_modal(
    frame: &mut Frame,
    title: &str,
    label: &str,
    value: &str,
    hint: Option<&str>,
) {
    let modal_area = centered(frame.area(), 0.6, 80.0, 8);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(styling::modal_background());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new(label.to_string()).style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    // Show the full value while editing, with a cursor
    let input = Paragraph::new(format!("{value}_")).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    if let Some(hint) = hint {
        let hint = Paragraph::new(hint.to_string()).style(styling::help_text());
        frame.render_widget(hint, chunks[2]);
    }

    let help = Paragraph::new("Enter: Save  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(styling::help_text())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn centered(area: Rect, width_ratio: f32, max_width: f32, height: u16) -> Rect {
    let width = (area.width as f32 * width_ratio).min(max_width) as u16;
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    }
}
