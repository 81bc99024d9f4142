//! Main panel rendering
//!
//! - Sidebar (left side) with the four panels
//! - Content panel (right side): tier form, tier table, config form, config table

use super::components::{render_empty_message, render_error_message, render_loading_spinner};
use super::styling;
use crate::forms::{ConfigField, FieldKind, TierField};
use crate::mapper::percent_display;
use crate::state::{AppState, RecordList};
use crate::types::{Panel, PanelFocus};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

/// Render the panel selector
pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = Panel::ALL
        .iter()
        .enumerate()
        .map(|(i, panel)| ListItem::new(format!("[{}] {}", i + 1, panel.label())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Loyalty")
                .borders(Borders::ALL)
                .border_style(styling::border_for(state.focus == PanelFocus::Sidebar)),
        )
        .highlight_style(styling::highlight())
        .highlight_symbol(">> ");

    let mut list_state = ListState::default().with_selected(Some(state.panel.index()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render whichever panel is active
pub fn render_content_panel(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    match state.panel {
        Panel::CreateTier => render_tier_form(frame, area, state),
        Panel::ManageTiers => render_tiers_table(frame, area, state, spinner_index),
        Panel::CreateTierConfig => render_config_form(frame, area, state),
        Panel::ManageTierConfigs => render_configs_table(frame, area, state, spinner_index),
    }
}

// ============================================================================
// Forms
// ============================================================================

fn render_tier_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == PanelFocus::Content;
    let form = &state.tier_form;

    let mut lines: Vec<Line> = TierField::ALL
        .iter()
        .map(|field| {
            let value = match field.kind() {
                FieldKind::Flag => checkbox(form.value(*field) == "true"),
                _ if *field == TierField::CashbackPercent => format!("{} %", form.value(*field)),
                _ => form.value(*field),
            };
            field_line(field.label(), value, focused && state.tier_field == *field)
        })
        .collect();

    let label = match state.editing_tier_id {
        Some(_) => "Update Tier",
        None => "Create Tier",
    };
    lines.push(Line::raw(""));
    lines.push(submit_line(label, state.tier_submitting));

    let title = match state.editing_tier_id {
        Some(id) => format!("[1] Edit Tier #{id}"),
        None => "[1] Create Tier".to_string(),
    };

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(styling::border_for(focused)),
    );
    frame.render_widget(form, area);
}

fn render_config_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == PanelFocus::Content;
    let form = &state.config_form;

    let mut lines: Vec<Line> = ConfigField::ALL
        .iter()
        .map(|field| {
            let value = match field.kind() {
                FieldKind::TierPicker => tier_picker_value(state),
                _ => form.value(*field).to_string(),
            };
            field_line(field.label(), value, focused && state.config_field == *field)
        })
        .collect();

    lines.push(Line::raw(""));
    lines.push(submit_line("Create Config", state.config_submitting));

    let form = Paragraph::new(lines).block(
        Block::default()
            .title("[3] Create Tier Config")
            .borders(Borders::ALL)
            .border_style(styling::border_for(focused)),
    );
    frame.render_widget(form, area);
}

fn tier_picker_value(state: &AppState) -> String {
    let id = state.config_form.default_tier_id.as_str();
    if id.is_empty() {
        return if state.tiers.items.is_empty() {
            "< no tiers loaded, open Manage Tiers >".to_string()
        } else {
            "< select a tier >".to_string()
        };
    }

    let name = id
        .parse()
        .ok()
        .and_then(|id| state.tier_name(id))
        .unwrap_or("?");
    format!("< {name} (#{id}) >")
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{label:<34}"), Style::default().fg(Color::LightCyan)),
        Span::styled(value, value_style),
    ])
}

fn checkbox(checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    mark.to_string()
}

fn submit_line(label: &str, submitting: bool) -> Line<'static> {
    if submitting {
        Line::styled("  Saving...", Style::default().fg(Color::DarkGray))
    } else {
        Line::styled(
            format!("  [ {label} ]  (Enter)"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    }
}

// ============================================================================
// Tables
// ============================================================================

fn render_tiers_table(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let title = format!("[2] Tiers ({})", state.tiers.items.len());
    if render_list_status(frame, area, &state.tiers, &title, "tiers", spinner_index) {
        return;
    }

    let rows = state.tiers.items.iter().map(|tier| {
        Row::new(vec![
            tier.id.map(|id| id.to_string()).unwrap_or_default(),
            tier.name.clone(),
            yes_no(tier.is_active),
            yes_no(tier.is_special),
            format!(
                "{} - {}",
                tier.min_orders.unwrap_or(0),
                tier.max_orders.unwrap_or(0)
            ),
            tier.order_online
                .map(|f| format!("{}%", percent_display(f)))
                .unwrap_or_default(),
        ])
    });

    let header = ["ID", "Name", "Active", "Special", "Orders", "Cashback"];
    let widths = [
        Constraint::Length(6),
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(9),
    ];
    render_table(frame, area, state, &title, header.to_vec(), rows, &widths, state.tiers.selected);
}

fn render_configs_table(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let title = format!("[4] Tier Configs ({})", state.configs.items.len());
    if render_list_status(frame, area, &state.configs, &title, "configs", spinner_index) {
        return;
    }

    let rows = state.configs.items.iter().map(|config| {
        let default_tier = config
            .default_tier_id
            .map(|id| match state.tier_name(id) {
                Some(name) => format!("{name} (#{id})"),
                None => format!("#{id}"),
            })
            .unwrap_or_default();

        Row::new(vec![
            config.id.map(|id| id.to_string()).unwrap_or_default(),
            config.description.clone(),
            default_tier,
            format!(
                "{} → {}",
                config.order_online.ratio_from.as_deref().unwrap_or("-"),
                config.order_online.ratio_to.as_deref().unwrap_or("-")
            ),
            config.referral.amount.clone().unwrap_or_default(),
            config.review_product.amount.clone().unwrap_or_default(),
        ])
    });

    let header = ["ID", "Description", "Default Tier", "Points → Cashback", "Referral", "Review"];
    let widths = [
        Constraint::Length(6),
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(18),
        Constraint::Length(9),
        Constraint::Length(8),
    ];
    render_table(frame, area, state, &title, header.to_vec(), rows, &widths, state.configs.selected);
}

/// Draws loading/error/empty states, returns true when one was drawn
fn render_list_status<T>(
    frame: &mut Frame,
    area: Rect,
    list: &RecordList<T>,
    title: &str,
    what: &str,
    spinner_index: usize,
) -> bool {
    if list.loading {
        render_loading_spinner(frame, area, title, what, spinner_index);
    } else if let Some(error) = &list.error {
        render_error_message(frame, area, title, error);
    } else if list.items.is_empty() {
        render_empty_message(frame, area, title, what);
    } else {
        return false;
    }
    true
}

#[allow(clippy::too_many_arguments)]
fn render_table<'a>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    title: &str,
    header: Vec<&'a str>,
    rows: impl IntoIterator<Item = Row<'a>>,
    widths: &[Constraint],
    selected: usize,
) {
    let focused = state.focus == PanelFocus::Content;

    let table = Table::new(rows, widths.to_vec())
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(styling::border_for(focused)),
        )
        .row_highlight_style(styling::highlight())
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}
