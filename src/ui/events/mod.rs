//! Event handling for loyalty-tiers-tui
//!
//! Input is routed by input mode first, then by focus:
//! - EnteringToken / EnteringUrl: text modals
//! - ConfirmDelete: yes/no prompt
//! - Normal: sidebar, form or table bindings
//!
//! # Architecture
//!
//! Each key maps to a [`KeyOutcome`]. Actions are applied to AppState via
//! `apply_action` in actions.rs, and any [`Command`] it returns is handed back to
//! the app loop, which owns the API client and session.
//!
//! # Lock Management
//!
//! The state lock is taken once to read the routing inputs and once to apply
//! the resulting action, never across both.

mod forms;
mod helpers;
mod modals;
mod navigation;

use crate::actions::AppAction;
use crate::state::SharedState;
use crate::types::{Command, InputMode, PanelFocus};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use helpers::{apply, apply_many, collect_paste_batch};

/// What a single key press means in the current context
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Action(AppAction),
    /// A printable character for the focused text input
    Type(char),
    Quit,
    Ignored,
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one terminal event and apply it
    pub fn handle_events(
        &mut self,
        state: &SharedState,
        base_url: Option<&str>,
    ) -> Result<Option<Command>> {
        if !event::poll(std::time::Duration::from_millis(50))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(self.handle_key(key, state, base_url, collect_paste_batch))
            }
            _ => Ok(None),
        }
    }

    /// Route a key press, `batch` widens a typed char into any pending paste
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &SharedState,
        base_url: Option<&str>,
        batch: fn(char) -> String,
    ) -> Option<Command> {
        let (input_mode, focus, panel) = {
            let s = state.read().ok()?;
            (s.input_mode.clone(), s.focus, s.panel)
        };

        let outcome = match input_mode {
            InputMode::EnteringToken => modals::token_key(key),
            InputMode::EnteringUrl => modals::url_key(key),
            InputMode::ConfirmDelete(_) => modals::confirm_key(key),
            InputMode::Normal => match focus {
                PanelFocus::Sidebar => navigation::sidebar_key(key, base_url),
                PanelFocus::Content if panel.is_list() => navigation::table_key(key),
                PanelFocus::Content => forms::form_key(key),
            },
        };

        match outcome {
            KeyOutcome::Action(action) => apply(state, action),
            KeyOutcome::Type(c) => {
                let text = batch(c);
                match input_mode {
                    InputMode::EnteringToken => apply(state, AppAction::AppendToTokenInput(text)),
                    InputMode::EnteringUrl => apply(state, AppAction::AppendToUrlInput(text)),
                    _ => apply_many(state, forms::typed_actions(&text)),
                }
            }
            KeyOutcome::Quit => {
                self.should_quit = true;
                None
            }
            KeyOutcome::Ignored => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::helpers::no_batch;
    use super::*;
    use crate::state::AppState;
    use crate::sync::fake::tier;
    use crate::types::{Confirmation, DeleteTarget, Panel};
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn press(handler: &mut EventHandler, state: &SharedState, code: KeyCode) -> Option<Command> {
        handler.handle_key(
            KeyEvent::new(code, KeyModifiers::NONE),
            state,
            None,
            no_batch,
        )
    }

    fn type_text(handler: &mut EventHandler, state: &SharedState, text: &str) {
        for c in text.chars() {
            press(handler, state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_fill_and_submit_tier_form() {
        let state = AppState::default().shared();
        let mut handler = EventHandler::new();

        press(&mut handler, &state, KeyCode::Enter);
        type_text(&mut handler, &state, "Gold");
        for _ in 0..5 {
            press(&mut handler, &state, KeyCode::Tab);
        }
        type_text(&mut handler, &state, "12.5x");

        let cmd = press(&mut handler, &state, KeyCode::Enter);
        assert_eq!(cmd, Some(Command::SubmitTier));

        let s = state.read().unwrap();
        assert_eq!(s.tier_form.name, "Gold");
        assert_eq!(s.tier_form.cashback_percent, "12.5");
        assert!(!handler.should_quit);
    }

    #[test]
    fn test_q_quits_from_sidebar_only() {
        let state = AppState::default().shared();
        let mut handler = EventHandler::new();

        press(&mut handler, &state, KeyCode::Enter);
        press(&mut handler, &state, KeyCode::Char('q'));
        assert!(!handler.should_quit);
        assert_eq!(state.read().unwrap().tier_form.name, "q");

        press(&mut handler, &state, KeyCode::Esc);
        press(&mut handler, &state, KeyCode::Char('q'));
        assert!(handler.should_quit);
    }

    #[test]
    fn test_delete_flow_from_table() {
        let state = AppState::default().shared();
        state
            .write()
            .unwrap()
            .tiers
            .replace(vec![tier(3, "Bronze"), tier(7, "Silver")]);
        let mut handler = EventHandler::new();

        assert_eq!(
            press(&mut handler, &state, KeyCode::Char('2')),
            Some(Command::FetchTiers)
        );
        press(&mut handler, &state, KeyCode::Enter);
        press(&mut handler, &state, KeyCode::Char('j'));
        press(&mut handler, &state, KeyCode::Char('d'));
        assert_eq!(
            state.read().unwrap().input_mode,
            InputMode::ConfirmDelete(DeleteTarget::Tier(7))
        );

        let cmd = press(&mut handler, &state, KeyCode::Char('y'));
        assert_eq!(
            cmd,
            Some(Command::Delete(DeleteTarget::Tier(7), Confirmation::Accepted))
        );
        assert_eq!(state.read().unwrap().panel, Panel::ManageTiers);
    }

    #[test]
    fn test_token_modal_takes_every_char() {
        let state = AppState::default().shared();
        let mut handler = EventHandler::new();

        press(&mut handler, &state, KeyCode::Char('a'));
        type_text(&mut handler, &state, "qa");
        assert!(!handler.should_quit);

        let cmd = press(&mut handler, &state, KeyCode::Enter);
        assert_eq!(cmd, Some(Command::SaveToken("qa".to_string())));
    }
}
