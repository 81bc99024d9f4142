//! Modal dialog handlers
//!
//! Token entry, base URL entry and the delete confirmation prompt.

use super::helpers::is_ctrl;
use super::KeyOutcome;
use crate::actions::AppAction;
use crate::types::Confirmation;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn token_key(key: KeyEvent) -> KeyOutcome {
    if is_ctrl(&key, 'l') {
        return KeyOutcome::Action(AppAction::ClearTokenInput);
    }
    if is_ctrl(&key, 'w') {
        return KeyOutcome::Action(AppAction::DeleteWordTokenInput);
    }

    let action = match key.code {
        KeyCode::Enter => AppAction::ConfirmTokenInput,
        KeyCode::Esc => AppAction::ExitTokenInputMode,
        KeyCode::Backspace => AppAction::BackspaceTokenInput,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Type(c)
        }
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(action)
}

pub fn url_key(key: KeyEvent) -> KeyOutcome {
    if is_ctrl(&key, 'l') {
        return KeyOutcome::Action(AppAction::ClearUrlInput);
    }
    if is_ctrl(&key, 'w') {
        return KeyOutcome::Action(AppAction::DeleteWordUrlInput);
    }

    let action = match key.code {
        KeyCode::Enter => AppAction::ConfirmUrlInput,
        KeyCode::Esc => AppAction::ExitUrlInputMode,
        KeyCode::Backspace => AppAction::BackspaceUrlInput,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Type(c)
        }
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(action)
}

/// Yes/no prompt before a delete
pub fn confirm_key(key: KeyEvent) -> KeyOutcome {
    let decision = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Confirmation::Accepted,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Declined,
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(AppAction::AnswerConfirmation(decision))
}
