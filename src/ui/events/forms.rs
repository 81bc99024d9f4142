//! Form field editing handlers

use super::helpers::is_ctrl;
use super::KeyOutcome;
use crate::actions::AppAction;
use crate::forms::FormEdit;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys while the tier or config form has focus
pub fn form_key(key: KeyEvent) -> KeyOutcome {
    if is_ctrl(&key, 'l') {
        return KeyOutcome::Action(AppAction::EditField(FormEdit::Clear));
    }
    if is_ctrl(&key, 'c') {
        return KeyOutcome::Quit;
    }

    let action = match key.code {
        KeyCode::Tab | KeyCode::Down => AppAction::NextField,
        KeyCode::BackTab | KeyCode::Up => AppAction::PrevField,
        KeyCode::Left => AppAction::CycleDefaultTier { forward: false },
        KeyCode::Right => AppAction::CycleDefaultTier { forward: true },
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Esc => AppAction::FocusSidebar,
        KeyCode::Backspace => AppAction::EditField(FormEdit::Backspace),
        // Space also toggles flag fields
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Type(c)
        }
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(action)
}

/// One field edit per typed character
pub fn typed_actions(text: &str) -> Vec<AppAction> {
    text.chars()
        .map(|c| AppAction::EditField(FormEdit::Push(c)))
        .collect()
}
