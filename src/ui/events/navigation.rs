//! Navigation handlers
//!
//! Key bindings for the sidebar and the two table panels.

use super::helpers::is_ctrl;
use super::KeyOutcome;
use crate::actions::AppAction;
use crate::types::Panel;
use crossterm::event::{KeyCode, KeyEvent};

/// Keys while the sidebar has focus
pub fn sidebar_key(key: KeyEvent, base_url: Option<&str>) -> KeyOutcome {
    let action = match key.code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('j') | KeyCode::Down => AppAction::NextPanel,
        KeyCode::Char('k') | KeyCode::Up => AppAction::PrevPanel,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            match Panel::from_index(index) {
                Some(panel) => AppAction::SelectPanel(panel),
                None => return KeyOutcome::Ignored,
            }
        }
        KeyCode::Enter | KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            AppAction::FocusContent
        }
        KeyCode::Char('r') => AppAction::Refresh,
        KeyCode::Char('a') => AppAction::EnterTokenInputMode,
        KeyCode::Char('A') => AppAction::Logout,
        KeyCode::Char(',') => AppAction::EnterUrlInputMode {
            base_url: base_url.map(str::to_string),
        },
        KeyCode::Char('x') => AppAction::DismissNotification,
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(action)
}

/// Keys while a tier or config table has focus
pub fn table_key(key: KeyEvent) -> KeyOutcome {
    if is_ctrl(&key, 'c') {
        return KeyOutcome::Quit;
    }

    let action = match key.code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('j') | KeyCode::Down => AppAction::SelectNextRow,
        KeyCode::Char('k') | KeyCode::Up => AppAction::SelectPrevRow,
        KeyCode::Char('e') | KeyCode::Enter => AppAction::EditSelected,
        KeyCode::Char('d') | KeyCode::Delete => AppAction::RequestDelete,
        KeyCode::Char('r') => AppAction::Refresh,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            AppAction::FocusSidebar
        }
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(action)
}
