//! Helper functions for event handling
//!
//! - State locking helpers (apply actions)
//! - Paste batching
//! - Modifier checks

use crate::actions::{apply_action, AppAction};
use crate::state::SharedState;
use crate::types::Command;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// Apply a single action to state, returning its side effect
pub fn apply(state: &SharedState, action: AppAction) -> Option<Command> {
    let mut s = state.write().ok()?;
    apply_action(action, &mut s)
}

/// Apply several actions under one lock, keeping the last side effect
pub fn apply_many(state: &SharedState, actions: Vec<AppAction>) -> Option<Command> {
    let mut s = state.write().ok()?;
    actions
        .into_iter()
        .fold(None, |last, action| apply_action(action, &mut s).or(last))
}

/// True for `Ctrl+<c>`
pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this drains any immediately available character
/// events so a terminal paste lands as one edit instead of one redraw per char.
pub fn collect_paste_batch(initial_char: char) -> String {
    let mut chars = vec![initial_char];

    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next_key)) => match next_key.code {
                KeyCode::Char(next_c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    chars.push(next_c);
                }
                _ => break,
            },
            _ => break,
        }
    }

    chars.into_iter().collect()
}

/// Single character, no batching
#[cfg(test)]
pub fn no_batch(c: char) -> String {
    c.to_string()
}
