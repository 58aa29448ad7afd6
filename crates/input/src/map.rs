//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Turn
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(GameAction::Roll)
        }

        // Bonus prompt
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(GameAction::AcceptBonus),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(GameAction::DeclineBonus),

        // Session
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::NewRound),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(GameAction::NewGame),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
