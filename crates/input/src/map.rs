//! Key mapping from terminal events to game actions.

use crate::types::InputAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which key event kind triggers an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTrigger {
    /// Act on key-up. Needs a terminal that reports release events.
    Release,
    /// Act on key-down, for terminals that only report presses.
    Press,
}

impl KeyTrigger {
    /// Pick the trigger from whether release events are being reported.
    pub fn detect(release_events: bool) -> Self {
        if release_events {
            KeyTrigger::Release
        } else {
            KeyTrigger::Press
        }
    }

    pub fn matches(&self, kind: KeyEventKind) -> bool {
        match self {
            KeyTrigger::Release => kind == KeyEventKind::Release,
            KeyTrigger::Press => kind == KeyEventKind::Press,
        }
    }
}

/// Map keyboard input to game actions, ignoring the event kind.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputAction::MoveDown)
        }

        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(InputAction::RotateRight),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(InputAction::RotateLeft),

        _ => None,
    }
}

/// Map a key event to an action only if its kind matches `trigger`.
pub fn action_for(key: KeyEvent, trigger: KeyTrigger) -> Option<InputAction> {
    if !trigger.matches(key.kind) {
        return None;
    }
    handle_key_event(key)
}

/// Check if key should quit the game. Quitting reacts to presses only.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
