//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::InputAction`]. The game
//! reacts to one event per key-up; terminals that cannot report key releases
//! fall back to acting on key presses (see [`KeyTrigger`]).

pub mod map;

pub use tui_blocks_types as types;

pub use map::{action_for, handle_key_event, should_quit, KeyTrigger};
