//! Falling-block puzzle game (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_blocks::{core,input,term,types}` and adds the
//! command-line configuration used by the terminal binary.

pub mod config;

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;
