//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the whole game state: grid model, piece shapes and
//! rotation, collision and placement rules, row clearing, and the tick state
//! machine that ties them together. It has no dependency on a terminal, a
//! window or any I/O; the host feeds it elapsed time and input actions and
//! pulls a picture out of it through the [`render::Canvas`] trait.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven occupancy patterns and their rotation
//! - [`piece`]: a positioned, coloured, rotatable shape
//! - [`board`]: fixed-size grid of locked cells with row clearing
//! - [`game`]: the session that owns board and pieces and runs ticks
//! - [`timing`]: fixed-interval tick timer fed with frame times
//! - [`rng`]: seeded shape selection and the colour cycle
//! - [`render`]: the drawing contract (`Canvas`, `Layer`, `Label`)
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameSession, TickOutcome};
//! use tui_blocks_types::{GameConfig, InputAction, ShapeKind};
//!
//! let mut game = GameSession::new(GameConfig::default(), 12345).unwrap();
//! game.set_current(ShapeKind::Square);
//!
//! // Inputs are validated before they are applied.
//! assert!(game.apply_action(InputAction::MoveLeft));
//!
//! // Frame times accumulate until a tick is due.
//! assert_eq!(game.update(16), None);
//! assert_eq!(game.update(300), Some(TickOutcome::Fell));
//! assert_eq!(game.tick_count(), 1);
//! ```

pub mod board;
pub mod game;
pub mod piece;
pub mod render;
pub mod rng;
pub mod shapes;
pub mod timing;

pub use tui_blocks_types as types;

pub use board::Board;
pub use game::{GameSession, LockReport, TickOutcome};
pub use piece::{Piece, PieceCells};
pub use render::{Canvas, DrawMode, DrawOp, Label, Layer};
pub use rng::{PieceSource, SimpleRng};
pub use shapes::{pattern, Pattern};
pub use timing::TickTimer;
