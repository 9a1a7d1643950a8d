//! Terminal host rendering.
//!
//! The game core draws in screen pixels through [`core::Canvas`]. This crate
//! provides a canvas that rasterises those calls into a character
//! framebuffer, and a renderer that flushes the framebuffer to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`canvas`]: [`TermCanvas`], pixel rectangles and labels to cells
//! - [`renderer`]: [`TerminalRenderer`], raw mode and diffed output

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use canvas::TermCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_frame_into, TerminalRenderer};
