//! Drawing contract between the game core and whatever displays it.
//!
//! The core never owns a window or terminal. It describes its visual state
//! through the two primitives of [`Canvas`] (rectangles and text labels) and
//! composes larger pictures by recording them into a [`Layer`] and blitting
//! that layer somewhere else.

use crate::types::{Point, Rect, Rgb};

/// How a rectangle is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Filled,
    Outline,
}

/// A piece of text ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub font_size: u16,
}

impl Label {
    pub const DEFAULT_FONT_SIZE: u16 = 16;

    pub fn new(text: impl Into<String>, font_size: u16) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    /// Line height in pixels.
    pub fn height(&self) -> i32 {
        self.font_size as i32
    }
}

/// A surface the core can draw onto.
pub trait Canvas {
    fn draw_rect(&mut self, rect: Rect, color: Rgb, mode: DrawMode);

    fn draw_label(&mut self, label: &Label, pos: Point);

    /// Replay a recorded layer with its origin placed at `pos`.
    fn blit(&mut self, layer: &Layer, pos: Point) {
        for op in layer.ops() {
            match op {
                DrawOp::Rect { rect, color, mode } => {
                    self.draw_rect(rect.translate(pos.x, pos.y), *color, *mode)
                }
                DrawOp::Label { label, pos: at } => {
                    self.draw_label(label, Point::new(at.x + pos.x, at.y + pos.y))
                }
            }
        }
    }
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Rect { rect: Rect, color: Rgb, mode: DrawMode },
    Label { label: Label, pos: Point },
}

/// Offscreen picture in local coordinates, built once and blitted anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    width: i32,
    height: i32,
    ops: Vec<DrawOp>,
}

impl Layer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Canvas for Layer {
    fn draw_rect(&mut self, rect: Rect, color: Rgb, mode: DrawMode) {
        self.ops.push(DrawOp::Rect { rect, color, mode });
    }

    fn draw_label(&mut self, label: &Label, pos: Point) {
        self.ops.push(DrawOp::Label {
            label: label.clone(),
            pos,
        });
    }
}
