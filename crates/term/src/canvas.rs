//! TermCanvas: the core's pixel-space [`Canvas`] drawn onto a terminal
//! framebuffer.
//!
//! One terminal row covers `cell_size` pixels and one column covers half of
//! that, so a board cell comes out two characters wide, which roughly keeps it
//! square on typical terminal fonts. Pixel rectangles are mapped by flooring
//! both edges; a rectangle always covers at least one character.

use crate::core::{Canvas, DrawMode, Label};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{GameConfig, Point, Rect, Rgb};

/// Foreground for label text
const LABEL_COLOR: Rgb = Rgb::new(220, 220, 220);

pub struct TermCanvas<'a> {
    fb: &'a mut FrameBuffer,
    px_per_col: i32,
    px_per_row: i32,
}

impl<'a> TermCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer, cell_size: u16) -> Self {
        let cs = cell_size.max(2) as i32;
        Self {
            fb,
            px_per_col: cs / 2,
            px_per_row: cs,
        }
    }

    /// Terminal size (columns, rows) needed to show the configured screen.
    pub fn screen_cells(config: &GameConfig) -> (u16, u16) {
        let cs = config.cell_size.max(2);
        (config.screen_width / (cs / 2), config.screen_height / cs)
    }

    /// Terminal column/row of a pixel position.
    pub fn to_cell(&self, pos: Point) -> (i32, i32) {
        (
            pos.x.div_euclid(self.px_per_col),
            pos.y.div_euclid(self.px_per_row),
        )
    }

    fn span(pos: i32, len: i32, scale: i32) -> (i32, i32) {
        let start = pos.div_euclid(scale);
        let end = (pos + len).div_euclid(scale);
        (start, end.max(start + 1))
    }

    fn draw_outline(&mut self, cols: (i32, i32), rows: (i32, i32), color: Rgb) {
        let (c0, c1) = (cols.0, cols.1 - 1);
        let (r0, r1) = (rows.0, rows.1 - 1);

        if c1 - c0 < 2 || r1 - r0 < 2 {
            // Too small for a box; mark the corner.
            self.put_glyph(c0, r0, '·', color, true);
            return;
        }

        for c in c0 + 1..c1 {
            self.put_glyph(c, r0, '─', color, false);
            self.put_glyph(c, r1, '─', color, false);
        }
        for r in r0 + 1..r1 {
            self.put_glyph(c0, r, '│', color, false);
            self.put_glyph(c1, r, '│', color, false);
        }
        self.put_glyph(c0, r0, '┌', color, false);
        self.put_glyph(c1, r0, '┐', color, false);
        self.put_glyph(c0, r1, '└', color, false);
        self.put_glyph(c1, r1, '┘', color, false);
    }

    fn put_glyph(&mut self, x: i32, y: i32, ch: char, fg: Rgb, dim: bool) {
        if let Some(cell) = self.fb.get(x, y) {
            let style = CellStyle { fg, dim, ..cell.style };
            self.fb.set(x, y, style.into_cell(ch));
        }
    }
}

impl Canvas for TermCanvas<'_> {
    fn draw_rect(&mut self, rect: Rect, color: Rgb, mode: DrawMode) {
        let cols = Self::span(rect.x, rect.w, self.px_per_col);
        let rows = Self::span(rect.y, rect.h, self.px_per_row);
        match mode {
            DrawMode::Filled => {
                for r in rows.0..rows.1 {
                    for c in cols.0..cols.1 {
                        self.fb.set_bg(c, r, color);
                    }
                }
            }
            DrawMode::Outline => self.draw_outline(cols, rows, color),
        }
    }

    fn draw_label(&mut self, label: &Label, pos: Point) {
        let (x, y) = self.to_cell(pos);
        self.fb.put_str(x, y, &label.text, LABEL_COLOR);
    }
}
