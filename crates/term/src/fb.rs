//! Framebuffer and style types for terminal rendering.

pub use crate::types::Rgb;

/// Per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            dim: false,
        }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// 2D grid of styled character cells. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Paint a cell solid: blank glyph on `bg`, foreground colour kept.
    pub fn set_bg(&mut self, x: i32, y: i32, bg: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Cell {
                ch: ' ',
                style: CellStyle {
                    bg,
                    dim: false,
                    ..self.cells[i].style
                },
            };
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Print `s` starting at (x, y) in `fg`, over whatever background is there.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Rgb) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x + i as i32;
            if let Some(cell) = self.get(cx, y) {
                let style = CellStyle {
                    fg,
                    dim: false,
                    ..cell.style
                };
                self.set(cx, y, style.into_cell(ch));
            }
        }
    }

    /// The characters of one row, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width as i32)
            .filter_map(|x| self.get(x, y as i32))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set(-1, 0, CellStyle::default().into_cell('x'));
        fb.set(3, 0, CellStyle::default().into_cell('x'));
        fb.put_str(1, 1, "abc", Rgb::new(1, 1, 1));
        assert_eq!(fb.row_text(0), "   ");
        assert_eq!(fb.row_text(1), " ab");
    }

    #[test]
    fn put_str_keeps_background() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.set_bg(0, 0, Rgb::new(25, 25, 25));
        fb.put_str(0, 0, "T", Rgb::new(255, 255, 255));
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, 'T');
        assert_eq!(cell.style.bg, Rgb::new(25, 25, 25));
        assert_eq!(cell.style.fg, Rgb::new(255, 255, 255));
    }

    #[test]
    fn fills_and_text_clear_dim() {
        let mut fb = FrameBuffer::new(2, 1);
        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        fb.set(0, 0, dim.into_cell('·'));
        fb.set(1, 0, dim.into_cell('·'));
        fb.set_bg(0, 0, Rgb::new(9, 9, 9));
        fb.put_str(1, 0, "x", Rgb::new(1, 1, 1));
        assert!(!fb.get(0, 0).unwrap().style.dim);
        assert!(!fb.get(1, 0).unwrap().style.dim);
    }

    #[test]
    fn resize_changes_dimensions() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(5, 3);
        assert_eq!((fb.width(), fb.height()), (5, 3));
        assert!(fb.get(4, 2).is_some());
        assert!(fb.get(5, 2).is_none());
    }
}
