//! Board module - manages the grid of locked cells
//!
//! The board is a `width` x `height` grid where each cell is empty or holds the
//! colour of the piece that was locked there. Dimensions are fixed at
//! construction. Storage is a flat row-major vector so row clears are a single
//! `copy_within`.
//! Coordinates: (x, y) where x counts columns left to right and y counts rows
//! top to bottom.

use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Cell contents, with anything out of bounds reading as empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.get(x, y).flatten()
    }

    /// Set cell at position (x, y)
    /// Returns false (and writes nothing) if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove row `y` and insert a blank row at the top.
    ///
    /// Rows above `y` shift down by one; rows below are untouched. Returns
    /// false for an out-of-range row.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }

        let width = self.width;
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);

        true
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Clear every full row in one pass and return the cleared indices.
    ///
    /// Rows are cleared in ascending order. Clearing row `i` only moves the
    /// rows above it, so the remaining (larger) indices stay valid.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let full = self.full_rows();
        for &y in &full {
            self.clear_row(y);
        }
        full
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole row with `cell`, for tests and demos
    pub fn fill_row(&mut self, y: usize, cell: Cell) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].fill(cell);
        true
    }
}
