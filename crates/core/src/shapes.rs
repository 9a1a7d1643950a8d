//! Shapes module - the seven piece patterns and their rotation
//!
//! A pattern is a small occupancy grid (at most 4x4). Rotation is expressed
//! as row reversal plus transposition:
//!
//! - right: reverse the row order, then transpose (90° clockwise)
//! - left: transpose only
//!
//! Left is therefore a reflection, not the inverse of right. Right followed by
//! left flips the pattern upside down; left followed by right mirrors it.

use crate::types::{RotateDirection, ShapeKind};

/// Largest side length of any pattern
pub const MAX_PATTERN_SIDE: usize = 4;

/// Upper bound on filled cells in a pattern
pub const MAX_PATTERN_CELLS: usize = MAX_PATTERN_SIDE * MAX_PATTERN_SIDE;

/// Occupancy grid of a piece, `rows` x `cols`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_PATTERN_SIDE]; MAX_PATTERN_SIDE],
}

impl Pattern {
    /// Build a pattern from rows of 0/1. All rows must have the same length.
    const fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        let mut cells = [[false; MAX_PATTERN_SIDE]; MAX_PATTERN_SIDE];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                cells[r][c] = rows[r][c] == 1;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell at (row, col); anything outside the pattern is empty.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Filled cells as (row, col), row-major.
    pub fn iter_filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows())
            .flat_map(move |r| (0..self.cols()).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.cells[r][c])
    }

    pub fn filled_count(&self) -> usize {
        self.iter_filled().count()
    }

    /// Swap rows and columns.
    pub fn transposed(&self) -> Self {
        let mut cells = [[false; MAX_PATTERN_SIDE]; MAX_PATTERN_SIDE];
        for (r, c) in self.iter_filled() {
            cells[c][r] = true;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Reverse the order of the rows.
    pub fn rows_reversed(&self) -> Self {
        let mut cells = [[false; MAX_PATTERN_SIDE]; MAX_PATTERN_SIDE];
        let last = self.rows() - 1;
        for (r, c) in self.iter_filled() {
            cells[last - r][c] = true;
        }
        Self { cells, ..*self }
    }

    /// Reverse the order of the columns.
    pub fn cols_reversed(&self) -> Self {
        let mut cells = [[false; MAX_PATTERN_SIDE]; MAX_PATTERN_SIDE];
        let last = self.cols() - 1;
        for (r, c) in self.iter_filled() {
            cells[r][last - c] = true;
        }
        Self { cells, ..*self }
    }

    pub fn rotated(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Right => self.rows_reversed().transposed(),
            RotateDirection::Left => self.transposed(),
        }
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for r in 0..self.rows() {
            let row: String = (0..self.cols())
                .map(|c| if self.cells[r][c] { '#' } else { '.' })
                .collect();
            list.entry(&row);
        }
        list.finish()
    }
}

const T: Pattern = Pattern::from_rows([[0, 1, 0], [1, 1, 1]]);
const STRAIGHT: Pattern = Pattern::from_rows([[1], [1], [1], [1]]);
const NORMAL_L: Pattern = Pattern::from_rows([[1, 0], [1, 0], [1, 1]]);
const BACKWARDS_L: Pattern = Pattern::from_rows([[0, 1], [0, 1], [1, 1]]);
const NORMAL_ZIGZAG: Pattern = Pattern::from_rows([[1, 0], [1, 1], [0, 1]]);
const BACKWARDS_ZIGZAG: Pattern = Pattern::from_rows([[0, 1], [1, 1], [1, 0]]);
const SQUARE: Pattern = Pattern::from_rows([[1, 1], [1, 1]]);

/// Canonical (unrotated) pattern for a shape
pub fn pattern(kind: ShapeKind) -> Pattern {
    match kind {
        ShapeKind::T => T,
        ShapeKind::Straight => STRAIGHT,
        ShapeKind::NormalL => NORMAL_L,
        ShapeKind::BackwardsL => BACKWARDS_L,
        ShapeKind::NormalZigzag => NORMAL_ZIGZAG,
        ShapeKind::BackwardsZigzag => BACKWARDS_ZIGZAG,
        ShapeKind::Square => SQUARE,
    }
}

/// Size of the canonical pattern in cells, as (width, height).
pub fn dimensions(kind: ShapeKind) -> (usize, usize) {
    let p = pattern(kind);
    (p.cols(), p.rows())
}
