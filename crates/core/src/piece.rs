//! Piece module - a positioned, rotatable instance of a shape
//!
//! Pieces are values. Rotating or moving one produces a new `Piece`, so the
//! game can build a candidate, test it against the board, and only then
//! replace the live piece.
//!
//! Coordinates are screen pixels. The origin `(x, y)` is where the piece's
//! picture is drawn. Absolute cell rectangles (used for locking) sit one row
//! higher than that picture: see [`Piece::occupied_cells`].

use arrayvec::ArrayVec;

use crate::render::{Canvas, DrawMode, Layer};
use crate::shapes::{pattern, Pattern, MAX_PATTERN_CELLS};
use crate::types::{GameConfig, Point, Rect, Rgb, RotateDirection, ShapeKind};

/// Filled cells of a piece with their colour
pub type PieceCells = ArrayVec<(Rect, Rgb), MAX_PATTERN_CELLS>;

/// Pixels trimmed from each side of a cell when it is drawn
const CELL_INSET: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    color: Rgb,
    pattern: Pattern,
    cell_size: i32,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(kind: ShapeKind, color: Rgb, cell_size: i32, origin: Point) -> Self {
        Self {
            kind,
            color,
            pattern: pattern(kind),
            cell_size,
            x: origin.x,
            y: origin.y,
        }
    }

    /// A fresh, unrotated piece at the configured spawn point.
    pub fn spawn(kind: ShapeKind, color: Rgb, config: &GameConfig) -> Self {
        Self::new(kind, color, config.cell_size_px(), config.spawn_origin())
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width in pixels, always `cols * cell_size`
    pub fn width(&self) -> i32 {
        self.pattern.cols() as i32 * self.cell_size
    }

    /// Height in pixels, always `rows * cell_size`
    pub fn height(&self) -> i32 {
        self.pattern.rows() as i32 * self.cell_size
    }

    /// Bounding rectangle at the current origin.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }

    /// Same piece with its pattern rotated. Placement is not checked.
    pub fn rotate(&self, direction: RotateDirection) -> Piece {
        Piece {
            pattern: self.pattern.rotated(direction),
            ..*self
        }
    }

    /// Same shape, colour, size and orientation at another origin.
    pub fn copy_at(&self, x: i32, y: i32) -> Piece {
        Piece { x, y, ..*self }
    }

    /// Filled cells, row-major.
    ///
    /// With `absolute == false` the rectangles are relative to the piece's own
    /// picture. With `absolute == true` they are screen positions, shifted one
    /// cell up from the origin: `(x + col*cs, (y - cs) + row*cs)`. Locking a
    /// piece that has just failed to fall therefore writes the cells of the
    /// position it fell from.
    pub fn occupied_cells(&self, absolute: bool) -> PieceCells {
        let cs = self.cell_size;
        let (base_x, base_y) = if absolute {
            (self.x, self.y - cs)
        } else {
            (0, 0)
        };
        self.pattern
            .iter_filled()
            .map(|(row, col)| {
                let rect = Rect::new(base_x + col as i32 * cs, base_y + row as i32 * cs, cs, cs);
                (rect, self.color)
            })
            .collect()
    }

    /// The piece's picture in local coordinates.
    pub fn image(&self) -> Layer {
        let mut layer = Layer::new(self.width(), self.height());
        for (rect, color) in self.occupied_cells(false) {
            layer.draw_rect(rect.inflate(-CELL_INSET, -CELL_INSET), color, DrawMode::Filled);
        }
        layer
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.blit(&self.image(), self.origin());
    }
}
