//! RNG module - random shapes, cycling colours
//!
//! Shapes are drawn uniformly at random from the catalog. Colours are not
//! random: they follow [`COLOR_CYCLE`] in order and wrap around. Both come
//! from one [`PieceSource`] so a seed reproduces the whole piece sequence.

use crate::piece::Piece;
use crate::types::{GameConfig, Rgb, ShapeKind, COLOR_CYCLE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero seed would be a fixed point of the generator.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG have short periods; use the high half.
        ((self.next_u32() >> 16) * max) >> 16
    }
}

/// Produces the shape and colour of every new piece
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: SimpleRng,
    seed: u32,
    color_index: usize,
}

impl PieceSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
            color_index: 0,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Uniformly random shape
    pub fn next_shape(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }

    /// Next colour in the cycle
    pub fn next_color(&mut self) -> Rgb {
        let color = COLOR_CYCLE[self.color_index];
        self.color_index = (self.color_index + 1) % COLOR_CYCLE.len();
        color
    }

    /// A new piece at the spawn point
    pub fn next_piece(&mut self, config: &GameConfig) -> Piece {
        let kind = self.next_shape();
        let color = self.next_color();
        Piece::spawn(kind, color, config)
    }
}
