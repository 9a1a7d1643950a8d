//! Core types module - shared data structures and constants
//!
//! This crate defines the value types used throughout the workspace. They are
//! plain data with no game logic, so they can be shared by the core, the
//! terminal host and the input mapping without pulling in any of them.
//!
//! # Geometry
//!
//! All positions are in screen pixels. A grid cell is `cell_size` pixels
//! square and the play field starts `padding` pixels from the top-left
//! corner of the screen:
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `tiles_wide` | 10 | Play field width in cells |
//! | `tiles_high` | 20 | Play field height in cells |
//! | `cell_size` | 24 | Pixels per cell |
//! | `padding` | 16 | Offset of the play field from the screen edge |
//! | `tick_interval_ms` | 300 | Gravity interval |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{GameConfig, InputAction, Rect, ShapeKind};
//!
//! let shape = ShapeKind::from_str("straight").unwrap();
//! assert_eq!(shape, ShapeKind::Straight);
//!
//! assert_eq!(InputAction::MoveLeft.offset(), Some((-1, 0)));
//! assert_eq!(InputAction::RotateRight.offset(), None);
//!
//! let config = GameConfig::default();
//! assert_eq!(config.play_rect(), Rect::new(16, 16, 240, 480));
//! ```

use std::fmt;

use serde::Deserialize;

/// Play field width in cells
pub const DEFAULT_TILES_WIDE: u16 = 10;

/// Play field height in cells
pub const DEFAULT_TILES_HIGH: u16 = 20;

/// Pixels per grid cell
pub const DEFAULT_CELL_SIZE: u16 = 24;

/// Distance between the screen edge and the play field, in pixels
pub const DEFAULT_PADDING: u16 = 16;

/// Screen size the layout is designed for
pub const DEFAULT_SCREEN_WIDTH: u16 = 800;
pub const DEFAULT_SCREEN_HEIGHT: u16 = 600;

/// Gravity interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 300;

/// Pieces are coloured from this sequence in order, wrapping around.
pub const COLOR_CYCLE: [Rgb; 6] = [
    Rgb::new(255, 0, 200),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 200),
    Rgb::new(255, 200, 0),
];

/// Screen background
pub const BACKGROUND_COLOR: Rgb = Rgb::new(0, 0, 0);

/// Play field fill behind the grid
pub const PLAY_FIELD_COLOR: Rgb = Rgb::new(25, 25, 25);

/// Grid line colour
pub const GRID_LINE_COLOR: Rgb = Rgb::new(100, 100, 100);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen pixels.
///
/// `x`/`y` is the top-left corner; the right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True if `other` lies entirely inside `self` (edges may touch).
    ///
    /// ```
    /// use tui_blocks_types::Rect;
    ///
    /// let field = Rect::new(16, 16, 240, 480);
    /// assert!(field.contains(&Rect::new(16, 16, 24, 96)));
    /// assert!(field.contains(&Rect::new(232, 400, 24, 96)));
    /// assert!(!field.contains(&Rect::new(-8, 16, 24, 96)));
    /// assert!(!field.contains(&Rect::new(16, 424, 24, 96)));
    /// ```
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow (or shrink, for negative values) around the centre.
    pub fn inflate(&self, dw: i32, dh: i32) -> Rect {
        Rect {
            x: self.x - dw / 2,
            y: self.y - dh / 2,
            w: self.w + dw,
            h: self.h + dh,
        }
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Locked cell with the colour of the piece that filled it
///
/// The board only ever checks presence, never the colour itself.
pub type Cell = Option<Rgb>;

/// The seven piece shapes
///
/// Declaration order is the catalog order used for random selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    T,
    Straight,
    NormalL,
    BackwardsL,
    NormalZigzag,
    BackwardsZigzag,
    Square,
}

impl ShapeKind {
    /// All shapes in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::Straight,
        ShapeKind::NormalL,
        ShapeKind::BackwardsL,
        ShapeKind::NormalZigzag,
        ShapeKind::BackwardsZigzag,
        ShapeKind::Square,
    ];

    /// Parse a shape from its catalog name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_str("Normal_L"), Some(ShapeKind::NormalL));
    /// assert_eq!(ShapeKind::from_str("square"), Some(ShapeKind::Square));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(ShapeKind::T),
            "straight" => Some(ShapeKind::Straight),
            "normal_l" => Some(ShapeKind::NormalL),
            "backwards_l" => Some(ShapeKind::BackwardsL),
            "normal_zigzag" => Some(ShapeKind::NormalZigzag),
            "backwards_zigzag" => Some(ShapeKind::BackwardsZigzag),
            "square" => Some(ShapeKind::Square),
            _ => None,
        }
    }

    /// Catalog name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::T => "t",
            ShapeKind::Straight => "straight",
            ShapeKind::NormalL => "normal_l",
            ShapeKind::BackwardsL => "backwards_l",
            ShapeKind::NormalZigzag => "normal_zigzag",
            ShapeKind::BackwardsZigzag => "backwards_zigzag",
            ShapeKind::Square => "square",
        }
    }
}

/// Rotation direction
///
/// - **Right**: reverse the row order, then transpose (90° clockwise)
/// - **Left**: transpose only
///
/// The two are not inverses of each other for asymmetric shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Left,
    Right,
}

/// Discrete input actions recognised by the game
///
/// The host delivers one action per key-up; nothing else is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Shift the piece one cell left
    MoveLeft,
    /// Shift the piece one cell right
    MoveRight,
    /// Shift the piece one cell down (never locks)
    MoveDown,
    /// Rotate with [`RotateDirection::Left`]
    RotateLeft,
    /// Rotate with [`RotateDirection::Right`]
    RotateRight,
}

impl InputAction {
    /// Cell offset for translation actions, `None` for rotations.
    pub fn offset(&self) -> Option<(i32, i32)> {
        match self {
            InputAction::MoveLeft => Some((-1, 0)),
            InputAction::MoveRight => Some((1, 0)),
            InputAction::MoveDown => Some((0, 1)),
            InputAction::RotateLeft | InputAction::RotateRight => None,
        }
    }

    /// Rotation direction for rotate actions, `None` for moves.
    pub fn rotation(&self) -> Option<RotateDirection> {
        match self {
            InputAction::RotateLeft => Some(RotateDirection::Left),
            InputAction::RotateRight => Some(RotateDirection::Right),
            _ => None,
        }
    }
}

/// Why a [`GameConfig`] cannot run a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The play field has no cells
    EmptyField { tiles_wide: u16, tiles_high: u16 },
    /// Cells must be at least 2px and even (two terminal columns per cell)
    CellSize(u16),
    /// The play field would start inside the first cell
    Padding { padding: u16, cell_size: u16 },
    /// Gravity would never advance
    TickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyField {
                tiles_wide,
                tiles_high,
            } => write!(
                f,
                "play field must be at least 1x1 (got {}x{})",
                tiles_wide, tiles_high
            ),
            ConfigError::CellSize(size) => {
                write!(f, "cell_size must be even and at least 2 (got {})", size)
            }
            ConfigError::Padding { padding, cell_size } => write!(
                f,
                "padding ({}) must be smaller than cell_size ({})",
                padding, cell_size
            ),
            ConfigError::TickInterval => write!(f, "tick_interval_ms must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Session configuration, read once when a game is created.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tiles_wide: u16,
    pub tiles_high: u16,
    pub cell_size: u16,
    pub padding: u16,
    pub screen_width: u16,
    pub screen_height: u16,
    pub tick_interval_ms: u32,
    /// Draw column/row numbers along the grid edges.
    pub show_grid_labels: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tiles_wide: DEFAULT_TILES_WIDE,
            tiles_high: DEFAULT_TILES_HIGH,
            cell_size: DEFAULT_CELL_SIZE,
            padding: DEFAULT_PADDING,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            show_grid_labels: false,
        }
    }
}

impl GameConfig {
    /// Reject layouts the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiles_wide == 0 || self.tiles_high == 0 {
            return Err(ConfigError::EmptyField {
                tiles_wide: self.tiles_wide,
                tiles_high: self.tiles_high,
            });
        }
        if self.cell_size < 2 || self.cell_size % 2 != 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.padding >= self.cell_size {
            return Err(ConfigError::Padding {
                padding: self.padding,
                cell_size: self.cell_size,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        Ok(())
    }

    pub fn cell_size_px(&self) -> i32 {
        self.cell_size as i32
    }

    /// The bounded rectangle pieces must stay inside.
    pub fn play_rect(&self) -> Rect {
        let cs = self.cell_size_px();
        Rect::new(
            self.padding as i32,
            self.padding as i32,
            self.tiles_wide as i32 * cs,
            self.tiles_high as i32 * cs,
        )
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.screen_width as i32, self.screen_height as i32)
    }

    /// Where new pieces appear: two cells in from the left, on the top row.
    pub fn spawn_origin(&self) -> Point {
        Point::new(
            self.padding as i32 + 2 * self.cell_size_px(),
            self.padding as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_reference_screen() {
        let config = GameConfig::default();
        assert_eq!(config.play_rect(), Rect::new(16, 16, 240, 480));
        assert_eq!(config.spawn_origin(), Point::new(64, 16));
        assert_eq!(config.screen_rect(), Rect::new(0, 0, 800, 600));
        assert_eq!(config.tick_interval_ms, 300);
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "tiles_wide": 12, "show_grid_labels": true }"#).unwrap();
        assert_eq!(config.tiles_wide, 12);
        assert!(config.show_grid_labels);
        assert_eq!(config.tiles_high, DEFAULT_TILES_HIGH);
        assert_eq!(config.cell_size, DEFAULT_CELL_SIZE);
    }

    #[test]
    fn inflate_shrinks_around_centre() {
        let r = Rect::new(0, 0, 24, 24);
        assert_eq!(r.inflate(-4, -4), Rect::new(2, 2, 20, 20));
        assert_eq!(r.inflate(-1, -1), Rect::new(0, 0, 23, 23));
    }

    #[test]
    fn color_cycle_has_six_distinct_colors() {
        for (i, a) in COLOR_CYCLE.iter().enumerate() {
            for b in &COLOR_CYCLE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn actions_split_into_moves_and_rotations() {
        assert_eq!(InputAction::MoveDown.offset(), Some((0, 1)));
        assert_eq!(InputAction::MoveDown.rotation(), None);
        assert_eq!(InputAction::RotateLeft.offset(), None);
        assert_eq!(
            InputAction::RotateLeft.rotation(),
            Some(RotateDirection::Left)
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let base = GameConfig::default();
        let zero_cell = GameConfig {
            cell_size: 0,
            ..base
        };
        assert_eq!(zero_cell.validate(), Err(ConfigError::CellSize(0)));
        let odd_cell = GameConfig {
            cell_size: 23,
            ..base
        };
        assert_eq!(odd_cell.validate(), Err(ConfigError::CellSize(23)));
        let no_rows = GameConfig {
            tiles_high: 0,
            ..base
        };
        assert!(matches!(
            no_rows.validate(),
            Err(ConfigError::EmptyField { tiles_high: 0, .. })
        ));
        let wide_pad = GameConfig {
            padding: 24,
            ..base
        };
        assert!(wide_pad.validate().is_err());
        let stopped = GameConfig {
            tick_interval_ms: 0,
            ..base
        };
        assert_eq!(stopped.validate(), Err(ConfigError::TickInterval));
    }

    #[test]
    fn shape_names_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
