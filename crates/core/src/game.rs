//! Game session - owns the board and pieces and runs the tick state machine
//!
//! Each gravity tick moves through these phases in one synchronous call:
//!
//! ```text
//! Falling --(candidate one row lower is placeable)--> Falling
//!    |
//!    +--(candidate rejected)--> Locking -> RowClearing -> Spawning -> Falling
//! ```
//!
//! Moves and rotations follow the same pattern: build a candidate piece,
//! check it against the play field and the board, then either commit it or
//! drop it. The live piece is never left in a speculative position.
//!
//! There is no game-over state. [`GameSession::spawn_blocked`] (and
//! [`LockReport::spawn_blocked`]) tell the host when a freshly spawned piece
//! already overlaps locked cells so it can decide what to do.

use log::{debug, info, warn};

use crate::board::Board;
use crate::piece::Piece;
use crate::render::{Canvas, DrawMode, Label, Layer};
use crate::rng::PieceSource;
use crate::timing::TickTimer;
use crate::types::{
    ConfigError, GameConfig, InputAction, Point, Rect, RotateDirection, ShapeKind,
    BACKGROUND_COLOR, GRID_LINE_COLOR, PLAY_FIELD_COLOR,
};

/// Font size of the tick/piece counters
const COUNTER_FONT_SIZE: u16 = 36;

/// Vertical position of the first counter label
const COUNTER_TOP: i32 = 400;

/// What happened when a piece locked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockReport {
    /// Cells written into the board
    pub cells_written: usize,
    /// Cells that fell outside the board and were skipped
    pub cells_rejected: usize,
    /// Rows cleared in this pass, in the order they were cleared
    pub cleared_rows: Vec<usize>,
    /// The newly spawned piece overlaps locked cells
    pub spawn_blocked: bool,
}

/// Result of one gravity tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece could not fall and was locked; a new piece has spawned
    Locked(LockReport),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    current: Piece,
    next: Piece,
    source: PieceSource,
    timer: TickTimer,
    tick_count: u32,
    piece_count: u32,
}

impl GameSession {
    /// Create a session with a blank board and the first two pieces drawn.
    ///
    /// Fails if `config` describes a layout the game cannot run with.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut source = PieceSource::new(seed);
        let current = source.next_piece(&config);
        let next = source.next_piece(&config);

        Ok(Self {
            board: Board::new(config.tiles_wide as usize, config.tiles_high as usize),
            current,
            next,
            source,
            timer: TickTimer::new(config.tick_interval_ms),
            tick_count: 0,
            piece_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn seed(&self) -> u32 {
        self.source.seed()
    }

    pub fn play_rect(&self) -> Rect {
        self.config.play_rect()
    }

    /// Replace the current piece with a fresh spawn of `kind`, keeping its colour.
    pub fn set_current(&mut self, kind: ShapeKind) {
        self.current = Piece::spawn(kind, self.current.color(), &self.config);
    }

    /// Empty the board and zero the counters. The piece sequence continues.
    pub fn reset(&mut self) {
        self.board.clear();
        self.timer.reset();
        self.tick_count = 0;
        self.piece_count = 0;
        self.spawn_next();
    }

    /// Map a screen pixel to the board cell containing it.
    pub fn pixel_to_tile(&self, pos: Point) -> (i32, i32) {
        let play = self.play_rect();
        let cs = self.config.cell_size_px();
        ((pos.x - play.x).div_euclid(cs), (pos.y - play.y).div_euclid(cs))
    }

    /// Advance the clock by one frame. Fires at most one tick.
    pub fn update(&mut self, dt_ms: u32) -> Option<TickOutcome> {
        if self.timer.update(dt_ms) {
            Some(self.tick())
        } else {
            None
        }
    }

    /// One gravity step: fall a row, or lock and spawn if that is not possible.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_count = self.tick_count.wrapping_add(1);

        let cs = self.current.cell_size();
        let candidate = self.current.copy_at(self.current.x, self.current.y + cs);
        if self.can_place(&candidate) {
            self.current = candidate;
            return TickOutcome::Fell;
        }

        TickOutcome::Locked(self.lock(&candidate))
    }

    /// Whether `piece` fits: inside the play field and clear of locked cells.
    ///
    /// The absolute cells sit one row above the piece's picture, so each one is
    /// probed one row lower to test the cells the piece actually covers.
    pub fn can_place(&self, piece: &Piece) -> bool {
        if !self.play_rect().contains(&piece.rect()) {
            return false;
        }
        let cs = piece.cell_size();
        piece.occupied_cells(true).iter().all(|(rect, _)| {
            let (tx, ty) = self.pixel_to_tile(Point::new(rect.x, rect.y + cs));
            self.board.cell(tx, ty).is_none()
        })
    }

    /// The current piece overlaps locked cells where it stands.
    pub fn spawn_blocked(&self) -> bool {
        !self.can_place(&self.current)
    }

    /// Apply one discrete input. Returns false if it was rejected.
    pub fn apply_action(&mut self, action: InputAction) -> bool {
        match (action.offset(), action.rotation()) {
            (Some((dx, dy)), _) => self.try_move(dx, dy),
            (None, Some(direction)) => self.try_rotate(direction),
            (None, None) => false,
        }
    }

    /// Shift the current piece by whole cells. A rejected move-down never locks.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let cs = self.current.cell_size();
        let candidate = self
            .current
            .copy_at(self.current.x + dx * cs, self.current.y + dy * cs);
        let moved = self.try_apply(candidate);
        if !moved {
            debug!(
                "move ({}, {}) rejected for {} at {:?}",
                dx,
                dy,
                self.current.kind().as_str(),
                self.current.origin()
            );
        }
        moved
    }

    pub fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let candidate = self.current.rotate(direction);
        let rotated = self.try_apply(candidate);
        if !rotated {
            debug!(
                "rotate {:?} rejected for {} at {:?}",
                direction,
                self.current.kind().as_str(),
                self.current.origin()
            );
        }
        rotated
    }

    /// Commit `candidate` as the current piece if it fits.
    pub fn try_apply(&mut self, candidate: Piece) -> bool {
        if self.can_place(&candidate) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    /// Write `fallen`'s absolute cells into the board, clear rows, spawn.
    fn lock(&mut self, fallen: &Piece) -> LockReport {
        self.piece_count = self.piece_count.wrapping_add(1);

        let mut report = LockReport::default();
        for (rect, color) in fallen.occupied_cells(true) {
            let (tx, ty) = self.pixel_to_tile(rect.origin());
            if self.board.set(tx, ty, Some(color)) {
                report.cells_written += 1;
            } else {
                warn!("unable to set cell ({}, {}) to {:?}", tx, ty, color);
                report.cells_rejected += 1;
            }
        }

        report.cleared_rows = self.clear_full_rows();
        self.spawn_next();

        report.spawn_blocked = self.spawn_blocked();
        if report.spawn_blocked {
            warn!(
                "spawned {} overlaps locked cells",
                self.current.kind().as_str()
            );
        }
        report
    }

    fn clear_full_rows(&mut self) -> Vec<usize> {
        debug!("checking for full rows");
        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            info!("cleared rows {:?}", cleared);
        }
        cleared
    }

    /// The next piece becomes current and a new next piece is drawn.
    fn spawn_next(&mut self) {
        let upcoming = self.source.next_piece(&self.config);
        self.current = std::mem::replace(&mut self.next, upcoming);
    }

    /// The play field contents in play-field-local coordinates.
    pub fn grid_image(&self) -> Layer {
        let play = self.play_rect();
        let cs = self.config.cell_size_px();
        let last_col = self.board.width().saturating_sub(1);
        let mut layer = Layer::new(play.w, play.h);

        for (y, row) in self.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let r = Rect::new(x as i32 * cs, y as i32 * cs, cs, cs);
                layer.draw_rect(r.inflate(-1, -1), GRID_LINE_COLOR, DrawMode::Outline);

                if self.config.show_grid_labels {
                    let size = Label::DEFAULT_FONT_SIZE;
                    if y == 0 {
                        layer.draw_label(&Label::new(x.to_string(), size), Point::new(r.x + 6, r.y + 6));
                    }
                    if x == last_col {
                        let at = if y == 0 {
                            Point::new(r.x + 12, r.y + 12)
                        } else {
                            Point::new(r.x + 6, r.y + 6)
                        };
                        layer.draw_label(&Label::new(y.to_string(), size), at);
                    }
                }

                if let Some(color) = cell {
                    layer.draw_rect(r.inflate(-4, -4), *color, DrawMode::Filled);
                }
            }
        }
        layer
    }

    /// Draw the whole game: counters, next piece, play field, current piece.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        let play = self.play_rect();
        let pad = self.config.padding as i32;
        let side_x = play.right() + pad;

        canvas.draw_rect(self.config.screen_rect(), BACKGROUND_COLOR, DrawMode::Filled);

        canvas.blit(&self.next.image(), Point::new(side_x, pad));

        let ticks = Label::new(format!("Ticks: {}", self.tick_count), COUNTER_FONT_SIZE);
        let pieces = Label::new(format!("Pieces: {}", self.piece_count), COUNTER_FONT_SIZE);
        canvas.draw_label(&ticks, Point::new(side_x, COUNTER_TOP));
        canvas.draw_label(&pieces, Point::new(side_x, COUNTER_TOP + ticks.height() + pad));

        canvas.draw_rect(play, PLAY_FIELD_COLOR, DrawMode::Filled);
        canvas.blit(&self.grid_image(), play.origin());
        self.current.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawOp;
    use crate::types::{Rgb, COLOR_CYCLE};

    const GRAY: Option<Rgb> = Some(Rgb::new(9, 9, 9));

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 12345).unwrap()
    }

    /// Tick until the current piece locks; returns (ticks taken, report).
    fn drop_until_locked(state: &mut GameSession) -> (u32, LockReport) {
        for n in 1..=100 {
            if let TickOutcome::Locked(report) = state.tick() {
                return (n, report);
            }
        }
        panic!("piece never locked");
    }

    #[test]
    fn test_new_session() {
        let state = session();
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.piece_count, 0);
        assert_eq!(state.seed(), 12345);
        assert_eq!(state.board.occupied_count(), 0);
        assert_eq!(state.current.origin(), Point::new(64, 16));
        assert_eq!(state.current.color(), COLOR_CYCLE[0]);
        assert_eq!(state.next.color(), COLOR_CYCLE[1]);
        assert!(!state.spawn_blocked());
    }

    #[test]
    fn test_new_rejects_unusable_config() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            GameSession::new(config, 1).err(),
            Some(ConfigError::CellSize(0))
        );

        let config = GameConfig {
            tiles_wide: 0,
            ..GameConfig::default()
        };
        assert!(GameSession::new(config, 1).is_err());
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = session();
        assert_eq!(state.tick(), TickOutcome::Fell);
        assert_eq!(state.current.y, 40);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn test_update_fires_tick_after_interval() {
        let mut state = session();
        assert_eq!(state.update(300), None);
        assert_eq!(state.update(1), Some(TickOutcome::Fell));
        assert_eq!(state.tick_count, 1);
        assert_eq!(state.update(16), None);
    }

    #[test]
    fn test_straight_locks_on_floor() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);

        let (ticks, report) = drop_until_locked(&mut state);

        assert_eq!(ticks, 17);
        assert_eq!(report.cells_written, 4);
        assert_eq!(report.cells_rejected, 0);
        assert!(report.cleared_rows.is_empty());
        assert_eq!(state.piece_count, 1);
        assert_eq!(state.board.occupied_count(), 4);
        for y in 16..20 {
            assert!(state.board.is_occupied(2, y), "row {}", y);
        }
    }

    #[test]
    fn test_lock_promotes_next_piece() {
        let mut state = session();
        let next = state.next;
        drop_until_locked(&mut state);
        assert_eq!(state.current, next);
        assert_eq!(state.next.color(), COLOR_CYCLE[2]);
        assert_eq!(state.next.origin(), state.config.spawn_origin());
    }

    #[test]
    fn test_piece_lands_on_stack() {
        let mut state = session();
        state.board_mut().set(2, 19, GRAY);
        state.set_current(ShapeKind::Straight);

        drop_until_locked(&mut state);

        for y in 15..19 {
            assert!(state.board.is_occupied(2, y), "row {}", y);
        }
        assert_eq!(state.board.occupied_count(), 5);
    }

    #[test]
    fn test_two_separate_rows_cleared_in_one_pass() {
        let mut state = session();
        {
            let board = state.board_mut();
            for x in 0..10 {
                if x != 2 {
                    board.set(x, 17, GRAY);
                    board.set(x, 19, GRAY);
                }
                if x != 2 && x != 5 {
                    board.set(x, 18, GRAY);
                }
            }
        }
        state.set_current(ShapeKind::Straight);

        let (_, report) = drop_until_locked(&mut state);

        assert_eq!(report.cleared_rows, vec![17, 19]);
        // Old row 18 (missing column 5) is now the bottom row,
        // old row 16 (only the piece's top cell) sits above it.
        assert_eq!(state.board.occupied_count(), 10);
        assert!(state.board.is_occupied(2, 18));
        assert!(!state.board.is_occupied(5, 19));
        assert!(state.board.is_occupied(2, 19));
        assert!(!state.board.is_row_full(19));
        assert_eq!(state.board.full_rows(), Vec::<usize>::new());
    }

    #[test]
    fn test_move_left_blocked_at_edge() {
        let mut state = session();
        state.set_current(ShapeKind::Square);

        assert!(state.apply_action(InputAction::MoveLeft));
        assert!(state.apply_action(InputAction::MoveLeft));
        assert_eq!(state.current.x, 16);

        assert!(!state.apply_action(InputAction::MoveLeft));
        assert_eq!(state.current.x, 16);

        assert!(state.apply_action(InputAction::MoveRight));
        assert_eq!(state.current.x, 40);
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut state = session();
        state.set_current(ShapeKind::Square);
        // Square covers columns 2-3 of rows 0-1.
        state.board_mut().set(4, 1, GRAY);
        assert!(!state.try_move(1, 0));
        assert_eq!(state.current.x, 64);
    }

    #[test]
    fn test_move_down_at_floor_does_not_lock() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);
        while state.try_move(0, 1) {}

        assert_eq!(state.current.y, 400);
        assert!(!state.apply_action(InputAction::MoveDown));
        assert_eq!(state.piece_count, 0);
        assert_eq!(state.board.occupied_count(), 0);
    }

    #[test]
    fn test_rotation_rejected_outside_play_field() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);
        while state.try_move(1, 0) {}
        assert_eq!(state.current.x, 232);

        let before = state.current;
        assert!(!state.apply_action(InputAction::RotateRight));
        assert_eq!(state.current, before);
    }

    #[test]
    fn test_rotation_rejected_by_locked_cell() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);
        // Lying flat on row 0 the straight would cover columns 2-5.
        state.board_mut().set(4, 0, GRAY);
        assert!(!state.try_rotate(RotateDirection::Right));
        assert_eq!(state.current.width(), 24);
    }

    #[test]
    fn test_rotation_applied_when_it_fits() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);
        assert!(state.apply_action(InputAction::RotateRight));
        assert_eq!((state.current.width(), state.current.height()), (96, 24));
        assert!(state.apply_action(InputAction::RotateLeft));
        assert_eq!((state.current.width(), state.current.height()), (24, 96));
    }

    #[test]
    fn test_spawn_blocked_hook() {
        let mut state = session();
        state.set_current(ShapeKind::Square);
        assert!(!state.spawn_blocked());
        state.board_mut().set(2, 0, GRAY);
        assert!(state.spawn_blocked());
    }

    #[test]
    fn test_lock_report_flags_blocked_spawn() {
        let mut state = session();
        // Stack a column up to row 2 under the spawn point, then drop onto it.
        for y in 2..20 {
            for x in 0..10 {
                if x != 9 {
                    state.board_mut().set(x, y, GRAY);
                }
            }
        }
        state.set_current(ShapeKind::Square);
        let (ticks, report) = drop_until_locked(&mut state);
        assert_eq!(ticks, 1);
        assert!(report.spawn_blocked);
        assert_eq!(state.piece_count, 1);
    }

    #[test]
    fn test_lock_skips_cells_outside_board() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);
        let piece = state.current;
        // Locking a piece that never fell puts its first cell at row -1.
        let report = state.lock(&piece);
        assert_eq!(report.cells_rejected, 1);
        assert_eq!(report.cells_written, 3);
        assert_eq!(state.board.occupied_count(), 3);
    }

    #[test]
    fn test_pixel_to_tile() {
        let state = session();
        assert_eq!(state.pixel_to_tile(Point::new(16, 16)), (0, 0));
        assert_eq!(state.pixel_to_tile(Point::new(64, -8)), (2, -1));
        assert_eq!(state.pixel_to_tile(Point::new(255, 495)), (9, 19));
    }

    #[test]
    fn test_reset() {
        let mut state = session();
        state.set_current(ShapeKind::Straight);
        drop_until_locked(&mut state);
        state.reset();
        assert_eq!(state.board.occupied_count(), 0);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.piece_count, 0);
    }

    #[test]
    fn test_draw_composes_layers() {
        let state = session();
        let mut frame = Layer::new(800, 600);
        state.draw(&mut frame);

        let ops = frame.ops();
        assert_eq!(
            ops[0],
            DrawOp::Rect {
                rect: Rect::new(0, 0, 800, 600),
                color: BACKGROUND_COLOR,
                mode: DrawMode::Filled,
            }
        );

        let labels: Vec<(&str, Point)> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Label { label, pos } => Some((label.text.as_str(), *pos)),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![("Ticks: 0", Point::new(272, 400)), ("Pieces: 0", Point::new(272, 452))]
        );

        // The current piece is drawn last, at its origin.
        let (last_rect, last_color) = match ops.last() {
            Some(DrawOp::Rect { rect, color, .. }) => (*rect, *color),
            other => panic!("unexpected last op {:?}", other),
        };
        assert_eq!(last_color, state.current.color());
        assert!(state.current.rect().contains(&last_rect));
    }

    #[test]
    fn test_grid_image_marks_locked_cells_and_labels() {
        let mut config = GameConfig::default();
        config.show_grid_labels = true;
        let mut state = GameSession::new(config, 1).unwrap();
        state.board_mut().set(0, 19, GRAY);

        let grid = state.grid_image();
        let fills: Vec<Rect> = grid
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect {
                    rect,
                    mode: DrawMode::Filled,
                    ..
                } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Rect::new(2, 458, 20, 20)]);

        let label_count = grid
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Label { .. }))
            .count();
        // 10 column numbers + 20 row numbers.
        assert_eq!(label_count, 30);
    }
}
