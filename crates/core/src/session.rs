//! Session module - the game state machine
//!
//! A [`Session`] owns the grid, the falling piece, the next-piece preview, the
//! piece factory, and the progression counters. The host drives it with
//! [`Session::tick`] (one drop step) and [`Session::advance_clock`] (one
//! second), and forwards user intents through [`Session::apply_action`].
//!
//! Once a spawn is blocked the session is over: every command becomes a
//! no-op until [`Session::reset`].

use crate::factory::PieceFactory;
use crate::grid::{Grid, GridRows};
use crate::piece::Piece;
use crate::placement;
use crate::progression::Progression;
use crate::resolver::{self, Resolution};
use crate::snapshot::GameSnapshot;
use crate::types::{ClearEvent, GameAction, Palette, ShapeKind, SPAWN_X, SPAWN_Y};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Running,
    GameOver,
}

/// What happened on the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSummary {
    pub kind: ShapeKind,
    /// Cells written into the grid (cells above the top edge are dropped)
    pub cells_written: u32,
    pub resolution: Resolution,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    active: Option<Piece>,
    next: Piece,
    factory: PieceFactory,
    progression: Progression,
    state: SessionState,
    /// Monotonic session id (increments on reset).
    session_id: u32,
    pieces_locked: u32,
    /// Clear events not yet consumed by the presentation layer. Hosts drain
    /// this every frame; at most one lock's worth (the whole grid) per command.
    clear_events: Vec<ClearEvent>,
    last_lock: Option<LockSummary>,
}

impl Session {
    /// Start a new session with the default palette
    pub fn new(seed: u32) -> Self {
        Self::with_palette(seed, Palette::default())
    }

    pub fn with_palette(seed: u32, palette: Palette) -> Self {
        Self::with_grid(seed, palette, Grid::new())
    }

    /// Start a session on a prepared grid.
    ///
    /// The grid is taken as-is: it is not resolved before the first spawn.
    pub fn with_grid(seed: u32, palette: Palette, grid: Grid) -> Self {
        let mut factory = PieceFactory::new(seed, palette);
        let next = factory.generate();

        let mut session = Self {
            grid,
            active: None,
            next,
            factory,
            progression: Progression::new(),
            state: SessionState::Running,
            session_id: 0,
            pieces_locked: 0,
            clear_events: Vec::new(),
            last_lock: None,
        };
        session.spawn_piece();
        log::info!("session started (seed {}, palette {:?})", seed, palette);
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn palette(&self) -> Palette {
        self.factory.palette()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_snapshot(&self) -> GridRows {
        self.grid.to_rows()
    }

    pub fn active_piece(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progression.drop_interval_ms()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.fill(
            self.active,
            self.next,
            &self.progression,
            self.is_running(),
            self.session_id,
        );
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::blank(self.next);
        self.snapshot_into(&mut s);
        s
    }

    /// Drain clear events produced since the last call.
    ///
    /// Events accumulate until drained, so a host that shows effects should
    /// call this once per frame.
    pub fn take_clear_events(&mut self) -> Vec<ClearEvent> {
        std::mem::take(&mut self.clear_events)
    }

    /// Take and clear the summary of the last lock.
    pub fn take_last_lock(&mut self) -> Option<LockSummary> {
        self.last_lock.take()
    }

    /// Promote the next piece to the spawn position and generate a new next.
    ///
    /// Returns false (and ends the session) if the spawned piece overlaps the
    /// grid. The blocked piece stays active so it can still be drawn.
    fn spawn_piece(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let upcoming = self.factory.generate();
        let piece = std::mem::replace(&mut self.next, upcoming).at(SPAWN_X, SPAWN_Y);
        self.active = Some(piece);

        if !placement::can_move(&self.grid, &piece, 0, 0) {
            self.state = SessionState::GameOver;
            log::info!(
                "game over: score {}, level {}, {}s, {} pieces",
                self.progression.score(),
                self.progression.level(),
                self.progression.elapsed_secs(),
                self.pieces_locked
            );
            return false;
        }
        true
    }

    /// Lock the active piece, resolve the grid, and spawn the next piece
    fn lock_piece(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = self.active.take() else {
            return;
        };

        let cells_written = placement::lock(&mut self.grid, &piece) as u32;
        let resolution = resolver::resolve(&mut self.grid, &mut self.clear_events);
        self.progression.add_score(resolution.score);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        log::debug!(
            "locked {} at ({}, {}): {} passes, +{} (score {})",
            piece.kind.as_str(),
            piece.x,
            piece.y,
            resolution.passes,
            resolution.score,
            self.progression.score()
        );

        self.last_lock = Some(LockSummary {
            kind: piece.kind,
            cells_written,
            resolution,
        });

        self.spawn_piece();
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if placement::can_move(&self.grid, &active, dx, dy) {
            self.active = Some(active.at(active.x + dx, active.y + dy));
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row; never locks
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Drop the active piece as far as it goes and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let distance = placement::drop_distance(&self.grid, &active);
        self.active = Some(active.at(active.x, active.y + distance));
        self.lock_piece();
        true
    }

    /// Rotate clockwise in place; no wall kicks
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(mut active) = self.active else {
            return false;
        };

        if placement::rotate(&self.grid, &mut active) {
            self.active = Some(active);
            return true;
        }
        false
    }

    /// One drop step: descend one row, or lock if blocked.
    ///
    /// Returns false when nothing happened (game over).
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        true
    }

    /// One clock second. Returns true if the level went up.
    pub fn advance_clock(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let leveled = self.progression.advance_clock();
        if leveled {
            log::info!(
                "level {} (drop interval {}ms)",
                self.progression.level(),
                self.progression.drop_interval_ms()
            );
        }
        leveled
    }

    /// Start over on an empty grid, continuing the RNG stream
    pub fn reset(&mut self) {
        let seed = self.factory.seed();
        let palette = self.factory.palette();
        let next_id = self.session_id.wrapping_add(1);
        *self = Self::with_palette(seed, palette);
        self.session_id = next_id;
    }

    /// Apply a user intent. Returns whether the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
