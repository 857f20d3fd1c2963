use crate::grid::GridRows;
use crate::piece::Piece;
use crate::progression::Progression;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Everything the presentation layer reads in one frame, by value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: GridRows,
    pub active: Option<Piece>,
    pub next: Piece,
    pub score: u32,
    pub elapsed_secs: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub running: bool,
    pub session_id: u32,
}

impl GameSnapshot {
    pub fn progression(&self) -> (u32, u32, u32, u32) {
        (self.score, self.elapsed_secs, self.level, self.drop_interval_ms)
    }

    pub fn game_over(&self) -> bool {
        !self.running
    }

    pub(crate) fn fill(
        &mut self,
        active: Option<Piece>,
        next: Piece,
        progression: &Progression,
        running: bool,
        session_id: u32,
    ) {
        self.active = active;
        self.next = next;
        self.score = progression.score();
        self.elapsed_secs = progression.elapsed_secs();
        self.level = progression.level();
        self.drop_interval_ms = progression.drop_interval_ms();
        self.running = running;
        self.session_id = session_id;
    }

    pub(crate) fn blank(next: Piece) -> Self {
        Self {
            grid: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            next,
            score: 0,
            elapsed_secs: 0,
            level: 1,
            drop_interval_ms: 0,
            running: false,
            session_id: 0,
        }
    }
}
