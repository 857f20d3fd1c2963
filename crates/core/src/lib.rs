//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block color-match game. It has
//! no dependency on terminals or I/O and reads no clock, so the same seed and
//! the same command sequence always produce the same game.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 grid of colored cells
//! - [`piece`]: tetromino shapes with a per-cell color matrix, rotation
//! - [`factory`]: seeded piece generation with the no-three-in-a-row color rule
//! - [`placement`]: collision, movement, rotation, and locking
//! - [`resolver`]: color-run and full-line detection, cascades
//! - [`gravity`]: per-column compaction after removals
//! - [`progression`]: score, time, level, and drop speed
//! - [`clock`]: host-driven drop and clock tickers
//! - [`session`]: the state machine that ties everything together
//! - [`rng`]: small deterministic LCG
//!
//! # Game Rules
//!
//! - Every cell of a piece has its own color; a piece never carries three
//!   equal colors in a straight line.
//! - After a lock, runs of three or more equal colors (horizontal or
//!   vertical) and full rows are removed in the same pass. Blocks then fall
//!   straight down within their column, which may trigger further passes.
//! - Match cells score 50 each, full lines 500 each.
//! - Each clock second the level goes up once if the score exceeds
//!   `level * 10000`; the drop interval shrinks by 50ms to a 100ms floor.
//!
//! # Example
//!
//! ```
//! use tetjeweled_core::Session;
//! use tetjeweled_types::GameAction;
//!
//! let mut game = Session::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.is_running());
//! assert_eq!(game.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! The host owns time. Feed elapsed milliseconds to a [`Scheduler`] and run
//! [`Session::tick`] once per due drop and [`Session::advance_clock`] once per
//! due second.

pub mod clock;
pub mod factory;
pub mod gravity;
pub mod grid;
pub mod piece;
pub mod placement;
pub mod progression;
pub mod resolver;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tetjeweled_types as types;

pub use clock::{Due, Scheduler, Ticker};
pub use factory::PieceFactory;
pub use grid::{Grid, GridRows};
pub use piece::{ColorMatrix, Piece, Shape};
pub use progression::Progression;
pub use resolver::{ClearSet, FullLines, Resolution};
pub use rng::SimpleRng;
pub use session::{LockSummary, Session, SessionState};
pub use snapshot::GameSnapshot;
