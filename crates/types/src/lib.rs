//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal view, and the input mapping alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the spawn row at the top)
//! - **Spawn position**: (4, 0), i.e. `GRID_WIDTH / 2 - 1`
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 500 | Drop interval at level 1 |
//! | `MIN_DROP_MS` | 100 | Drop interval floor |
//! | `LEVEL_SPEEDUP_MS` | 50 | Interval reduction per level |
//! | `CLOCK_TICK_MS` | 1000 | Progression clock period |
//! | `FRAME_MS` | 16 | Render/input poll period (~60 FPS) |
//! | `MATCH_POINTS_PER_CELL` | 50 | Points per color-matched cell |
//! | `LINE_POINTS_PER_CELL` | 500 | Points per full line |
//! | `LEVEL_UP_SCORE_STEP` | 10000 | Score per level threshold |
//!
//! # Examples
//!
//! ```
//! use tetjeweled_types::{Color, Palette, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//!
//! assert_eq!(Palette::Vivid.colors().len(), 6);
//! assert_eq!(Color::Blue.rgb(), (0x00, 0x74, 0xD9));
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Spawn column of a new active piece (`GRID_WIDTH / 2 - 1`)
pub const SPAWN_X: i8 = (GRID_WIDTH / 2) as i8 - 1;

/// Spawn row of a new active piece
pub const SPAWN_Y: i8 = 0;

/// Drop interval at level 1 (milliseconds per row)
pub const BASE_DROP_MS: u32 = 500;

/// Drop interval floor
pub const MIN_DROP_MS: u32 = 100;

/// Drop interval reduction per level above 1
pub const LEVEL_SPEEDUP_MS: u32 = 50;

/// Progression clock period (one real second)
pub const CLOCK_TICK_MS: u32 = 1000;

/// Frame period of the host loop (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Points per cell removed by a color match
pub const MATCH_POINTS_PER_CELL: u32 = 50;

/// Points per removed full line (50 * 10)
pub const LINE_POINTS_PER_CELL: u32 = 500;

/// A level is gained once the score exceeds `level * LEVEL_UP_SCORE_STEP`
pub const LEVEL_UP_SCORE_STEP: u32 = 10_000;

/// Minimum run length that counts as a color match
pub const MATCH_RUN_LEN: usize = 3;

/// Upper bound on color re-rolls for a single generated piece
pub const MAX_COLOR_REROLLS: u32 = 1000;

/// Block colors
///
/// The vivid palette uses all six; the classic palette uses four of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// Every color, in palette order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Hex code of the color (`#RRGGBB`)
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#FF4136",
            Color::Orange => "#FF851B",
            Color::Yellow => "#FFDC00",
            Color::Green => "#2ECC40",
            Color::Blue => "#0074D9",
            Color::Purple => "#B10DC9",
        }
    }

    /// 24-bit RGB components, decoded from [`Color::hex`]
    pub fn rgb(&self) -> (u8, u8, u8) {
        hex_to_rgb(self.hex())
    }

}

/// Convert a `#RRGGBB` code to RGB components.
///
/// Anything malformed maps to black so display code never has to handle a
/// missing color.
///
/// ```
/// use tetjeweled_types::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#FF851B"), (255, 133, 27));
/// assert_eq!(hex_to_rgb("nope"), (0, 0, 0));
/// ```
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    const NEUTRAL: (u8, u8, u8) = (0, 0, 0);

    let Some(digits) = hex.strip_prefix('#') else {
        return NEUTRAL;
    };
    if digits.len() != 6 || !digits.is_ascii() {
        return NEUTRAL;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => (r, g, b),
        _ => NEUTRAL,
    }
}

/// Color sets the piece factory draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    /// Six colors (red, orange, yellow, green, blue, purple)
    #[default]
    Vivid,
    /// Four colors (red, yellow, green, blue); matches come more often
    Classic,
}

impl Palette {
    pub fn colors(&self) -> &'static [Color] {
        const VIVID: [Color; 6] = Color::ALL;
        const CLASSIC: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
        match self {
            Palette::Vivid => &VIVID,
            Palette::Classic => &CLASSIC,
        }
    }
}

/// The five base tetromino shapes
///
/// - **I**: 1x4 bar
/// - **O**: 2x2 square
/// - **T**: three across, one below the middle
/// - **L**: three across, one below the left end
/// - **J**: three across, one below the right end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Uppercase letter, used in logs and the terminal view
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
        }
    }
}

/// Player intents
///
/// Produced by the key map and applied to the session. Every intent is a
/// no-op once the session is over, except `Restart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row down (never locks)
    SoftDrop,
    /// Drop piece as far as it goes and lock it
    HardDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Start a new session
    Restart,
}


/// Which rule removed a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearKind {
    /// Part of a run of three or more equal colors
    Match,
    /// Part of a full row
    Line,
}


/// Notification for one removed cell
///
/// Emitted by the resolver so the presentation can play its own fade effect.
/// `row`/`col` are the cell's position at the moment it was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearEvent {
    pub row: u8,
    pub col: u8,
    pub color: Color,
    pub kind: ClearKind,
}

/// A cell on the grid
///
/// - `None`: empty
/// - `Some(Color)`: a settled block
pub type Cell = Option<Color>;
