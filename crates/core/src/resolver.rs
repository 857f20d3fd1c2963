//! Resolver module - color matches, full lines, and cascades
//!
//! Two rules run side by side after every lock:
//!
//! - **Match**: any cell in a horizontal or vertical run of three or more equal
//!   colors is removed (50 points per cell).
//! - **Line**: any completely filled row is removed and everything above it
//!   shifts down (500 points per line), whether or not it also holds a match.
//!
//! Detection is pure ([`find_matches`], [`find_full_lines`]); [`resolve_pass`]
//! applies one round of removals followed by gravity, and [`resolve`] repeats
//! passes until the grid is stable. Every pass removes at least one block, so
//! the cascade always terminates.

use arrayvec::ArrayVec;

use crate::gravity;
use crate::grid::Grid;
use crate::progression::{line_score, match_score};
use crate::types::{ClearEvent, ClearKind, GRID_HEIGHT, GRID_WIDTH, MATCH_RUN_LEN};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Full rows found in one pass, bottom-most first
pub type FullLines = ArrayVec<usize, HEIGHT>;

/// Set of grid coordinates marked for removal during one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearSet {
    mask: [[bool; WIDTH]; HEIGHT],
    len: usize,
}

impl ClearSet {
    pub fn new() -> Self {
        Self {
            mask: [[false; WIDTH]; HEIGHT],
            len: 0,
        }
    }

    /// Mark a cell; returns false if it was already marked
    pub fn insert(&mut self, row: usize, col: usize) -> bool {
        if self.mask[row][col] {
            return false;
        }
        self.mask[row][col] = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < HEIGHT && col < WIDTH && self.mask[row][col]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Marked (row, col) pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..HEIGHT).flat_map(move |r| {
            (0..WIDTH)
                .filter(move |&c| self.mask[r][c])
                .map(move |c| (r, c))
        })
    }
}

impl Default for ClearSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a single resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassResult {
    pub matched_cells: u32,
    pub lines_cleared: u32,
    pub score: u32,
}

/// Totals over a full cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Passes that removed something
    pub passes: u32,
    pub matched_cells: u32,
    pub lines_cleared: u32,
    pub score: u32,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.passes == 0
    }
}

/// Every cell belonging to a run of [`MATCH_RUN_LEN`]+ equal colors.
///
/// Horizontal and vertical runs are found independently; a cell in both is
/// marked once.
pub fn find_matches(grid: &Grid) -> ClearSet {
    let mut set = ClearSet::new();

    // Horizontal windows
    for row in 0..HEIGHT {
        for col in 0..=WIDTH - MATCH_RUN_LEN {
            if window_matches(grid, row, col, 0, 1) {
                for k in 0..MATCH_RUN_LEN {
                    set.insert(row, col + k);
                }
            }
        }
    }

    // Vertical windows
    for col in 0..WIDTH {
        for row in 0..=HEIGHT - MATCH_RUN_LEN {
            if window_matches(grid, row, col, 1, 0) {
                for k in 0..MATCH_RUN_LEN {
                    set.insert(row + k, col);
                }
            }
        }
    }

    set
}

fn window_matches(grid: &Grid, row: usize, col: usize, dr: usize, dc: usize) -> bool {
    let Some(first) = grid.at(col, row) else {
        return false;
    };
    (1..MATCH_RUN_LEN).all(|k| grid.at(col + dc * k, row + dr * k) == Some(first))
}

/// Indices of completely filled rows, bottom-most first
pub fn find_full_lines(grid: &Grid) -> FullLines {
    (0..HEIGHT).rev().filter(|&y| grid.is_row_full(y)).collect()
}

/// Run one pass: remove matches, remove full lines, then apply gravity.
///
/// Both rules are evaluated on the grid as it was at the start of the pass.
/// Removed cells are reported to `events`. Returns `None` when there was
/// nothing to remove (the grid is untouched in that case).
pub fn resolve_pass(grid: &mut Grid, events: &mut Vec<ClearEvent>) -> Option<PassResult> {
    let matches = find_matches(grid);
    let lines = find_full_lines(grid);
    if matches.is_empty() && lines.is_empty() {
        return None;
    }

    for (row, col) in matches.iter() {
        if let Some(color) = grid.at(col, row) {
            events.push(ClearEvent {
                row: row as u8,
                col: col as u8,
                color,
                kind: ClearKind::Match,
            });
            grid.put(col, row, None);
        }
    }

    // Cells already taken by a match stay reported as matches only.
    for &row in &lines {
        for col in 0..WIDTH {
            if let Some(color) = grid.at(col, row) {
                events.push(ClearEvent {
                    row: row as u8,
                    col: col as u8,
                    color,
                    kind: ClearKind::Line,
                });
            }
        }
    }
    grid.remove_rows(&lines);

    gravity::compact(grid);

    let matched_cells = matches.len() as u32;
    let lines_cleared = lines.len() as u32;
    Some(PassResult {
        matched_cells,
        lines_cleared,
        score: match_score(matched_cells).saturating_add(line_score(lines_cleared)),
    })
}

/// Resolve passes until the grid has no matches and no full lines.
pub fn resolve(grid: &mut Grid, events: &mut Vec<ClearEvent>) -> Resolution {
    let mut total = Resolution::default();

    while let Some(pass) = resolve_pass(grid, events) {
        total.passes += 1;
        total.matched_cells += pass.matched_cells;
        total.lines_cleared += pass.lines_cleared;
        total.score = total.score.saturating_add(pass.score);

        log::debug!(
            "cascade pass {}: {} matched, {} lines, +{}",
            total.passes,
            pass.matched_cells,
            pass.lines_cleared,
            pass.score
        );
    }

    total
}

/// Whether the grid is stable (no match and no full line)
pub fn is_stable(grid: &Grid) -> bool {
    find_matches(grid).is_empty() && find_full_lines(grid).is_empty()
}
