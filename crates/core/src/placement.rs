//! Placement module - collision checks, rotation, and locking
//!
//! Cells above the top edge (negative y) never collide, so pieces can spawn or
//! rotate partly out of view. Rotation has no wall kicks: a rotation that does
//! not fit at the current anchor is simply refused.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Whether `piece` shifted by (dx, dy) fits on the grid
pub fn can_move(grid: &Grid, piece: &Piece, dx: i8, dy: i8) -> bool {
    piece.shape().occupied().all(|(row, col)| {
        let x = piece.x as i16 + col as i16 + dx as i16;
        let y = piece.y as i16 + row as i16 + dy as i16;
        if x < 0 || x >= GRID_WIDTH as i16 || y >= GRID_HEIGHT as i16 {
            return false;
        }
        y < 0 || !grid.is_occupied(x as i8, y as i8)
    })
}

/// Rotate `piece` clockwise in place if the result fits at the same anchor.
///
/// Returns false (leaving the piece untouched) when the rotation is blocked.
pub fn rotate(grid: &Grid, piece: &mut Piece) -> bool {
    let turned = piece.rotated();
    if can_move(grid, &turned, 0, 0) {
        *piece = turned;
        true
    } else {
        false
    }
}

/// Number of rows `piece` can fall before it rests
pub fn drop_distance(grid: &Grid, piece: &Piece) -> i8 {
    let mut distance = 0;
    while can_move(grid, piece, 0, distance + 1) {
        distance += 1;
    }
    distance
}

/// Copy the piece's colors into the grid.
///
/// Cells above the top edge are dropped. Returns how many cells were written.
pub fn lock(grid: &mut Grid, piece: &Piece) -> usize {
    let mut written = 0;
    for (x, y, color) in piece.board_cells() {
        if y >= 0 && grid.set(x, y, Some(color)) {
            written += 1;
        }
    }
    written
}
