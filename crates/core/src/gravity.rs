//! Gravity module - re-settles floating cells after removals
//!
//! Each column is compacted independently: remaining blocks keep their
//! relative order and slide down until nothing is empty beneath them.

use crate::grid::Grid;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Pull every column's blocks down to fill gaps.
///
/// Returns true if any cell moved. Compacting a compacted grid is a no-op.
pub fn compact(grid: &mut Grid) -> bool {
    let mut moved = false;
    for col in 0..GRID_WIDTH as usize {
        moved |= compact_column(grid, col);
    }
    moved
}

fn compact_column(grid: &mut Grid, col: usize) -> bool {
    let mut moved = false;
    // Next free slot, scanning bottom-up.
    let mut write = GRID_HEIGHT as usize;

    for read in (0..GRID_HEIGHT as usize).rev() {
        let Some(color) = grid.at(col, read) else {
            continue;
        };
        write -= 1;
        if write != read {
            grid.put(col, write, Some(color));
            grid.put(col, read, None);
            moved = true;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_compact_empty_grid_is_noop() {
        let mut grid = Grid::new();
        assert!(!compact(&mut grid));
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_floating_cell_falls_to_floor() {
        let mut grid = Grid::new();
        grid.set(3, 5, Some(Color::Red));

        assert!(compact(&mut grid));
        assert_eq!(grid.get(3, 5), Some(None));
        assert_eq!(grid.get(3, 19), Some(Some(Color::Red)));
    }

    #[test]
    fn test_compaction_preserves_column_order() {
        let mut grid = Grid::new();
        grid.set(0, 2, Some(Color::Red));
        grid.set(0, 7, Some(Color::Green));
        grid.set(0, 8, Some(Color::Blue));
        grid.set(0, 15, Some(Color::Yellow));
        grid.set(0, 19, Some(Color::Purple));

        let before: Vec<Color> = grid.column_colors(0).collect();
        compact(&mut grid);
        let after: Vec<Color> = grid.column_colors(0).collect();

        assert_eq!(before, after);
        for y in 0..15 {
            assert_eq!(grid.get(0, y), Some(None));
        }
        assert_eq!(grid.get(0, 15), Some(Some(Color::Red)));
        assert_eq!(grid.get(0, 19), Some(Some(Color::Purple)));
    }

    #[test]
    fn test_compaction_is_idempotent() {
        let mut grid = Grid::new();
        grid.set(1, 0, Some(Color::Red));
        grid.set(1, 10, Some(Color::Red));
        grid.set(6, 4, Some(Color::Orange));

        compact(&mut grid);
        let once = grid.clone();
        assert!(!compact(&mut grid));
        assert_eq!(grid, once);
    }

    #[test]
    fn test_columns_are_independent() {
        let mut grid = Grid::new();
        grid.set(2, 19, Some(Color::Red));
        grid.set(3, 0, Some(Color::Blue));

        compact(&mut grid);
        assert_eq!(grid.get(2, 19), Some(Some(Color::Red)));
        assert_eq!(grid.get(3, 19), Some(Some(Color::Blue)));
        assert_eq!(grid.occupied_count(), 2);
    }
}
