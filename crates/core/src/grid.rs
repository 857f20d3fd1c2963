//! Grid module - the settled-block store
//!
//! The grid is a 10x20 matrix where each cell is empty or holds a color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::types::{Cell, Color, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Row-major 2D view of the grid, as handed to the presentation layer
pub type GridRows = [[Cell; WIDTH]; HEIGHT];

/// The game grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a grid from rows (row 0 is the top)
    pub fn from_rows(rows: GridRows) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            grid.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Color at an in-bounds (column, row) pair
    #[inline(always)]
    pub(crate) fn at(&self, col: usize, row: usize) -> Cell {
        self.cells[row * WIDTH + col]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, col: usize, row: usize, cell: Cell) {
        self.cells[row * WIDTH + col] = cell;
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Delete the given rows and insert as many empty rows at the top.
    ///
    /// Rows above a deleted row move down; rows below stay put. Indices refer
    /// to the grid before removal, in any order. Two-pointer pass, no allocation.
    /// Returns the number of rows removed.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let mut write_y = HEIGHT;
        let mut removed = 0;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                // copy_within handles overlapping ranges safely
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * WIDTH].fill(None);

        removed
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Colors of one column from top to bottom, skipping empties
    pub fn column_colors(&self, x: usize) -> impl Iterator<Item = Color> + '_ {
        (0..HEIGHT).filter_map(move |y| self.at(x, y))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid out as rows (row 0 is the top)
    pub fn to_rows(&self) -> GridRows {
        let mut out = [[None; WIDTH]; HEIGHT];
        self.write_rows(&mut out);
        out
    }

    /// Copy the grid into an existing row buffer (allocation-free)
    pub fn write_rows(&self, out: &mut GridRows) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
