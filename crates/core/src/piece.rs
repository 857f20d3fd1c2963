//! Pieces module - tetromino shapes and their per-cell colors
//!
//! A piece is a small rectangular matrix (at most 4x4). Occupied cells carry a
//! color; the occupancy pattern is the piece's [`Shape`]. Rotation turns the
//! matrix 90° clockwise around its top-left anchor, colors included.

use crate::types::{Color, ShapeKind};

/// Largest side of any shape matrix
pub const MAX_DIM: usize = 4;

/// Per-cell colors of a piece; `None` marks an unoccupied cell
pub type ColorMatrix = [[Option<Color>; MAX_DIM]; MAX_DIM];

/// Occupancy matrix of a tetromino in one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    mask: [[bool; MAX_DIM]; MAX_DIM],
}

impl Shape {
    /// Spawn orientation of a base shape
    pub fn base(kind: ShapeKind) -> Self {
        let pattern: &[&[u8]] = match kind {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            ShapeKind::L => &[&[1, 1, 1], &[1, 0, 0]],
            ShapeKind::J => &[&[1, 1, 1], &[0, 0, 1]],
        };
        let mut mask = [[false; MAX_DIM]; MAX_DIM];
        for (r, row) in pattern.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                mask[r][c] = bit == 1;
            }
        }
        Self {
            rows: pattern.len() as u8,
            cols: pattern[0].len() as u8,
            mask,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether (row, col) is an occupied cell; false outside the matrix
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.mask[row][col]
    }

    /// Occupied (row, col) offsets in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.mask[r][c])
                .map(move |c| (r, c))
        })
    }
}

/// A tetromino with colors, positioned on the grid by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub x: i8,
    pub y: i8,
    shape: Shape,
    colors: ColorMatrix,
}

impl Piece {
    /// Build a piece in spawn orientation at (0, 0).
    ///
    /// `colors` must hold a color for every occupied cell of the base shape;
    /// entries for unoccupied cells are ignored.
    pub fn new(kind: ShapeKind, colors: ColorMatrix) -> Self {
        let shape = Shape::base(kind);
        let mut masked = [[None; MAX_DIM]; MAX_DIM];
        for (r, c) in shape.occupied() {
            debug_assert!(colors[r][c].is_some(), "occupied cell without color");
            masked[r][c] = colors[r][c];
        }
        Self {
            kind,
            x: 0,
            y: 0,
            shape,
            colors: masked,
        }
    }

    /// Build a piece whose occupied cells all share one color
    pub fn solid(kind: ShapeKind, color: Color) -> Self {
        Self::new(kind, [[Some(color); MAX_DIM]; MAX_DIM])
    }

    /// Same piece moved to an anchor
    pub fn at(mut self, x: i8, y: i8) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Color matrix (same dimensions as the shape)
    pub fn colors(&self) -> &ColorMatrix {
        &self.colors
    }

    /// Color of an occupied cell
    pub fn color_at(&self, row: usize, col: usize) -> Option<Color> {
        if self.shape.is_occupied(row, col) {
            self.colors[row][col]
        } else {
            None
        }
    }

    /// Occupied cells as (row offset, col offset, color)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.shape
            .occupied()
            .filter_map(move |(r, c)| self.colors[r][c].map(|color| (r, c, color)))
    }

    /// Absolute board coordinates (x, y, color) of every occupied cell
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8, Color)> + '_ {
        self.cells()
            .map(move |(r, c, color)| (self.x + c as i8, self.y + r as i8, color))
    }

    /// The piece turned 90° clockwise about its anchor.
    ///
    /// `new[col][rows - 1 - row] = old[row][col]`, so width and height swap.
    /// The anchor is unchanged; callers decide whether the result fits.
    pub fn rotated(&self) -> Self {
        let rows = self.shape.rows as usize;
        let cols = self.shape.cols as usize;

        let mut mask = [[false; MAX_DIM]; MAX_DIM];
        let mut colors = [[None; MAX_DIM]; MAX_DIM];
        for r in 0..rows {
            for c in 0..cols {
                mask[c][rows - 1 - r] = self.shape.mask[r][c];
                colors[c][rows - 1 - r] = self.colors[r][c];
            }
        }

        Self {
            shape: Shape {
                rows: cols as u8,
                cols: rows as u8,
                mask,
            },
            colors,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclic_colors() -> ColorMatrix {
        let mut m = [[None; MAX_DIM]; MAX_DIM];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = Some(Color::ALL[(r * MAX_DIM + c) % Color::ALL.len()]);
            }
        }
        m
    }

    #[test]
    fn every_base_shape_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(Shape::base(kind).occupied().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn base_dimensions() {
        let dims = |k| {
            let s = Shape::base(k);
            (s.rows(), s.cols())
        };
        assert_eq!(dims(ShapeKind::I), (1, 4));
        assert_eq!(dims(ShapeKind::O), (2, 2));
        assert_eq!(dims(ShapeKind::T), (2, 3));
        assert_eq!(dims(ShapeKind::L), (2, 3));
        assert_eq!(dims(ShapeKind::J), (2, 3));
    }

    #[test]
    fn unoccupied_cells_never_carry_color() {
        let piece = Piece::new(ShapeKind::T, cyclic_colors());
        assert_eq!(piece.color_at(1, 0), None);
        assert_eq!(piece.color_at(1, 2), None);
        assert!(piece.color_at(1, 1).is_some());
        assert_eq!(piece.colors()[1][0], None);
    }

    #[test]
    fn rotating_i_turns_bar_vertical() {
        let piece = Piece::new(ShapeKind::I, cyclic_colors());
        let turned = piece.rotated();

        assert_eq!((turned.shape().rows(), turned.shape().cols()), (4, 1));
        // Old row 0 becomes the single column, read top to bottom.
        for i in 0..4 {
            assert_eq!(turned.color_at(i, 0), piece.color_at(0, i));
        }
    }

    #[test]
    fn rotating_t_follows_clockwise_mapping() {
        let piece = Piece::new(ShapeKind::T, cyclic_colors());
        let turned = piece.rotated();

        // T (2x3) -> 3x2:
        // [1,1,1]     [0,1]
        // [0,1,0]  -> [1,1]
        //             [0,1]
        assert_eq!((turned.shape().rows(), turned.shape().cols()), (3, 2));
        assert!(!turned.shape().is_occupied(0, 0));
        assert!(turned.shape().is_occupied(0, 1));
        assert!(turned.shape().is_occupied(1, 0));
        assert!(turned.shape().is_occupied(1, 1));
        assert!(turned.shape().is_occupied(2, 1));

        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(turned.color_at(c, 1 - r), piece.color_at(r, c));
            }
        }
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let piece = Piece::new(kind, cyclic_colors()).at(3, 5);
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back, piece, "{kind:?}");
        }
    }

    #[test]
    fn board_cells_are_offset_by_anchor() {
        let piece = Piece::solid(ShapeKind::O, Color::Red).at(4, -1);
        let cells: Vec<_> = piece.board_cells().collect();
        assert_eq!(
            cells,
            vec![
                (4, -1, Color::Red),
                (5, -1, Color::Red),
                (4, 0, Color::Red),
                (5, 0, Color::Red),
            ]
        );
    }
}
