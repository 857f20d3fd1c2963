//! Piece factory - random shapes with a color-diversity rule
//!
//! Every occupied cell gets an independent random color, but a piece must not
//! carry three equal colors in a straight line of its own matrix. Offending
//! draws are re-rolled as a whole. The re-roll loop is capped at
//! [`MAX_COLOR_REROLLS`]; past the cap the last draw is kept.

use crate::piece::{ColorMatrix, Piece, Shape, MAX_DIM};
use crate::rng::SimpleRng;
use crate::types::{Palette, ShapeKind, MATCH_RUN_LEN, MAX_COLOR_REROLLS};

/// Seeded generator of colored tetrominoes
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    palette: Palette,
}

impl PieceFactory {
    pub fn new(seed: u32, palette: Palette) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            palette,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// RNG state; a factory built from it continues the same sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Generate a piece in spawn orientation at (0, 0)
    pub fn generate(&mut self) -> Piece {
        let kind = *self.rng.choose(&ShapeKind::ALL);
        let shape = Shape::base(kind);

        let mut colors = self.roll_colors(&shape);
        let mut rerolls = 0;
        while has_color_run(&shape, &colors) {
            if rerolls == MAX_COLOR_REROLLS {
                log::warn!(
                    "color re-roll cap ({}) reached for {} piece; keeping last draw",
                    MAX_COLOR_REROLLS,
                    kind.as_str()
                );
                break;
            }
            colors = self.roll_colors(&shape);
            rerolls += 1;
        }

        Piece::new(kind, colors)
    }

    fn roll_colors(&mut self, shape: &Shape) -> ColorMatrix {
        let palette = self.palette.colors();
        let mut colors = [[None; MAX_DIM]; MAX_DIM];
        for (r, c) in shape.occupied() {
            colors[r][c] = Some(*self.rng.choose(palette));
        }
        colors
    }
}

/// Whether the occupied cells of `shape` hold a straight run of
/// [`MATCH_RUN_LEN`] equal colors, horizontally or vertically.
pub fn has_color_run(shape: &Shape, colors: &ColorMatrix) -> bool {
    let rows = shape.rows() as usize;
    let cols = shape.cols() as usize;
    let at = |r: usize, c: usize| {
        if shape.is_occupied(r, c) {
            colors[r][c]
        } else {
            None
        }
    };

    let run_from = |r: usize, c: usize, dr: usize, dc: usize| {
        let Some(first) = at(r, c) else {
            return false;
        };
        (1..MATCH_RUN_LEN).all(|k| at(r + dr * k, c + dc * k) == Some(first))
    };

    for r in 0..rows {
        for c in 0..cols {
            if c + MATCH_RUN_LEN <= cols && run_from(r, c, 0, 1) {
                return true;
            }
            if r + MATCH_RUN_LEN <= rows && run_from(r, c, 1, 0) {
                return true;
            }
        }
    }
    false
}
