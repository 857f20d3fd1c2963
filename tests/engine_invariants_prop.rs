//! Property tests for engine invariants.
//!
//! - Resolution converges within `GRID_HEIGHT` passes: no runs and no full
//!   rows remain, and every pass removes at least one cell.
//! - Resolution score equals 50 per matched cell plus 500 per line.
//! - Gravity keeps each column's color order and is idempotent.
//! - Under any command sequence the score never decreases, every occupied
//!   cell holds a palette color, and the active piece stays in bounds.
//! - Four rotations restore a piece.

use proptest::prelude::*;
use tetjeweled::core::{gravity, placement, resolver, Grid, PieceFactory, Session};
use tetjeweled::types::{Color, GameAction, Palette, GRID_HEIGHT, GRID_WIDTH};

fn grid_strategy() -> impl Strategy<Value = Grid> {
    let cells = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);
    proptest::collection::vec(proptest::option::weighted(0.6, 0usize..4), cells).prop_map(
        |cells| {
            let mut grid = Grid::new();
            for (i, cell) in cells.into_iter().enumerate() {
                let x = (i % GRID_WIDTH as usize) as i8;
                let y = (i / GRID_WIDTH as usize) as i8;
                grid.set(x, y, cell.map(|c| Color::ALL[c]));
            }
            grid
        },
    )
}

fn action_strategy() -> impl Strategy<Value = Option<GameAction>> {
    prop_oneof![
        Just(Some(GameAction::MoveLeft)),
        Just(Some(GameAction::MoveRight)),
        Just(Some(GameAction::SoftDrop)),
        Just(Some(GameAction::HardDrop)),
        Just(Some(GameAction::Rotate)),
        // None stands for one drop tick plus one clock second.
        Just(None),
    ]
}

proptest! {
    #[test]
    fn resolution_converges(mut grid in grid_strategy()) {
        let occupied = grid.occupied_count() as u32;
        let mut events = Vec::new();
        let res = resolver::resolve(&mut grid, &mut events);

        prop_assert!(resolver::is_stable(&grid));
        prop_assert!(res.passes <= GRID_HEIGHT as u32);
        prop_assert!(res.passes <= occupied);
        prop_assert_eq!(
            res.score,
            res.matched_cells * 50 + res.lines_cleared * 500
        );
        prop_assert_eq!(
            events.len() as u32,
            occupied - grid.occupied_count() as u32
        );

        // Every pass ends with gravity, so nothing floats after a removal.
        if !res.is_empty() {
            let mut settled = grid.clone();
            prop_assert!(!gravity::compact(&mut settled));
        }
    }

    #[test]
    fn gravity_preserves_columns(mut grid in grid_strategy()) {
        let before: Vec<Vec<Color>> = (0..GRID_WIDTH as usize)
            .map(|x| grid.column_colors(x).collect())
            .collect();

        gravity::compact(&mut grid);
        let after: Vec<Vec<Color>> = (0..GRID_WIDTH as usize)
            .map(|x| grid.column_colors(x).collect())
            .collect();
        prop_assert_eq!(&before, &after);

        // Empties only above blocks.
        for x in 0..GRID_WIDTH as i8 {
            let mut seen_block = false;
            for y in 0..GRID_HEIGHT as i8 {
                let occupied = grid.is_occupied(x, y);
                prop_assert!(!(seen_block && !occupied));
                seen_block |= occupied;
            }
        }

        let once = grid.clone();
        prop_assert!(!gravity::compact(&mut grid));
        prop_assert_eq!(grid, once);
    }

    #[test]
    fn commands_respect_invariants(
        seed in any::<u32>(),
        classic in any::<bool>(),
        actions in proptest::collection::vec(action_strategy(), 1..200),
    ) {
        let palette = if classic { Palette::Classic } else { Palette::Vivid };
        let mut session = Session::with_palette(seed, palette);
        let mut score = session.score();

        for action in actions {
            match action {
                Some(action) => {
                    session.apply_action(action);
                }
                None => {
                    session.tick();
                    session.advance_clock();
                }
            }

            prop_assert!(session.score() >= score);
            score = session.score();

            for color in session.grid().cells().iter().flatten() {
                prop_assert!(palette.colors().contains(color));
            }
            for event in session.take_clear_events() {
                prop_assert!(palette.colors().contains(&event.color));
                prop_assert!(event.row < GRID_HEIGHT && event.col < GRID_WIDTH);
            }

            if let Some(active) = session.active_piece() {
                for (x, y, color) in active.board_cells() {
                    prop_assert!((0..GRID_WIDTH as i8).contains(&x));
                    prop_assert!(y < GRID_HEIGHT as i8);
                    prop_assert!(palette.colors().contains(&color));
                }
                if session.is_running() {
                    prop_assert!(placement::can_move(session.grid(), &active, 0, 0));
                }
            }

            if session.is_running() {
                prop_assert!(resolver::is_stable(session.grid()));
            }
        }
    }

    #[test]
    fn four_rotations_restore_piece(seed in any::<u32>()) {
        let mut factory = PieceFactory::new(seed, Palette::Vivid);
        let piece = factory.generate().at(3, 3);
        let grid = Grid::new();

        let mut turned = piece;
        for _ in 0..4 {
            prop_assert!(placement::rotate(&grid, &mut turned));
        }
        prop_assert_eq!(turned, piece);
    }
}
