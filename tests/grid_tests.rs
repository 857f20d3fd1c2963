//! Grid and placement tests through the public facade

use tetjeweled::core::{placement, Grid, Piece};
use tetjeweled::types::{Color, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);

    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "cell ({}, {}) should be empty", x, y);
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new();

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, GRID_HEIGHT as i8), None);

    assert!(!grid.set(-1, 5, Some(Color::Red)));
    assert!(!grid.set(3, GRID_HEIGHT as i8, Some(Color::Red)));
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_rows_round_trip() {
    let mut grid = Grid::new();
    grid.set(0, 19, Some(Color::Purple));
    grid.set(9, 0, Some(Color::Orange));

    let rows = grid.to_rows();
    assert_eq!(rows[19][0], Some(Color::Purple));
    assert_eq!(rows[0][9], Some(Color::Orange));
    assert_eq!(Grid::from_rows(rows), grid);
}

#[test]
fn test_walls_and_floor_block_movement() {
    let grid = Grid::new();
    let piece = Piece::solid(ShapeKind::O, Color::Red).at(0, 18);

    assert!(!placement::can_move(&grid, &piece, -1, 0));
    assert!(!placement::can_move(&grid, &piece, 0, 1));
    assert!(placement::can_move(&grid, &piece, 1, 0));

    let right = Piece::solid(ShapeKind::I, Color::Red).at(6, 0);
    assert!(!placement::can_move(&grid, &right, 1, 0));
}

#[test]
fn test_cells_above_top_never_collide() {
    let grid = Grid::new();
    let piece = Piece::solid(ShapeKind::O, Color::Blue).at(3, -1);
    assert!(placement::can_move(&grid, &piece, 0, 0));
    assert!(placement::can_move(&grid, &piece, 0, -5));
}

#[test]
fn test_lock_writes_piece_colors() {
    let mut grid = Grid::new();
    let piece = Piece::solid(ShapeKind::T, Color::Yellow).at(2, 5);

    assert_eq!(placement::lock(&mut grid, &piece), 4);
    for (x, y, color) in piece.board_cells() {
        assert_eq!(grid.get(x, y), Some(Some(color)));
    }
    assert_eq!(grid.occupied_count(), 4);
}

#[test]
fn test_drop_distance_stops_on_stack() {
    let mut grid = Grid::new();
    grid.set(4, 15, Some(Color::Green));

    let piece = Piece::solid(ShapeKind::I, Color::Red).at(3, 0);
    assert_eq!(placement::drop_distance(&grid, &piece), 14);

    let clear = Piece::solid(ShapeKind::I, Color::Red).at(5, 0);
    assert_eq!(placement::drop_distance(&grid, &clear), 19);
}

#[test]
fn test_rotation_blocked_without_kicks() {
    let mut grid = Grid::new();
    let mut piece = Piece::solid(ShapeKind::I, Color::Red).at(0, 10);

    // Vertical I would need rows 10..=13 in column 0.
    grid.set(0, 12, Some(Color::Blue));
    assert!(!placement::rotate(&grid, &mut piece));
    assert_eq!(piece.shape().rows(), 1);

    grid.set(0, 12, None);
    assert!(placement::rotate(&grid, &mut piece));
    assert_eq!((piece.shape().rows(), piece.shape().cols()), (4, 1));
    assert_eq!((piece.x, piece.y), (0, 10));
}
