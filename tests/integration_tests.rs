//! Integration tests for the session and its host-driven loop

use crossterm::event::{KeyCode, KeyEvent};
use tetjeweled::core::{placement, Grid, Progression, Scheduler, Session, SessionState};
use tetjeweled::input::handle_key_event;
use tetjeweled::types::{
    Color, GameAction, Palette, FRAME_MS, GRID_HEIGHT, GRID_WIDTH, SPAWN_X, SPAWN_Y,
};

fn blocked_grid() -> Grid {
    let mut grid = Grid::new();
    for y in 0..2 {
        for x in 0..10 {
            let color = [Color::Red, Color::Blue][((x / 2 + x) % 2) as usize];
            grid.set(x, y, Some(color));
        }
    }
    grid
}

#[test]
fn test_game_lifecycle() {
    let mut session = Session::new(12345);
    assert_eq!(session.state(), SessionState::Running);
    assert!(session.active_piece().is_some());

    // Five pieces stack at most ten rows high, well clear of the spawn rows.
    for _ in 0..5 {
        assert!(session.hard_drop());
    }
    assert_eq!(session.pieces_locked(), 5);
    assert!(session.is_running());
}

#[test]
fn test_top_rows_occupied_blocks_spawn() {
    let session = Session::with_grid(7, Palette::Vivid, blocked_grid());
    assert_eq!(session.state(), SessionState::GameOver);

    let active = session.active_piece().unwrap();
    assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
    assert!(!placement::can_move(session.grid(), &active, 0, 0));
}

#[test]
fn test_restart_after_game_over() {
    let mut session = Session::with_grid(7, Palette::Classic, blocked_grid());
    assert!(!session.apply_action(GameAction::HardDrop));

    assert!(session.apply_action(GameAction::Restart));
    assert!(session.is_running());
    assert_eq!(session.session_id(), 1);
    assert_eq!(session.grid().occupied_count(), 0);
    assert_eq!(session.palette(), Palette::Classic);
}

#[test]
fn test_level_threshold_scenario() {
    let mut p = Progression::new().with_score(10_001);
    assert_eq!(p.level(), 1);
    assert!(p.advance_clock());
    assert_eq!(p.level(), 2);
    assert_eq!(p.drop_interval_ms(), 450);
}

#[test]
fn test_scheduler_drives_session() {
    let mut session = Session::new(2024);
    let mut scheduler = Scheduler::new(session.drop_interval_ms());

    // Ten seconds of 16ms frames with no input.
    for _ in 0..10_000 / FRAME_MS {
        let due = scheduler.advance(FRAME_MS);
        for _ in 0..due.seconds {
            session.advance_clock();
        }
        for _ in 0..due.drops {
            session.tick();
        }
        scheduler.set_drop_interval(session.drop_interval_ms());
    }

    // 20 drop steps: the first piece falls to the floor and locks.
    assert_eq!(session.progression().elapsed_secs(), 10);
    assert_eq!(session.pieces_locked(), 1);
    assert!(session.is_running());
}

#[test]
fn test_scheduler_cancelled_on_game_over() {
    let mut session = Session::with_grid(1, Palette::Vivid, blocked_grid());
    let mut scheduler = Scheduler::new(session.drop_interval_ms());
    if !session.is_running() {
        scheduler.cancel();
    }

    assert!(scheduler.advance(60_000).is_empty());
    assert_eq!(scheduler.next_due_ms(), None);

    session.reset();
    let mut fresh = Scheduler::new(session.drop_interval_ms());
    assert_eq!(fresh.advance(500).drops, 1);
}

#[test]
fn test_keys_drive_session() {
    let mut session = Session::new(99);
    let x = session.active_piece().unwrap().x;

    let action = handle_key_event(KeyEvent::from(KeyCode::Right)).unwrap();
    assert!(session.apply_action(action));
    assert_eq!(session.active_piece().unwrap().x, x + 1);

    let action = handle_key_event(KeyEvent::from(KeyCode::Char(' '))).unwrap();
    assert!(session.apply_action(action));
    assert_eq!(session.pieces_locked(), 1);

    let action = handle_key_event(KeyEvent::from(KeyCode::Char('n'))).unwrap();
    assert!(session.apply_action(action));
    assert_eq!(session.session_id(), 1);
    assert_eq!(session.pieces_locked(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let play = || {
        let mut s = Session::new(31337);
        for _ in 0..5 {
            for action in script {
                s.apply_action(action);
            }
        }
        s.snapshot()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_clear_events_drained_per_frame_stay_bounded() {
    let mut session = Session::with_palette(11, Palette::Classic);
    let cells = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

    while session.is_running() && session.pieces_locked() < 200 {
        session.apply_action(GameAction::HardDrop);
        // One lock never reports more cells than the grid holds.
        assert!(session.take_clear_events().len() <= cells);
        assert!(session.take_clear_events().is_empty());
    }
}
