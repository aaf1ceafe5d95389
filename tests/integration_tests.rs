//! Integration tests for the game loop through the public API

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use blockfall::core::GameState;
use blockfall::input::InputHandler;
use blockfall::types::{
    GameAction, GameStatus, InputState, PieceKind, BASE_DROP_MS, LANDING_SHAKE, TICK_MS,
};

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
}

/// First seed whose opening piece is `kind`.
fn seed_with_first(kind: PieceKind) -> u32 {
    (1..10_000)
        .find(|&seed| GameState::new(seed).current().kind == kind)
        .expect("some seed opens with every kind")
}

fn occupied(state: &GameState) -> usize {
    state.board().cells().iter().filter(|c| c.is_some()).count()
}

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(12345);

    assert_eq!(state.status(), GameStatus::Active);
    assert!(!state.paused());
    assert!(!state.game_over());
    assert!(state.can_hold());
    assert_eq!(state.held(), None);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.drop_interval_ms(), BASE_DROP_MS);
    assert_eq!(occupied(&state), 0);
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);

    for _ in 0..20 {
        assert_eq!(a.current().kind, b.current().kind);
        assert_eq!(a.preview(), b.preview());
        a.hard_drop();
        b.hard_drop();
    }
}

#[test]
fn test_first_seven_pieces_form_a_bag() {
    let mut state = GameState::new(4242);
    let mut seen = Vec::new();
    for _ in 0..7 {
        seen.push(state.current().kind);
        state.hard_drop();
    }
    seen.sort_by_key(|k| k.code());
    assert_eq!(seen, PieceKind::ALL.to_vec());
}

#[test]
fn test_hard_drop_on_empty_board() {
    let mut state = GameState::new(seed_with_first(PieceKind::I));
    let next = state.preview()[0];

    let fallen = state.hard_drop();
    assert_eq!(fallen, 19);
    assert_eq!(state.score(), 38);
    assert_eq!(occupied(&state), 4);
    assert_eq!(state.current().kind, next);

    let ev = state.take_last_event().unwrap();
    assert_eq!(ev.kind, PieceKind::I);
    assert_eq!(ev.lines_cleared, 0);
    assert!(!ev.topped_out);
    assert!(state.take_last_event().is_none());
}

#[test]
fn test_soft_drop_scores_one_per_row() {
    let mut state = GameState::new(9);
    let y = state.current().y;

    assert!(state.apply_action(GameAction::SoftDrop));
    assert!(state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.current().y, y + 2);
    assert_eq!(state.score(), 2);
}

#[test]
fn test_gravity_moves_one_row_per_interval() {
    let mut state = GameState::new(5);
    let y = state.current().y;

    state.update(BASE_DROP_MS - 1, InputState::default());
    assert_eq!(state.current().y, y);

    state.update(1, InputState::default());
    assert_eq!(state.current().y, y + 1);
}

#[test]
fn test_piece_locks_after_lock_delay() {
    let mut state = GameState::new(31);
    state.apply_action(GameAction::SoftDrop);

    let mut frames = 0;
    let ev = loop {
        state.update(TICK_MS, InputState::default());
        if let Some(ev) = state.take_last_event() {
            break ev;
        }
        frames += 1;
        assert!(frames < 10_000, "piece never locked");
    };

    assert_eq!(ev.lines_cleared, 0);
    assert_eq!(occupied(&state), 4);
    assert_eq!(state.shake(), LANDING_SHAKE);
    assert!(state.can_hold());
}

#[test]
fn test_input_handler_drives_auto_shift() {
    let mut state = GameState::new(seed_with_first(PieceKind::T));
    let mut input = InputHandler::new();
    let x0 = state.current().x;

    assert_eq!(input.handle_key_event(key(KeyCode::Left, KeyEventKind::Press)), None);

    // Initial press moves at once.
    state.update(16, input.state());
    assert_eq!(state.current().x, x0 - 1);

    // Holding through the delay does nothing more.
    state.update(150, input.state());
    assert_eq!(state.current().x, x0 - 1);

    // Past the delay the repeat kicks in.
    state.update(40, input.state());
    assert_eq!(state.current().x, x0 - 2);

    input.handle_key_event(key(KeyCode::Left, KeyEventKind::Release));
    state.update(200, input.state());
    assert_eq!(state.current().x, x0 - 2);
}

#[test]
fn test_input_handler_one_shot_actions() {
    let mut state = GameState::new(seed_with_first(PieceKind::T));
    let mut input = InputHandler::new();

    let action = input.handle_key_event(key(KeyCode::Up, KeyEventKind::Press));
    assert_eq!(action, Some(GameAction::RotateCw));
    assert!(state.apply_action(GameAction::RotateCw));

    let action = input.handle_key_event(key(KeyCode::Char(' '), KeyEventKind::Press));
    assert_eq!(action, Some(GameAction::HardDrop));
    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(occupied(&state), 4);
}

#[test]
fn test_game_pause() {
    let mut state = GameState::new(12345);
    let before = *state.current();

    assert!(state.apply_action(GameAction::Pause));
    assert!(state.paused());
    assert_eq!(state.status(), GameStatus::Paused);

    state.update(5_000, InputState::new(true, false));
    assert!(!state.apply_action(GameAction::MoveRight));
    assert!(!state.apply_action(GameAction::Hold));
    assert_eq!(*state.current(), before);

    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.paused());
}

#[test]
fn test_hold_piece() {
    let mut state = GameState::new(12345);
    let first = state.current().kind;
    let next = state.preview()[0];

    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.held(), Some(first));
    assert_eq!(state.current().kind, next);
    assert!(!state.can_hold());

    // Once per piece.
    assert!(!state.apply_action(GameAction::Hold));

    state.hard_drop();
    assert!(state.can_hold());

    let upcoming = state.current().kind;
    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.current().kind, first);
    assert_eq!(state.held(), Some(upcoming));
}

#[test]
fn test_stacking_in_the_middle_tops_out() {
    let mut state = GameState::new(2024);

    let mut drops = 0;
    while !state.game_over() {
        state.hard_drop();
        drops += 1;
        assert!(drops < 200, "stack never reached the top");
    }

    let ev = state.take_last_event().unwrap();
    assert!(ev.topped_out);
    assert_eq!(state.status(), GameStatus::GameOver);
    assert!(state.paused());
    assert_eq!(state.lines(), 0);

    let score = state.score();
    let board = state.board().clone();
    state.update(10_000, InputState::new(false, true));
    assert!(!state.apply_action(GameAction::HardDrop));
    assert!(!state.apply_action(GameAction::Pause));
    assert_eq!(state.score(), score);
    assert_eq!(*state.board(), board);
}

#[test]
fn test_game_restart() {
    let mut state = GameState::new(12345);
    state.hard_drop();
    state.apply_action(GameAction::Hold);
    assert!(state.score() > 0);

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.held(), None);
    assert_eq!(occupied(&state), 0);
    assert_eq!(state.status(), GameStatus::Active);
}

#[test]
fn test_snapshot_matches_state() {
    let mut state = GameState::new(seed_with_first(PieceKind::O));
    state.hard_drop();

    let snap = state.snapshot();
    assert_eq!(snap.score, state.score());
    assert_eq!(snap.preview, *state.preview());
    assert_eq!(snap.ghost_y, Some(state.ghost_y()));
    assert_eq!(snap.status, GameStatus::Active);

    let current = snap.current.unwrap();
    assert_eq!(current.kind, state.current().kind);
    assert_eq!(current.x, state.current().x);

    // The O landed on the floor in columns 4 and 5.
    assert_eq!(snap.board[19][4], PieceKind::O.code());
    assert_eq!(snap.board[18][5], PieceKind::O.code());
    assert_eq!(snap.board[19][3], 0);
}
