//! Integration tests for the game lifecycle and the collaborators around it

use blockfall::core::{Controller, EventSink, GameEvent, GameState, Phase};
use blockfall::input::InputHandler;
use blockfall::term::{GameView, Screen, Viewport};
use blockfall::types::{GameAction, PieceType};

#[derive(Default)]
struct Events(Vec<GameEvent>);

impl EventSink for Events {
    fn notify(&mut self, event: GameEvent) {
        self.0.push(event);
    }
}

/// Hard-drop everything in the middle until the stack reaches the top.
fn play_until_game_over(state: &mut GameState) -> usize {
    let mut drops = 0;
    while !state.is_game_over() {
        assert!(drops < 200, "game should end when stacking in one place");
        state.hard_drop();
        drops += 1;
    }
    drops
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), Phase::Spawning);

    state.start();
    assert!(matches!(state.phase(), Phase::Falling(_)));
    assert!(state.active().is_some());

    assert!(state.toggle_pause());
    assert!(state.is_paused());
    assert!(state.toggle_pause());

    play_until_game_over(&mut state);
    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.active().is_none());

    state.restart();
    assert!(matches!(state.phase(), Phase::Falling(_)));
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    a.start();
    b.start();

    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::RotateCcw,
        GameAction::HardDrop,
    ];
    for _ in 0..5 {
        for action in script {
            assert_eq!(a.apply_action(action), b.apply_action(action));
            a.tick(16);
            b.tick(16);
        }
    }

    assert_eq!(a.board(), b.board());
    assert_eq!(a.active(), b.active());
    assert_eq!(a.next_piece(), b.next_piece());
    assert_eq!(a.hold_piece(), b.hold_piece());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_restart_draws_new_pieces() {
    let mut state = GameState::new(5);
    state.start();
    let first: Vec<PieceType> = (0..8)
        .map(|_| {
            let kind = state.active().unwrap().kind;
            state.hard_drop();
            kind
        })
        .collect();

    state.restart();
    let second: Vec<PieceType> = (0..8)
        .map(|_| {
            let kind = state.active().unwrap().kind;
            state.hard_drop();
            kind
        })
        .collect();

    assert_ne!(first, second);
}

#[test]
fn test_gravity_only() {
    let mut state = GameState::new(8);
    state.start();

    // Gravity alone eventually locks the first piece.
    let mut ticks = 0;
    while state.board().filled_count() == 0 {
        state.tick(16);
        ticks += 1;
        assert!(ticks < 10_000);
    }
    assert_eq!(state.board().filled_count(), 4);
    // About 20 rows at just over one second each.
    assert!(ticks > 20 * 1000 / 16);
}

#[test]
fn test_hold_rules() {
    let mut state = GameState::new(31);
    state.start();
    let first = state.active().unwrap().kind;

    assert!(state.hold());
    assert_eq!(state.hold_piece(), Some(first));
    assert!(!state.can_hold());
    assert!(!state.hold());

    state.hard_drop();
    assert!(state.can_hold());
    let current = state.active().unwrap().kind;
    assert!(state.hold());
    assert_eq!(state.active().unwrap().kind, first);
    assert_eq!(state.hold_piece(), Some(current));
}

#[test]
fn test_controller_reports_game_over_once() {
    let mut controller = Controller::new(GameState::new(77), Screen::new(), Events::default());
    controller.start(0);

    let mut frames = 0u64;
    while !controller.state().is_game_over() {
        controller.hard_drop();
        frames += 1;
        controller.frame(frames * 16);
        assert!(frames < 200);
    }

    let events = &controller.sink().0;
    let game_overs = events.iter().filter(|e| **e == GameEvent::GameOver).count();
    assert_eq!(game_overs, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::HardDropped { .. })));
    assert!(controller.renderer().is_game_over());

    // Nothing but restart gets through now.
    assert!(!controller.move_left());
    assert!(!controller.hold());
    assert!(controller.restart());
    assert!(!controller.renderer().is_game_over());
}

#[test]
fn test_controller_into_view() {
    let mut controller = Controller::new(GameState::new(3), Screen::new(), ());
    controller.start(0);
    controller.toggle_pause();

    let fb = GameView::default().render(controller.renderer(), Viewport::new(80, 24));
    let all: String = (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(all.contains("PAUSED"));
    assert!(all.contains("SCORE"));
}

#[test]
fn test_input_handler_drives_moves() {
    use crossterm::event::KeyCode;

    let mut state = GameState::new(12);
    state.start();
    let x = state.active().unwrap().x;

    let mut input = InputHandler::new().with_key_release_timeout_ms(10_000);
    if let Some(action) = input.handle_key_press(KeyCode::Left) {
        state.apply_action(action);
    }
    for _ in 0..10 {
        for action in input.update(16) {
            state.apply_action(action);
        }
    }

    // Press at 0ms, repeats at 150ms: two moves within 160ms.
    assert_eq!(state.active().unwrap().x, x - 2);
}
