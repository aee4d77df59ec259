//! Controller - drives a [`GameState`] and tells collaborators about it
//!
//! The host owns the loop: it forwards player intents and calls
//! [`Controller::frame`] once per display frame. After every transition that
//! changed something, the controller forwards queued [`GameEvent`]s to the
//! event sink, toggles overlays on phase changes and redraws.
//!
//! [`GameEvent`]: crate::collab::GameEvent

use crate::clock::FrameClock;
use crate::collab::{EventSink, Renderer};
use crate::game_state::{GameState, Phase};
use crate::types::GameAction;

pub struct Controller<R: Renderer, E: EventSink> {
    state: GameState,
    clock: FrameClock,
    renderer: R,
    sink: E,
}

impl<R: Renderer, E: EventSink> Controller<R, E> {
    pub fn new(state: GameState, renderer: R, sink: E) -> Self {
        Self {
            state,
            clock: FrameClock::new(),
            renderer,
            sink,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Take the controller apart, e.g. to flush a sink after the game loop.
    pub fn into_parts(self) -> (GameState, R, E) {
        (self.state, self.renderer, self.sink)
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Spawn the first piece, start the frame clock at `now_ms` and draw everything.
    pub fn start(&mut self, now_ms: u64) {
        let before = self.state.phase();
        self.state.start();
        self.clock.start(now_ms);
        self.forward_events();
        self.sync_overlays(before);
        self.present();
    }

    /// Stop the frame clock. Safe to call more than once.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Advance by one display frame. Returns true if the game changed.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        match self.clock.frame(now_ms) {
            Some(elapsed) => self.tick(elapsed),
            None => false,
        }
    }

    /// Advance gravity by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let before = self.state.phase();
        let changed = self.state.tick(elapsed_ms);
        if changed {
            self.after_transition(before, false);
        }
        changed
    }

    /// Apply one player intent. Returns false if it was rejected.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let before = self.state.phase();
        let accepted = self.state.apply_action(action);
        if accepted {
            let panel = matches!(action, GameAction::Hold | GameAction::Restart);
            self.after_transition(before, panel);
        }
        accepted
    }

    pub fn move_left(&mut self) -> bool {
        self.apply(GameAction::MoveLeft)
    }

    pub fn move_right(&mut self) -> bool {
        self.apply(GameAction::MoveRight)
    }

    pub fn move_down(&mut self) -> bool {
        self.apply(GameAction::MoveDown)
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.apply(GameAction::RotateCw)
    }

    pub fn rotate_counter_clockwise(&mut self) -> bool {
        self.apply(GameAction::RotateCcw)
    }

    pub fn hard_drop(&mut self) -> bool {
        self.apply(GameAction::HardDrop)
    }

    pub fn hold(&mut self) -> bool {
        self.apply(GameAction::Hold)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.apply(GameAction::Pause)
    }

    pub fn restart(&mut self) -> bool {
        self.apply(GameAction::Restart)
    }

    /// Redraw the playfield and the side panel.
    pub fn present(&mut self) {
        self.render_playfield();
        self.render_panel();
    }

    fn after_transition(&mut self, before: Phase, panel: bool) {
        self.forward_events();
        let locked = self.state.take_last_lock().is_some();
        self.sync_overlays(before);
        self.render_playfield();
        if locked || panel {
            self.render_panel();
        }
    }

    fn forward_events(&mut self) {
        for event in self.state.drain_events() {
            self.sink.notify(event);
        }
    }

    fn sync_overlays(&mut self, before: Phase) {
        let after = self.state.phase();

        let was_paused = matches!(before, Phase::Paused(_));
        let is_paused = matches!(after, Phase::Paused(_));
        if is_paused && !was_paused {
            self.renderer.show_pause();
        } else if was_paused && !is_paused {
            self.renderer.hide_pause();
        }

        let was_over = before == Phase::GameOver;
        let is_over = after == Phase::GameOver;
        if is_over && !was_over {
            self.renderer.show_game_over();
        } else if was_over && !is_over {
            self.renderer.hide_game_over();
        }
    }

    fn render_playfield(&mut self) {
        self.renderer.render_board(self.state.board());
        if let (Some(piece), Some(ghost)) = (self.state.active(), self.state.ghost()) {
            self.renderer.render_ghost(&ghost);
            self.renderer.render_piece(&piece);
        }
    }

    fn render_panel(&mut self) {
        self.renderer.render_next(self.state.next_piece());
        self.renderer.render_hold(self.state.hold_piece());
        self.renderer
            .update_scoreboard(self.state.score(), self.state.lines(), self.state.level());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::collab::GameEvent;
    use crate::pieces::Piece;
    use crate::types::PieceType;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Board,
        Piece(Piece),
        Ghost(Piece),
        Next(PieceType),
        Hold(Option<PieceType>),
        Scoreboard(u32, u32, u32),
        ShowGameOver,
        HideGameOver,
        ShowPause,
        HidePause,
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Recorder {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.0)
        }
    }

    impl Renderer for Recorder {
        fn render_board(&mut self, _board: &Board) {
            self.0.push(Call::Board);
        }
        fn render_piece(&mut self, piece: &Piece) {
            self.0.push(Call::Piece(*piece));
        }
        fn render_ghost(&mut self, ghost: &Piece) {
            self.0.push(Call::Ghost(*ghost));
        }
        fn render_next(&mut self, kind: PieceType) {
            self.0.push(Call::Next(kind));
        }
        fn render_hold(&mut self, kind: Option<PieceType>) {
            self.0.push(Call::Hold(kind));
        }
        fn update_scoreboard(&mut self, score: u32, lines: u32, level: u32) {
            self.0.push(Call::Scoreboard(score, lines, level));
        }
        fn show_game_over(&mut self) {
            self.0.push(Call::ShowGameOver);
        }
        fn hide_game_over(&mut self) {
            self.0.push(Call::HideGameOver);
        }
        fn show_pause(&mut self) {
            self.0.push(Call::ShowPause);
        }
        fn hide_pause(&mut self) {
            self.0.push(Call::HidePause);
        }
    }

    #[derive(Default)]
    struct Sink(Vec<GameEvent>);

    impl EventSink for Sink {
        fn notify(&mut self, event: GameEvent) {
            self.0.push(event);
        }
    }

    fn started() -> Controller<Recorder, Sink> {
        let mut controller =
            Controller::new(GameState::new(4242), Recorder::default(), Sink::default());
        controller.start(0);
        controller
    }

    fn run_to_game_over(controller: &mut Controller<Recorder, Sink>) {
        for _ in 0..200 {
            if controller.state().is_game_over() {
                return;
            }
            controller.hard_drop();
        }
        panic!("stacking in the centre should end the game");
    }

    #[test]
    fn start_draws_playfield_and_panel() {
        let mut controller = started();
        let state = controller.state().clone();
        let piece = state.active().unwrap();

        assert_eq!(
            controller.renderer_mut().take(),
            vec![
                Call::Board,
                Call::Ghost(state.ghost().unwrap()),
                Call::Piece(piece),
                Call::Next(state.next_piece()),
                Call::Hold(None),
                Call::Scoreboard(0, 0, 1),
            ]
        );
        assert!(controller.is_running());
    }

    #[test]
    fn accepted_move_redraws_playfield_only() {
        let mut controller = started();
        controller.renderer_mut().take();

        assert!(controller.move_right());
        let calls = controller.renderer_mut().take();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::Board);
        assert_eq!(calls[2], Call::Piece(controller.state().active().unwrap()));
    }

    #[test]
    fn rejected_intent_draws_nothing() {
        let mut controller = started();
        while controller.move_left() {}
        controller.renderer_mut().take();

        assert!(!controller.move_left());
        assert!(controller.renderer().0.is_empty());
        assert!(controller.sink().0.is_empty());
    }

    #[test]
    fn hard_drop_notifies_sink_and_updates_scoreboard() {
        let mut controller = started();
        controller.renderer_mut().take();

        assert!(controller.hard_drop());
        assert!(matches!(
            controller.sink().0.first(),
            Some(GameEvent::HardDropped { .. })
        ));
        let calls = controller.renderer_mut().take();
        assert!(calls.contains(&Call::Scoreboard(0, 0, 1)));
        assert!(calls.contains(&Call::Next(controller.state().next_piece())));
    }

    #[test]
    fn pause_toggles_overlay_and_freezes_frames() {
        let mut controller = started();
        controller.renderer_mut().take();

        assert!(controller.toggle_pause());
        assert_eq!(controller.renderer().0[0], Call::ShowPause);
        controller.renderer_mut().take();

        assert!(!controller.frame(5_000));
        assert!(controller.renderer().0.is_empty());

        assert!(controller.toggle_pause());
        assert_eq!(controller.renderer().0[0], Call::HidePause);
    }

    #[test]
    fn frames_drive_gravity() {
        let mut controller = started();
        let y = controller.state().active().unwrap().y;

        assert!(!controller.frame(16));
        assert!(!controller.frame(1_000));
        assert!(controller.frame(1_017));
        assert_eq!(controller.state().active().unwrap().y, y + 1);
    }

    #[test]
    fn stopped_controller_ignores_frames() {
        let mut controller = started();
        controller.stop();
        controller.stop();
        assert!(!controller.is_running());
        assert!(!controller.frame(10_000));
    }

    #[test]
    fn game_over_shows_overlay_and_restart_hides_it() {
        let mut controller = started();
        run_to_game_over(&mut controller);

        assert!(controller.renderer().0.contains(&Call::ShowGameOver));
        assert_eq!(controller.sink().0.last(), Some(&GameEvent::GameOver));
        assert!(!controller.toggle_pause());
        controller.renderer_mut().take();

        assert!(controller.restart());
        let calls = controller.renderer_mut().take();
        assert_eq!(calls[0], Call::HideGameOver);
        assert!(calls.contains(&Call::Scoreboard(0, 0, 1)));
        assert!(calls.contains(&Call::Hold(None)));
        assert!(!controller.state().is_game_over());
    }
}
