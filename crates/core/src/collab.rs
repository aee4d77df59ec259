//! Collaborator interfaces - what the core calls out to
//!
//! The core never draws, plays sound or reads keys itself. A [`Controller`]
//! pushes state to a [`Renderer`] and forwards [`GameEvent`]s to an
//! [`EventSink`] (audio, logging). Every call is fire-and-forget.
//!
//! [`Controller`]: crate::controller::Controller

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::PieceType;

/// Notable moments of play, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    RotateSucceeded,
    /// One to three lines cleared by a single lock.
    LinesCleared(u32),
    /// Four lines cleared by a single lock.
    TetrisCleared,
    /// Hard drop that moved the piece at least one row.
    HardDropped { distance: u32 },
    Held,
    GameOver,
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::RotateSucceeded => "rotate",
            GameEvent::LinesCleared(_) => "lines_cleared",
            GameEvent::TetrisCleared => "tetris",
            GameEvent::HardDropped { .. } => "hard_drop",
            GameEvent::Held => "hold",
            GameEvent::GameOver => "game_over",
        }
    }
}

/// Receives game events. Implemented by audio back ends and loggers.
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

impl EventSink for () {
    fn notify(&mut self, _event: GameEvent) {}
}

impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn notify(&mut self, event: GameEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}

impl<S: EventSink> EventSink for Option<S> {
    fn notify(&mut self, event: GameEvent) {
        if let Some(sink) = self {
            sink.notify(event);
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn notify(&mut self, event: GameEvent) {
        (**self).notify(event);
    }
}

/// Draws game state. Calls arrive in paint order within a frame: board,
/// ghost, piece.
pub trait Renderer {
    fn render_board(&mut self, board: &Board);
    fn render_piece(&mut self, piece: &Piece);
    /// Landing preview of the current piece.
    fn render_ghost(&mut self, ghost: &Piece);
    fn render_next(&mut self, kind: PieceType);
    fn render_hold(&mut self, kind: Option<PieceType>);
    fn update_scoreboard(&mut self, score: u32, lines: u32, level: u32);
    fn show_game_over(&mut self);
    fn hide_game_over(&mut self);
    fn show_pause(&mut self);
    fn hide_pause(&mut self);
}

impl Renderer for () {
    fn render_board(&mut self, _board: &Board) {}
    fn render_piece(&mut self, _piece: &Piece) {}
    fn render_ghost(&mut self, _ghost: &Piece) {}
    fn render_next(&mut self, _kind: PieceType) {}
    fn render_hold(&mut self, _kind: Option<PieceType>) {}
    fn update_scoreboard(&mut self, _score: u32, _lines: u32, _level: u32) {}
    fn show_game_over(&mut self) {}
    fn hide_game_over(&mut self) {}
    fn show_pause(&mut self) {}
    fn hide_pause(&mut self) {}
}
