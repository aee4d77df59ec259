//! Screen: retained scene fed by the core's [`Renderer`] calls.
//!
//! The controller pushes state in; [`GameView`](crate::game_view::GameView)
//! reads it back out when the host composes a frame.

use crate::core::{Board, Piece, Renderer};
use crate::types::PieceType;

#[derive(Debug, Clone, Default)]
pub struct Screen {
    board: Board,
    piece: Option<Piece>,
    ghost: Option<Piece>,
    next: Option<PieceType>,
    hold: Option<PieceType>,
    score: u32,
    lines: u32,
    level: u32,
    paused: bool,
    game_over: bool,
    dirty: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn ghost(&self) -> Option<&Piece> {
        self.ghost.as_ref()
    }

    pub fn next(&self) -> Option<PieceType> {
        self.next
    }

    pub fn hold(&self) -> Option<PieceType> {
        self.hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Renderer for Screen {
    /// Starts a new playfield: piece and ghost follow if one is in play.
    fn render_board(&mut self, board: &Board) {
        self.board.clone_from(board);
        self.piece = None;
        self.ghost = None;
        self.dirty = true;
    }

    fn render_piece(&mut self, piece: &Piece) {
        self.piece = Some(*piece);
        self.dirty = true;
    }

    fn render_ghost(&mut self, ghost: &Piece) {
        self.ghost = Some(*ghost);
        self.dirty = true;
    }

    fn render_next(&mut self, kind: PieceType) {
        self.next = Some(kind);
        self.dirty = true;
    }

    fn render_hold(&mut self, kind: Option<PieceType>) {
        self.hold = kind;
        self.dirty = true;
    }

    fn update_scoreboard(&mut self, score: u32, lines: u32, level: u32) {
        self.score = score;
        self.lines = lines;
        self.level = level;
        self.dirty = true;
    }

    fn show_game_over(&mut self) {
        self.game_over = true;
        self.dirty = true;
    }

    fn hide_game_over(&mut self) {
        self.game_over = false;
        self.dirty = true;
    }

    fn show_pause(&mut self) {
        self.paused = true;
        self.dirty = true;
    }

    fn hide_pause(&mut self) {
        self.paused = false;
        self.dirty = true;
    }
}
