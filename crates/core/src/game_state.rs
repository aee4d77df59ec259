//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It handles gravity timing, piece movement, rotation, hold, line clears, and game lifecycle.
//!
//! The lifecycle is an explicit [`Phase`]: a piece only exists while the game is
//! `Falling` or `Paused`, so "paused with no piece" or "game over with a
//! falling piece" cannot be represented.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collab::GameEvent;
use crate::pieces::{random_piece_type, try_rotate, Piece};
use crate::rng::SimpleRng;
use crate::scoring::{calculate_level, calculate_score, get_drop_speed};
use crate::types::{GameAction, PieceType, INITIAL_LEVEL};

/// Upper bound on undrained events; extra events are discarded.
const EVENT_CAPACITY: usize = 16;

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting to bring in the next piece.
    Spawning,
    /// A piece is under player and gravity control.
    Falling(Piece),
    /// Play suspended; the piece is kept as it was.
    Paused(Piece),
    /// A new piece had nowhere to go. Only restart leaves this phase.
    GameOver,
}

/// What a single lock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockReport {
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// Something is locked in the top row after the clear.
    pub reached_top: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    phase: Phase,
    next: PieceType,
    hold: Option<PieceType>,
    can_hold: bool,
    score: u32,
    lines: u32,
    level: u32,
    drop_timer_ms: u32,
    drop_interval_ms: u32,
    rng: SimpleRng,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
    last_lock: Option<LockReport>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    fn with_rng(mut rng: SimpleRng) -> Self {
        let next = random_piece_type(&mut rng);

        Self {
            board: Board::new(),
            phase: Phase::Spawning,
            next,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: INITIAL_LEVEL,
            drop_timer_ms: 0,
            drop_interval_ms: get_drop_speed(INITIAL_LEVEL),
            rng,
            events: ArrayVec::new(),
            last_lock: None,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase == Phase::Spawning {
            self.spawn_piece();
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused(_))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceType> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceType {
        self.next
    }

    /// Current gravity interval in milliseconds.
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// The current piece, falling or paused.
    pub fn active(&self) -> Option<Piece> {
        match self.phase {
            Phase::Falling(piece) | Phase::Paused(piece) => Some(piece),
            Phase::Spawning | Phase::GameOver => None,
        }
    }

    /// Where the current piece would land if hard-dropped now.
    pub fn ghost(&self) -> Option<Piece> {
        self.active().map(|piece| self.board.drop_position(&piece))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Events produced since the last drain, oldest first.
    ///
    /// At most 16 are kept; when more pile up undrained the oldest are
    /// discarded, so the latest (e.g. `GameOver`) is never lost.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Take the report of the most recent lock, if any happened since the last call.
    pub fn take_last_lock(&mut self) -> Option<LockReport> {
        self.last_lock.take()
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// The piece under control, only while play is live.
    fn falling(&self) -> Option<Piece> {
        match self.phase {
            Phase::Falling(piece) => Some(piece),
            _ => None,
        }
    }

    /// Bring in the next piece. Returns false (and ends the game) when it
    /// does not fit.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.next;
        self.next = random_piece_type(&mut self.rng);
        self.can_hold = true;
        self.drop_timer_ms = 0;

        let piece = Piece::spawn(kind);
        if !self.board.is_valid_position(&piece) {
            self.phase = Phase::GameOver;
            self.emit(GameEvent::GameOver);
            return false;
        }

        self.phase = Phase::Falling(piece);
        true
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.falling() else {
            return false;
        };

        let moved = piece.shifted(dx, dy);
        if !self.board.is_valid_position(&moved) {
            return false;
        }

        self.phase = Phase::Falling(moved);
        if dy > 0 {
            // A manual step down counts as this interval's gravity.
            self.drop_timer_ms = 0;
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate the active piece, resolving collisions with wall kicks
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.falling() else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&piece, clockwise, |p| board.is_valid_position(p)) {
            Some(rotated) => {
                self.phase = Phase::Falling(rotated);
                self.emit(GameEvent::RotateSucceeded);
                true
            }
            None => false,
        }
    }

    /// Drop the active piece to its landing row and lock it.
    ///
    /// Returns the number of rows dropped, or `None` if there was nothing to drop.
    pub fn hard_drop(&mut self) -> Option<u32> {
        let piece = self.falling()?;

        let landed = self.board.drop_position(&piece);
        let distance = (landed.y - piece.y) as u32;
        if distance > 0 {
            self.emit(GameEvent::HardDropped { distance });
        }

        self.phase = Phase::Falling(landed);
        self.lock_piece();
        Some(distance)
    }

    /// Set the active piece aside, or swap it with the held one.
    pub fn hold(&mut self) -> bool {
        let Some(piece) = self.falling() else {
            return false;
        };
        if !self.can_hold {
            return false;
        }

        match self.hold {
            Some(held) => {
                // The swapped-in piece starts at its spawn offset, fit or not.
                self.hold = Some(piece.kind);
                self.phase = Phase::Falling(Piece::spawn(held));
                self.emit(GameEvent::Held);
            }
            None => {
                self.hold = Some(piece.kind);
                self.emit(GameEvent::Held);
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Lock the active piece where it is, clear lines, score, and spawn the next piece
    pub fn lock_piece(&mut self) -> Option<LockReport> {
        let piece = self.falling()?;

        self.board.lock_piece(&piece);
        self.phase = Phase::Spawning;

        let cleared = self.board.clear_lines();
        let mut score_delta = 0;
        if cleared > 0 {
            let result = calculate_score(cleared, self.level);
            score_delta = result.score;
            self.score = self.score.saturating_add(result.score);
            self.lines = self.lines.saturating_add(cleared as u32);
            self.level = calculate_level(self.lines);
            self.drop_interval_ms = get_drop_speed(self.level);

            if result.is_tetris() {
                self.emit(GameEvent::TetrisCleared);
            } else {
                self.emit(GameEvent::LinesCleared(cleared as u32));
            }
        }

        let report = LockReport {
            lines_cleared: cleared as u32,
            score_delta,
            reached_top: self.board.is_game_over(),
        };
        self.last_lock = Some(report);

        self.spawn_piece();
        Some(report)
    }

    /// Suspend or resume play. Has no effect unless a piece is in play.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Falling(piece) => Phase::Paused(piece),
            Phase::Paused(piece) => Phase::Falling(piece),
            Phase::Spawning | Phase::GameOver => return false,
        };
        true
    }

    /// Discard the game and start a fresh one.
    ///
    /// The random sequence carries on, so the new game gets new pieces.
    pub fn restart(&mut self) {
        *self = Self::with_rng(self.rng.clone());
        self.start();
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds the drop interval the piece moves down
    /// one row, or locks if it cannot. Returns true if the piece moved, locked
    /// or spawned.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let piece = match self.phase {
            Phase::Spawning => return self.spawn_piece(),
            Phase::Falling(piece) => piece,
            Phase::Paused(_) | Phase::GameOver => return false,
        };

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= self.drop_interval_ms {
            return false;
        }

        let moved = piece.shifted(0, 1);
        if self.board.is_valid_position(&moved) {
            self.phase = Phase::Falling(moved);
            self.drop_timer_ms = 0;
        } else {
            self.lock_piece();
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
