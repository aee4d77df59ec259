//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on terminals, audio or I/O:
//!
//! - **Deterministic**: the same seed produces the same game
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: drawing and sound are reached through traits
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board with collision detection and line clearing
//! - [`pieces`]: piece shapes, colors, spawn offsets and wall-kick rotation
//! - [`rng`]: seeded uniform piece randomness
//! - [`scoring`]: line-clear points, levels and gravity speed
//! - [`game_state`]: the game lifecycle as an explicit [`Phase`]
//! - [`collab`]: [`Renderer`] and [`EventSink`] collaborator traits
//! - [`clock`]: frame clock the host drives
//! - [`controller`]: ties state, clock and collaborators together
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.board().filled_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Gravity is driven by elapsed milliseconds: call
//! [`GameState::tick`](game_state::GameState::tick) (or
//! [`Controller::frame`](controller::Controller::frame)) once per frame. The
//! piece drops a row once the accumulated time exceeds the level's interval,
//! 1000ms at level 1 down to 20ms at level 20.

pub mod board;
pub mod clock;
pub mod collab;
pub mod controller;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardCell};
pub use clock::FrameClock;
pub use collab::{EventSink, GameEvent, Renderer};
pub use controller::Controller;
pub use game_state::{GameState, LockReport, Phase};
pub use pieces::{get_shape, piece_color, try_rotate, Piece, PieceShape};
pub use rng::SimpleRng;
pub use scoring::{calculate_level, calculate_score, get_drop_speed, ClearKind, ScoreResult};
