//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn**: pieces spawn partially above the visible board (negative y)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default display frame interval (~60 FPS) |
//! | `KEY_REPEAT_DELAY_MS` | 150 | Delay before a held key starts repeating |
//! | `KEY_REPEAT_INTERVAL_MS` | 50 | Interval between key repeats |
//!
//! # Drop Intervals by Level
//!
//! Gravity increases with level (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2-8 | 900ms down to 300ms in 100ms steps |
//! | 9 | 200ms |
//! | 10-14 | 180ms down to 100ms in 20ms steps |
//! | 15-16 | 80ms, 60ms |
//! | 17-20 | 50ms down to 20ms in 10ms steps |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceType, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceType::from_str("t").unwrap();
//! assert_eq!(parsed, PieceType::T);
//!
//! // Rotation wraps modulo 4
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Rotation::from_index(6), Rotation::South);
//!
//! // Parse game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default display frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Delay before a held movement key starts repeating.
pub const KEY_REPEAT_DELAY_MS: u32 = 150;

/// Interval between repeats of a held movement key.
pub const KEY_REPEAT_INTERVAL_MS: u32 = 50;

/// Level a new game starts at.
pub const INITIAL_LEVEL: u32 = 1;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 20;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Base line-clear points, indexed by lines cleared (0-4).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 19 = Level 20
pub const DROP_INTERVALS: [u32; 20] = [
    1000, 900, 800, 700, 600, 500, 400, 300, 200, 180, 160, 140, 120, 100, 80, 60, 50, 40, 30, 20,
];

/// Drop interval used for any level outside the table.
pub const DROP_INTERVAL_FLOOR_MS: u32 = 20;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// Colors of board cells and pieces.
pub type Color = Rgb;

/// Background color of an empty board cell.
pub const EMPTY_CELL_COLOR: Color = Rgb::from_hex(0x1a1a2e);

/// Tetromino piece types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceType {
    /// Every piece type, in catalog order.
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::O,
        PieceType::T,
        PieceType::S,
        PieceType::Z,
        PieceType::J,
        PieceType::L,
    ];

    /// Position in [`PieceType::ALL`].
    pub const fn index(self) -> usize {
        match self {
            PieceType::I => 0,
            PieceType::O => 1,
            PieceType::T => 2,
            PieceType::S => 3,
            PieceType::Z => 4,
            PieceType::J => 5,
            PieceType::L => 6,
        }
    }

    /// Parse piece type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceType::I),
            "o" => Some(PieceType::O),
            "t" => Some(PieceType::T),
            "s" => Some(PieceType::S),
            "z" => Some(PieceType::Z),
            "j" => Some(PieceType::J),
            "l" => Some(PieceType::L),
            _ => None,
        }
    }

    /// Uppercase single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::I => "I",
            PieceType::O => "O",
            PieceType::T => "T",
            PieceType::S => "S",
            PieceType::Z => "Z",
            PieceType::J => "J",
            PieceType::L => "L",
        }
    }
}

/// Rotation states (North = spawn orientation), clockwise quarter-turns 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation state for any integer, reduced modulo 4.
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Quarter-turns from spawn orientation.
    pub const fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// `(self + 1) mod 4` clockwise, `(self + 3) mod 4` counter-clockwise.
    pub const fn next(self, clockwise: bool) -> Self {
        let step = if clockwise { 1 } else { 3 };
        Self::from_index(self.index() + step)
    }

    /// Rotate clockwise
    pub const fn rotate_cw(self) -> Self {
        self.next(true)
    }

    /// Rotate counter-clockwise
    pub const fn rotate_ccw(self) -> Self {
        self.next(false)
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Player intents accepted by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateCw,
    RotateCcw,
    HardDrop,
    Hold,
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether a held key for this action auto-repeats.
    pub fn repeats(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown
        )
    }
}
