//! Pieces module - piece catalog and wall-kick rotation
//!
//! Shapes are square boolean grids (4x4 for I, 2x2 for O, 3x3 for the rest),
//! one per piece type and rotation state, built at compile time.
//!
//! Rotation resolves collisions with a per-state kick table. Clockwise turns
//! look up the kicks of the state being rotated *from*; counter-clockwise
//! turns look up the kicks of the state being rotated *to*.

use crate::rng::SimpleRng;
use crate::types::{Color, PieceType, Rgb, Rotation};

/// Square occupancy grid of one piece orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    size: u8,
    grid: [[bool; 4]; 4],
}

impl PieceShape {
    /// Build from rows of `#` (filled) and `.` (empty).
    const fn parse(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = [[false; 4]; 4];
        let mut y = 0;
        while y < size {
            let row = rows[y].as_bytes();
            let mut x = 0;
            while x < size {
                grid[y][x] = row[x] == b'#';
                x += 1;
            }
            y += 1;
        }
        Self {
            size: size as u8,
            grid,
        }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `(x, y)` within the grid is occupied. Outside the grid is empty.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size && self.grid[y as usize][x as usize]
    }

    /// Occupied `(dx, dy)` offsets, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let size = self.size as usize;
        (0..size).flat_map(move |y| {
            (0..size)
                .filter(move |&x| self.grid[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

const I_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&["....", "####", "....", "...."]),
    PieceShape::parse(&["..#.", "..#.", "..#.", "..#."]),
    PieceShape::parse(&["....", "....", "####", "...."]),
    PieceShape::parse(&[".#..", ".#..", ".#..", ".#.."]),
];

const O_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&["##", "##"]),
    PieceShape::parse(&["##", "##"]),
    PieceShape::parse(&["##", "##"]),
    PieceShape::parse(&["##", "##"]),
];

const T_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&[".#.", "###", "..."]),
    PieceShape::parse(&[".#.", ".##", ".#."]),
    PieceShape::parse(&["...", "###", ".#."]),
    PieceShape::parse(&[".#.", "##.", ".#."]),
];

const S_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&[".##", "##.", "..."]),
    PieceShape::parse(&[".#.", ".##", "..#"]),
    PieceShape::parse(&["...", ".##", "##."]),
    PieceShape::parse(&["#..", "##.", ".#."]),
];

const Z_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&["##.", ".##", "..."]),
    PieceShape::parse(&["..#", ".##", ".#."]),
    PieceShape::parse(&["...", "##.", ".##"]),
    PieceShape::parse(&[".#.", "##.", "#.."]),
];

const J_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&["#..", "###", "..."]),
    PieceShape::parse(&[".#.", ".#.", "##."]),
    PieceShape::parse(&["...", "###", "..#"]),
    PieceShape::parse(&[".##", ".#.", ".#."]),
];

const L_SHAPES: [PieceShape; 4] = [
    PieceShape::parse(&["..#", "###", "..."]),
    PieceShape::parse(&["##.", ".#.", ".#."]),
    PieceShape::parse(&["...", "###", "#.."]),
    PieceShape::parse(&[".#.", ".#.", ".##"]),
];

/// All 28 orientations, indexed by `[PieceType::index()][Rotation::index()]`.
static SHAPES: [[PieceShape; 4]; 7] = [
    I_SHAPES, O_SHAPES, T_SHAPES, S_SHAPES, Z_SHAPES, J_SHAPES, L_SHAPES,
];

/// Get the shape grid for a piece type and rotation
pub fn get_shape(kind: PieceType, rotation: Rotation) -> &'static PieceShape {
    &SHAPES[kind.index()][rotation.index() as usize]
}

/// Display color of a piece type.
pub fn piece_color(kind: PieceType) -> Color {
    match kind {
        PieceType::I => Rgb::from_hex(0x00f5ff),
        PieceType::O => Rgb::from_hex(0xffdd00),
        PieceType::T => Rgb::from_hex(0xbf00ff),
        PieceType::S => Rgb::from_hex(0x00ff00),
        PieceType::Z => Rgb::from_hex(0xff0000),
        PieceType::J => Rgb::from_hex(0x0000ff),
        PieceType::L => Rgb::from_hex(0xff8800),
    }
}

/// Grid offset `(x, y)` of a freshly spawned piece's top-left cell.
///
/// Pieces start above the visible board so only their lower row shows.
pub fn spawn_offset(kind: PieceType) -> (i8, i8) {
    match kind {
        PieceType::I => (3, -2),
        PieceType::O => (4, -1),
        _ => (3, -1),
    }
}

/// `(rotation + 1) mod 4` clockwise, `(rotation + 3) mod 4` counter-clockwise.
pub fn next_rotation(rotation: Rotation, clockwise: bool) -> Rotation {
    rotation.next(clockwise)
}

/// Draw a piece type uniformly at random.
pub fn random_piece_type(rng: &mut SimpleRng) -> PieceType {
    PieceType::ALL[rng.next_range(PieceType::ALL.len() as u32) as usize]
}

/// Positional offset tried after a raw rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallKick {
    pub dx: i8,
    pub dy: i8,
}

const fn kick(dx: i8, dy: i8) -> WallKick {
    WallKick { dx, dy }
}

type KickTable = [&'static [WallKick]; 4];

const I_KICKS: KickTable = [
    &[kick(0, 0), kick(-2, 0), kick(1, 0), kick(-2, 1), kick(1, -2)],
    &[kick(0, 0), kick(-1, 0), kick(2, 0), kick(-1, -2), kick(2, 1)],
    &[kick(0, 0), kick(2, 0), kick(-1, 0), kick(2, -1), kick(-1, 2)],
    &[kick(0, 0), kick(1, 0), kick(-2, 0), kick(1, 2), kick(-2, -1)],
];

/// O never needs to move: its rotations are identical.
const O_KICKS: KickTable = [&[kick(0, 0)], &[kick(0, 0)], &[kick(0, 0)], &[kick(0, 0)]];

/// Shared by J, L, S, T, Z.
const JLSTZ_KICKS: KickTable = [
    &[kick(0, 0), kick(-1, 0), kick(1, 0), kick(0, 1), kick(0, -1)],
    &[kick(0, 0), kick(1, 0), kick(0, 1), kick(0, -1), kick(-1, 0)],
    &[kick(0, 0), kick(1, 0), kick(-1, 0), kick(0, -1), kick(0, 1)],
    &[kick(0, 0), kick(-1, 0), kick(0, -1), kick(0, 1), kick(1, 0)],
];

/// Ordered kick candidates for a piece type at a lookup state.
///
/// See [`kick_state`] for which state to pass.
pub fn wall_kicks(kind: PieceType, state: Rotation) -> &'static [WallKick] {
    let table = match kind {
        PieceType::I => &I_KICKS,
        PieceType::O => &O_KICKS,
        _ => &JLSTZ_KICKS,
    };
    table[state.index() as usize]
}

/// Kick lookup state for a turn starting at `from`: the source state for a
/// clockwise turn, the destination state for a counter-clockwise one.
pub fn kick_state(from: Rotation, clockwise: bool) -> Rotation {
    if clockwise {
        from
    } else {
        from.rotate_ccw()
    }
}

/// The active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub rotation: Rotation,
    /// Column of the shape grid's left edge.
    pub x: i8,
    /// Row of the shape grid's top edge; negative while above the board.
    pub y: i8,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
            color: piece_color(kind),
        }
    }

    /// A piece at its type's spawn offset in spawn orientation.
    pub fn spawn(kind: PieceType) -> Self {
        let (x, y) = spawn_offset(kind);
        Self::new(kind, Rotation::North, x, y)
    }

    pub fn shape(&self) -> &'static PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape()
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy translated by `(dx, dy)`.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Try to rotate a piece with wall kicks.
///
/// Candidates are the rotated piece displaced by each kick offset, in table
/// order; the first one `is_valid` accepts wins. Returns `None` when every
/// candidate is rejected.
pub fn try_rotate(
    piece: &Piece,
    clockwise: bool,
    is_valid: impl Fn(&Piece) -> bool,
) -> Option<Piece> {
    let rotated = Piece {
        rotation: next_rotation(piece.rotation, clockwise),
        ..*piece
    };
    let kicks = wall_kicks(piece.kind, kick_state(piece.rotation, clockwise));

    kicks
        .iter()
        .map(|k| rotated.shifted(k.dx, k.dy))
        .find(|candidate| is_valid(candidate))
}
