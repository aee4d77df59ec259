//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is either empty or filled with a color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//! Pieces may hang above the board (negative y); those cells never block and are
//! dropped when the piece locks.


use crate::pieces::Piece;
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL_COLOR};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardCell {
    pub filled: bool,
    pub color: Color,
}

impl BoardCell {
    pub const EMPTY: BoardCell = BoardCell {
        filled: false,
        color: EMPTY_CELL_COLOR,
    };

    pub const fn filled(color: Color) -> Self {
        Self {
            filled: true,
            color,
        }
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [BoardCell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [BoardCell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<BoardCell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: BoardCell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(BoardCell { filled: true, .. }))
    }

    /// Whether a piece cell may sit at (x, y).
    ///
    /// Columns are always bounded and rows below the floor are not; rows
    /// above the board are open.
    fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Check whether every occupied cell of the piece lands on a free cell.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| self.is_free(x, y))
    }

    /// Write the piece into the grid.
    ///
    /// Cells above the board are discarded.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, BoardCell::filled(piece.color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.filled)
    }

    /// Remove row `y`, shifting every row above it down by one and
    /// inserting an empty row at the top.
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(BoardCell::EMPTY);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is
    /// examined again, since the row above has just moved into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Whether anything has been locked into the top row.
    pub fn is_game_over(&self) -> bool {
        self.cells[..BOARD_WIDTH as usize]
            .iter()
            .any(|cell| cell.filled)
    }

    /// The piece moved straight down as far as it stays valid.
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut dropped = *piece;
        loop {
            let next = dropped.shifted(0, 1);
            if !self.is_valid_position(&next) {
                return dropped;
            }
            dropped = next;
        }
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Number of filled cells on the whole board.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.filled).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(BoardCell::EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
