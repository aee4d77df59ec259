//! Board tests - grid access, collision, locking and line clearing

use blockfall::core::{Board, BoardCell, Piece};
use blockfall::types::{PieceType, Rgb, Rotation, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL_COLOR};

const GREY: Rgb = Rgb::new(90, 90, 90);

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, BoardCell::filled(GREY));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let cell = board.get(x, y).unwrap();
            assert!(!cell.filled, "Cell ({}, {}) should be empty", x, y);
            assert_eq!(cell.color, EMPTY_CELL_COLOR);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, BoardCell::filled(GREY)));
    assert_eq!(board.get(5, 10), Some(BoardCell::filled(GREY)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, BoardCell::EMPTY));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, BoardCell::filled(GREY)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, BoardCell::filled(GREY)));
}

#[test]
fn test_valid_position_walls_and_floor() {
    let board = Board::new();

    // T spawns partly above the board; that is allowed.
    assert!(board.is_valid_position(&Piece::spawn(PieceType::T)));

    // Left wall.
    let t = Piece::new(PieceType::T, Rotation::North, -1, 5);
    assert!(!board.is_valid_position(&t));
    // Right wall: T North spans three columns.
    let t = Piece::new(PieceType::T, Rotation::North, 8, 5);
    assert!(!board.is_valid_position(&t));
    // Floor: lower row at y + 1.
    let t = Piece::new(PieceType::T, Rotation::North, 3, 19);
    assert!(!board.is_valid_position(&t));
    let t = Piece::new(PieceType::T, Rotation::North, 3, 18);
    assert!(board.is_valid_position(&t));
}

#[test]
fn test_valid_position_collides_with_stack() {
    let mut board = Board::new();
    board.set(4, 10, BoardCell::filled(GREY));

    let o = Piece::new(PieceType::O, Rotation::North, 4, 9);
    assert!(!board.is_valid_position(&o));
    let o = Piece::new(PieceType::O, Rotation::North, 4, 8);
    assert!(board.is_valid_position(&o));
}

#[test]
fn test_lock_piece_uses_piece_color() {
    let mut board = Board::new();
    let piece = Piece::new(PieceType::S, Rotation::North, 0, 18);
    board.lock_piece(&piece);

    assert_eq!(board.filled_count(), 4);
    for (x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(BoardCell::filled(piece.color)));
    }
}

#[test]
fn test_clear_single_line_shifts_rows_down() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(3, 18, BoardCell::filled(GREY));

    assert_eq!(board.clear_lines(), 1);
    assert!(board.is_occupied(3, 19));
    assert!(!board.is_occupied(3, 18));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_non_adjacent_lines() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    fill_row(&mut board, 17);
    board.set(0, 18, BoardCell::filled(GREY));
    board.set(9, 16, BoardCell::filled(GREY));

    assert_eq!(board.clear_lines(), 2);
    // Row 18 fell to 19, row 16 fell two rows to 18.
    assert!(board.is_occupied(0, 19));
    assert!(board.is_occupied(9, 18));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_four_lines() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y);
    }
    assert_eq!(board.clear_lines(), 4);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_no_full_rows_remain_after_clear() {
    let mut board = Board::new();
    for y in [19, 18, 15, 12, 11] {
        fill_row(&mut board, y);
    }
    board.set(5, 17, BoardCell::filled(GREY));

    assert_eq!(board.clear_lines(), 5);
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!board.is_row_full(y), "row {} still full", y);
    }
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_on_empty_board_is_noop() {
    let mut board = Board::new();
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, Board::new());
}

#[test]
fn test_top_row_detection() {
    let mut board = Board::new();
    assert!(!board.is_game_over());
    board.set(9, 0, BoardCell::filled(GREY));
    assert!(board.is_game_over());
}

#[test]
fn test_drop_position() {
    let mut board = Board::new();
    let i = Piece::spawn(PieceType::I);
    // Bar on grid row 1: lands on the floor at y = 18.
    assert_eq!(board.drop_position(&i).y, 18);

    board.set(6, 10, BoardCell::filled(GREY));
    assert_eq!(board.drop_position(&i).y, 8);
}
