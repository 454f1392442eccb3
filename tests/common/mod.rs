//! Common test utilities
//!
//! Shared helpers for the rules integration tests: square and move
//! literals, and boards assembled from (square, letter) lists in the
//! placement alphabet.

#![allow(dead_code)]

use arbiter::rules::{Board, Color, Game, Move, Square};

/// Parse a square literal.
pub fn sq(text: &str) -> Square {
    text.parse().expect("test square literal")
}

/// Parse a coordinate-notation move literal.
pub fn mv(text: &str) -> Move {
    text.parse().expect("test move literal")
}

/// Build a board holding exactly the given pieces. Letters use the
/// placement alphabet, so `'W'` is a white king with both castling rights
/// and `'e'` a black pawn capturable en passant.
pub fn board_with(pieces: &[(&str, char)]) -> Board {
    let mut cells = vec!['.'; 64];
    for &(square, letter) in pieces {
        cells[sq(square).index() as usize] = letter;
    }
    let placement: String = cells.into_iter().collect();
    Board::from_placement(&placement).expect("test placement")
}

/// Wrap a piece list as a game with the given side to move.
pub fn game_with(pieces: &[(&str, char)], to_move: Color) -> Game {
    Game::from_board(board_with(pieces), to_move)
}
