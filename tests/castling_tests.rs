//! Castling tests
//!
//! The five-condition gate per side, the two-piece application, and the
//! permanence of revoked rights.

mod common;

use arbiter::rules::{Board, CastlingRights, Color, Game, PieceKind};
use common::{board_with, mv, sq};

/// White king on e1 with both rights, both rooks home, a bare black king
/// on e8, plus whatever `extra` adds.
fn castling_board(extra: &[(&str, char)]) -> Board {
    let mut pieces = vec![("e1", 'W'), ("a1", 'R'), ("h1", 'R'), ("e8", 'k')];
    pieces.extend_from_slice(extra);
    board_with(&pieces)
}

#[test]
fn both_wings_available_when_every_condition_holds() {
    let moves = castling_board(&[]).legal_moves(sq("e1"));
    assert!(moves.contains(&sq("g1")), "kingside");
    assert!(moves.contains(&sq("c1")), "queenside");
}

#[test]
fn kingside_application_moves_king_and_rook_together() {
    let mut board = castling_board(&[]);
    board.apply_move(mv("e1g1")).unwrap();
    assert_eq!(board.piece_at(sq("g1")).unwrap().kind, PieceKind::King);
    assert_eq!(board.piece_at(sq("f1")).unwrap().kind, PieceKind::Rook);
    assert!(board.piece_at(sq("e1")).is_none());
    assert!(board.piece_at(sq("h1")).is_none());
    assert_eq!(board.castling_rights(Color::White), CastlingRights::none());
    // The queenside rook stays put.
    assert_eq!(board.piece_at(sq("a1")).unwrap().kind, PieceKind::Rook);
}

#[test]
fn queenside_application_brings_the_a_rook_to_d1() {
    let mut board = castling_board(&[]);
    board.apply_move(mv("e1c1")).unwrap();
    assert_eq!(board.piece_at(sq("c1")).unwrap().kind, PieceKind::King);
    assert_eq!(board.piece_at(sq("d1")).unwrap().kind, PieceKind::Rook);
    assert!(board.piece_at(sq("a1")).is_none());
    assert!(board.piece_at(sq("e1")).is_none());
    assert_eq!(board.castling_rights(Color::White), CastlingRights::none());
}

#[test]
fn black_castles_on_its_own_back_rank() {
    let mut board = board_with(&[("e8", 'w'), ("a8", 'r'), ("h8", 'r'), ("e1", 'K')]);
    assert!(board.legal_moves(sq("e8")).contains(&sq("g8")));
    assert!(board.legal_moves(sq("e8")).contains(&sq("c8")));
    board.apply_move(mv("e8c8")).unwrap();
    assert_eq!(board.piece_at(sq("c8")).unwrap().kind, PieceKind::King);
    assert_eq!(board.piece_at(sq("d8")).unwrap().kind, PieceKind::Rook);
    assert!(board.piece_at(sq("a8")).is_none());
}

#[test]
fn each_wing_is_gated_on_its_own_right() {
    // Kingside-only king.
    let board = board_with(&[("e1", 'S'), ("a1", 'R'), ("h1", 'R'), ("e8", 'k')]);
    let moves = board.legal_moves(sq("e1"));
    assert!(moves.contains(&sq("g1")));
    assert!(!moves.contains(&sq("c1")));

    // Queenside-only king: the mirror image.
    let board = board_with(&[("e1", 'U'), ("a1", 'R'), ("h1", 'R'), ("e8", 'k')]);
    let moves = board.legal_moves(sq("e1"));
    assert!(!moves.contains(&sq("g1")));
    assert!(moves.contains(&sq("c1")), "queenside reads the queenside right");
}

#[test]
fn intervening_pieces_block_castling() {
    let board = castling_board(&[("g1", 'N')]);
    assert!(!board.legal_moves(sq("e1")).contains(&sq("g1")));

    // b1 blocks queenside even though the king never crosses it.
    let board = castling_board(&[("b1", 'N')]);
    assert!(!board.legal_moves(sq("e1")).contains(&sq("c1")));
}

#[test]
fn attacked_transit_squares_block_castling() {
    // Rook f8 covers f1, the kingside transit square.
    let board = castling_board(&[("f8", 'r')]);
    let moves = board.legal_moves(sq("e1"));
    assert!(!moves.contains(&sq("g1")), "attacked transit blocks the wing");
    assert!(moves.contains(&sq("c1")), "the other wing is unaffected");

    // d1 is on the queenside path.
    let board = castling_board(&[("d8", 'r')]);
    assert!(!board.legal_moves(sq("e1")).contains(&sq("c1")));

    // b1 is not: the king stops on c1.
    let board = castling_board(&[("b8", 'r')]);
    assert!(board.legal_moves(sq("e1")).contains(&sq("c1")));
}

#[test]
fn castling_requires_the_rook_at_home() {
    // No rook on h1 at all.
    let board = board_with(&[("e1", 'W'), ("a1", 'R'), ("e8", 'k')]);
    let moves = board.legal_moves(sq("e1"));
    assert!(!moves.contains(&sq("g1")));
    assert!(moves.contains(&sq("c1")));

    // An enemy knight sitting on h1 does not count as the rook.
    let board = board_with(&[("e1", 'W'), ("a1", 'R'), ("h1", 'n'), ("e8", 'k')]);
    assert!(!board.legal_moves(sq("e1")).contains(&sq("g1")));
}

#[test]
fn a_checked_king_cannot_castle_out() {
    let board = castling_board(&[("e5", 'r')]);
    let moves = board.legal_moves(sq("e1"));
    assert!(!moves.contains(&sq("g1")));
    assert!(!moves.contains(&sq("c1")));
}

#[test]
fn rights_once_revoked_never_return() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    game.play(mv("h1h4")).unwrap();
    let rights = game.board().castling_rights(Color::White);
    assert!(!rights.kingside && rights.queenside);

    game.play(mv("e8d8")).unwrap();
    assert_eq!(game.board().castling_rights(Color::Black), CastlingRights::none());

    // Returning home restores nothing.
    game.play(mv("h4h1")).unwrap();
    game.play(mv("d8e8")).unwrap();
    let rights = game.board().castling_rights(Color::White);
    assert!(!rights.kingside && rights.queenside);
    assert_eq!(game.board().castling_rights(Color::Black), CastlingRights::none());

    let moves = game.board().legal_moves(sq("e1"));
    assert!(!moves.contains(&sq("g1")), "kingside is gone for good");
    assert!(moves.contains(&sq("c1")), "queenside survives untouched");
}

#[test]
fn fen_records_the_castling_aftermath() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    game.play(mv("e1g1")).unwrap();
    assert_eq!(game.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
}
