use super::board::Board;
use super::moves::Move;
use super::piece::{Color, Piece, PieceKind};
use super::square::Square;
use std::collections::HashSet;

impl Board {
    /// Fully legal destination squares for the piece on `from`; empty when
    /// the square is empty. Castling appears as the king's two-file step.
    /// Promotion moves appear once, as their destination square; the
    /// promotion choice is supplied when the move is applied. Order is
    /// deterministic and free of duplicates.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };
        let candidates = match piece.kind {
            PieceKind::Pawn => self.pawn_candidates(from, piece.color),
            PieceKind::King => self.king_candidates(from, piece),
            _ => self.vision_candidates(from, piece.color),
        };
        candidates
            .into_iter()
            .filter(|&to| !self.leaves_mover_in_check(from, to, piece))
            .collect()
    }

    /// Whether `mv` is legal for the side owning the piece on its origin.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves(mv.from).contains(&mv.to)
    }

    /// Pseudo-legal candidates for knights and sliding pieces: vision minus
    /// friendly-occupied squares.
    fn vision_candidates(&self, from: Square, mover: Color) -> Vec<Square> {
        self.vision(from)
            .into_iter()
            .filter(|&square| {
                self.piece_at(square)
                    .map_or(true, |piece| piece.color != mover)
            })
            .collect()
    }

    fn pawn_candidates(&self, from: Square, mover: Color) -> Vec<Square> {
        let mut candidates = Vec::new();
        let dir = mover.pawn_direction();

        // Single push onto an empty square, and from the starting rank a
        // double push through two empty squares.
        if let Some(ahead) = from.offset(dir, 0) {
            if self.piece_at(ahead).is_none() {
                candidates.push(ahead);
                if from.row == mover.pawn_start_row() {
                    if let Some(two_ahead) = ahead.offset(dir, 0) {
                        if self.piece_at(two_ahead).is_none() {
                            candidates.push(two_ahead);
                        }
                    }
                }
            }
        }

        // Diagonal captures where an enemy stands in vision.
        for target in self.vision(from) {
            if self
                .piece_at(target)
                .is_some_and(|piece| piece.color != mover)
            {
                candidates.push(target);
            }
        }

        // En passant: an eligible enemy pawn directly beside this one; the
        // landing square diagonally behind it must be empty (it always is
        // in a position reached by play).
        for dc in [-1i8, 1] {
            let Some(beside) = from.offset(0, dc) else {
                continue;
            };
            let eligible = self.piece_at(beside).is_some_and(|piece| {
                piece.kind == PieceKind::Pawn
                    && piece.color != mover
                    && piece.is_en_passant_eligible()
            });
            if eligible {
                if let Some(landing) = beside.offset(dir, 0) {
                    if self.piece_at(landing).is_none() {
                        candidates.push(landing);
                    }
                }
            }
        }

        candidates
    }

    fn king_candidates(&self, from: Square, king: Piece) -> Vec<Square> {
        let attacked = self.attacked_squares(king.color.opposite());
        let mut candidates: Vec<Square> = self
            .vision(from)
            .into_iter()
            .filter(|square| !attacked.contains(square))
            .filter(|&square| {
                self.piece_at(square)
                    .map_or(true, |piece| piece.color != king.color)
            })
            .collect();
        candidates.extend(self.castling_candidates(from, king, &attacked));
        candidates
    }

    /// Castling requires, per side: the right retained, the intervening
    /// squares empty, the king's square and its whole path unattacked, the
    /// rook still on its home square, and the king not in check. The king
    /// must also stand on its own home square; each side is gated on its
    /// own right.
    fn castling_candidates(
        &self,
        from: Square,
        king: Piece,
        attacked: &HashSet<Square>,
    ) -> Vec<Square> {
        let color = king.color;
        let back = color.back_row();
        if from != Square::new_unchecked(back, 4) {
            return Vec::new();
        }
        let rights = king.castling_rights();
        let in_check = self
            .king_squares(color)
            .iter()
            .any(|square| attacked.contains(square));
        if !rights.any() || in_check {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        if rights.kingside
            && self.columns_empty(back, &[5, 6])
            && path_safe(attacked, back, &[4, 5, 6])
            && self.rook_on(Square::new_unchecked(back, 7), color)
        {
            candidates.push(Square::new_unchecked(back, 6));
        }
        if rights.queenside
            && self.columns_empty(back, &[1, 2, 3])
            && path_safe(attacked, back, &[2, 3, 4])
            && self.rook_on(Square::new_unchecked(back, 0), color)
        {
            candidates.push(Square::new_unchecked(back, 2));
        }
        candidates
    }

    fn columns_empty(&self, row: u8, cols: &[u8]) -> bool {
        cols.iter()
            .all(|&col| self.piece_at(Square::new_unchecked(row, col)).is_none())
    }

    fn rook_on(&self, square: Square, color: Color) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.kind == PieceKind::Rook && piece.color == color)
    }

    /// Scratch-board test: would moving `from` to `to` leave the mover's own
    /// side in check? The candidate is applied without a promotion choice;
    /// for check purposes the unpromoted pawn blocks exactly like any
    /// promoted piece would.
    fn leaves_mover_in_check(&self, from: Square, to: Square, piece: Piece) -> bool {
        let mut scratch = self.clone();
        scratch.apply_piece_move(Move::new_unchecked(from, to, None), piece);
        scratch.is_in_check(piece.color)
    }
}

/// Transit safety is membership of the squares themselves in the attacked
/// set, never a comparison against cell contents.
fn path_safe(attacked: &HashSet<Square>, row: u8, cols: &[u8]) -> bool {
    cols.iter()
        .all(|&col| !attacked.contains(&Square::new_unchecked(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn opening_pawn_has_two_pushes() {
        let board = Board::new();
        let moves = board.legal_moves(sq("e2"));
        assert_eq!(moves, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn opening_knight_has_two_jumps() {
        let board = Board::new();
        let mut moves = board.legal_moves(sq("g1"));
        moves.sort();
        assert_eq!(moves, vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn blocked_pieces_have_no_moves_at_the_start() {
        let board = Board::new();
        for s in ["a1", "c1", "d1", "e1", "f1", "h1"] {
            assert!(board.legal_moves(sq(s)).is_empty(), "{s} should be stuck");
        }
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::new();
        assert!(board.legal_moves(sq("e4")).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_expose_its_king() {
        // White king e1, white rook e4 pinned by the black rook e8.
        let mut cells = vec!['.'; 64];
        cells[4] = 'r'; // e8
        cells[36] = 'R'; // e4
        cells[60] = 'K'; // e1
        let board = Board::from_placement(&cells.iter().collect::<String>()).unwrap();
        let moves = board.legal_moves(sq("e4"));
        // The rook may slide along the e-file, including capturing the
        // pinner, but never sideways.
        assert!(moves.contains(&sq("e8")));
        assert!(moves.contains(&sq("e2")));
        assert!(!moves.contains(&sq("a4")));
        assert!(!moves.contains(&sq("h4")));
    }

    #[test]
    fn king_cannot_step_into_vision() {
        // Black rook a4 sweeps the fourth rank; the white king on e3 may not
        // step onto it.
        let mut cells = vec!['.'; 64];
        cells[32] = 'r'; // a4
        cells[44] = 'K'; // e3
        let board = Board::from_placement(&cells.iter().collect::<String>()).unwrap();
        let moves = board.legal_moves(sq("e3"));
        assert!(!moves.contains(&sq("e4")));
        assert!(!moves.contains(&sq("d4")));
        assert!(!moves.contains(&sq("f4")));
        assert!(moves.contains(&sq("e2")));
    }

    #[test]
    fn king_cannot_capture_a_defended_piece() {
        // Black knight d2 defended by the bishop a5; the white king on e1
        // cannot take it.
        let mut cells = vec!['.'; 64];
        cells[24] = 'b'; // a5
        cells[51] = 'n'; // d2
        cells[60] = 'K'; // e1
        let board = Board::from_placement(&cells.iter().collect::<String>()).unwrap();
        let moves = board.legal_moves(sq("e1"));
        assert!(!moves.contains(&sq("d2")));
    }
}
