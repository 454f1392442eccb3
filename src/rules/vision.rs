use super::board::Board;
use super::piece::{Color, PieceKind};
use super::square::Square;
use std::collections::HashSet;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl Board {
    /// Squares the piece on `square` threatens or defends given current
    /// blockers. Sliding pieces see every empty square along their rays plus
    /// the first occupied square, friend or foe; knights and kings see their
    /// fixed offsets clipped to the board; pawns see only their two capture
    /// diagonals. An empty square has no vision. Each square appears at most
    /// once.
    pub fn vision(&self, square: Square) -> Vec<Square> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };
        match piece.kind {
            PieceKind::Rook => self.ray_vision(square, &ROOK_DIRECTIONS),
            PieceKind::Bishop => self.ray_vision(square, &BISHOP_DIRECTIONS),
            PieceKind::Queen => self.ray_vision(square, &ALL_DIRECTIONS),
            PieceKind::Knight => step_vision(square, &KNIGHT_JUMPS),
            PieceKind::King => step_vision(square, &ALL_DIRECTIONS),
            PieceKind::Pawn => {
                let dr = piece.color.pawn_direction();
                [(dr, -1), (dr, 1)]
                    .iter()
                    .filter_map(|&(dr, dc)| square.offset(dr, dc))
                    .collect()
            }
        }
    }

    fn ray_vision(&self, from: Square, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut seen = Vec::new();
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(next) = current.offset(dr, dc) {
                seen.push(next);
                if self.piece_at(next).is_some() {
                    break;
                }
                current = next;
            }
        }
        seen
    }

    /// Union of vision over every piece of `by`: the squares that color
    /// currently attacks or defends.
    pub fn attacked_squares(&self, by: Color) -> HashSet<Square> {
        let mut attacked = HashSet::new();
        for (square, _) in self.pieces_of(by) {
            attacked.extend(self.vision(square));
        }
        attacked
    }
}

fn step_vision(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}
