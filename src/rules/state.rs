use super::board::Board;
use super::piece::{Color, PieceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sides currently stand in check. Aggregated across every king on
/// the board, so positions with zero or several kings per color still get
/// a coherent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    None,
    White,
    Black,
    Both,
}

impl CheckState {
    pub fn covers(&self, color: Color) -> bool {
        matches!(
            (self, color),
            (CheckState::Both, _)
                | (CheckState::White, Color::White)
                | (CheckState::Black, Color::Black)
        )
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckState::None => write!(f, "no check"),
            CheckState::White => write!(f, "White is in check"),
            CheckState::Black => write!(f, "Black is in check"),
            CheckState::Both => write!(f, "both kings are in check"),
        }
    }
}

impl Board {
    /// True when any king of `color` stands in the opponent's vision. A
    /// color with no king on the board is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let kings = self.king_squares(color);
        if kings.is_empty() {
            return false;
        }
        let attacked = self.attacked_squares(color.opposite());
        kings.iter().any(|square| attacked.contains(square))
    }

    pub fn check_status(&self) -> CheckState {
        match (
            self.is_in_check(Color::White),
            self.is_in_check(Color::Black),
        ) {
            (true, true) => CheckState::Both,
            (true, false) => CheckState::White,
            (false, true) => CheckState::Black,
            (false, false) => CheckState::None,
        }
    }

    /// True when `color` has at least one legal move anywhere on the board.
    pub fn has_legal_move(&self, color: Color) -> bool {
        let occupied: Vec<_> = self.pieces_of(color).map(|(square, _)| square).collect();
        occupied
            .into_iter()
            .any(|square| !self.legal_moves(square).is_empty())
    }

    /// Material test for the insufficient-material draw: bare kings, a lone
    /// minor piece, or any number of bishops all confined to one square
    /// shade. Any pawn, rook, or queen keeps mating chances alive.
    pub fn insufficient_material(&self) -> bool {
        let mut knights = 0u32;
        let mut light_bishop = false;
        let mut dark_bishop = false;
        for (square, piece) in self.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    if (square.row + square.col) % 2 == 0 {
                        light_bishop = true;
                    } else {
                        dark_bishop = true;
                    }
                }
                _ => return false,
            }
        }
        match knights {
            0 => !(light_bishop && dark_bishop),
            1 => !light_bishop && !dark_bishop,
            _ => false,
        }
    }
}
