use super::moves::Move;
use super::piece::{Color, PieceKind};
use super::square::Square;
use thiserror::Error;

/// Everything the rules layer can reject. Parse failures are distinct from
/// legality rejections: a syntactically valid move that the position does not
/// allow is `IllegalMove`, never a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("Malformed square '{0}': expected a file a-h followed by a rank 1-8")]
    MalformedSquare(String),

    #[error("Square out of bounds: row {row}, col {col}")]
    SquareOutOfBounds { row: u8, col: u8 },

    #[error("Malformed move '{0}': expected coordinate form such as 'e2e4' or 'e7e8q'")]
    MalformedMove(String),

    #[error("Move must change squares, got {0} twice")]
    NullMove(Square),

    #[error("Invalid promotion code '{0}': expected one of q, n, r, b")]
    InvalidPromotionCode(char),

    #[error("Cannot promote to {0:?}")]
    InvalidPromotionKind(PieceKind),

    #[error("Promotion requires a back-rank destination, got {0}")]
    PromotionOffBackRank(Square),

    #[error("Numeric square index {0} is out of range")]
    IndexOutOfRange(u8),

    #[error("Placement string must be exactly 64 characters, got {0}")]
    BadPlacementLength(usize),

    #[error("Unknown piece character '{0}' in placement string")]
    UnknownPieceChar(char),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("No piece on {0}")]
    EmptyOrigin(Square),

    #[error("It is {expected}'s turn, not {moved}'s")]
    OutOfTurn { expected: Color, moved: Color },

    #[error("Illegal move {0}")]
    IllegalMove(Move),

    #[error("Move {0} reaches the back rank and requires a promotion choice")]
    PromotionRequired(Move),

    #[error("Move {0} cannot carry a promotion")]
    PromotionNotAllowed(Move),
}
