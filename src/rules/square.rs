use super::error::RulesError;
use super::piece::PieceKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board coordinates. Row 0 is rank 8 (Black's back rank) and row 7 is
/// rank 1; col 0 is the a-file. "a8" is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8, // 0-7, top (rank 8) to bottom (rank 1)
    pub col: u8, // 0-7 corresponding to a-h
}

impl Square {
    pub fn new(row: u8, col: u8) -> Result<Self, RulesError> {
        if row > 7 || col > 7 {
            return Err(RulesError::SquareOutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// Create a square without validation (for internal use when bounds are
    /// guaranteed)
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Create a square from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, RulesError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) || !('1'..='8').contains(&rank) {
            return Err(RulesError::MalformedSquare(format!("{file}{rank}")));
        }
        let col = file_lower as u8 - b'a';
        let row = b'8' - rank as u8;
        Ok(Square { row, col })
    }

    // Convert col to its file character (0 -> 'a', 1 -> 'b', etc.)
    pub fn file_char(&self) -> char {
        (self.col + b'a') as char
    }

    // Convert row to its rank character (0 -> '8', 7 -> '1')
    pub fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    /// Ordinary numeric index, `row * 8 + col`, in 0..=63.
    pub fn index(&self) -> u8 {
        self.row * 8 + self.col
    }

    pub fn from_index(index: u8) -> Result<Self, RulesError> {
        if index > 63 {
            return Err(RulesError::IndexOutOfRange(index));
        }
        Ok(Square {
            row: index / 8,
            col: index % 8,
        })
    }

    /// Step by a (row, col) delta; None when the result leaves the board.
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Square> {
        let row = self.row as i8 + row_delta;
        let col = self.col as i8 + col_delta;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares, row by row from a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }
}

// Implement Display trait for algebraic notation
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

// Implement FromStr for parsing algebraic notation
impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(RulesError::MalformedSquare(s.to_string()));
        }
        Self::from_chars(chars[0], chars[1])
    }
}

const PROMOTION_BASE_RANK_8: u8 = 64;
const PROMOTION_BASE_RANK_1: u8 = 96;

/// A move destination in the numeric wire form: a plain square index in
/// 0..=63, or a promotion target in 64..=127 that folds the landing file
/// together with the promotion choice. Rank-8 promotions occupy
/// `64 + file*4 + choice`, rank-1 promotions `96 + file*4 + choice`, with
/// choice order Queen, Knight, Rook, Bishop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Plain(Square),
    Promotion { square: Square, kind: PieceKind },
}

impl Target {
    /// Build a promotion target, rejecting destinations off the back ranks
    /// and kinds a pawn cannot become.
    pub fn promotion(square: Square, kind: PieceKind) -> Result<Self, RulesError> {
        if square.row != 0 && square.row != 7 {
            return Err(RulesError::PromotionOffBackRank(square));
        }
        if kind.promotion_choice().is_none() {
            return Err(RulesError::InvalidPromotionKind(kind));
        }
        Ok(Target::Promotion { square, kind })
    }

    pub fn decode(index: u8) -> Result<Self, RulesError> {
        match index {
            0..=63 => Ok(Target::Plain(Square::from_index(index)?)),
            64..=95 => {
                let offset = index - PROMOTION_BASE_RANK_8;
                Ok(Target::Promotion {
                    square: Square::new_unchecked(0, offset / 4),
                    kind: PieceKind::PROMOTION_ORDER[(offset % 4) as usize],
                })
            }
            96..=127 => {
                let offset = index - PROMOTION_BASE_RANK_1;
                Ok(Target::Promotion {
                    square: Square::new_unchecked(7, offset / 4),
                    kind: PieceKind::PROMOTION_ORDER[(offset % 4) as usize],
                })
            }
            _ => Err(RulesError::IndexOutOfRange(index)),
        }
    }

    /// Numeric index for this target. Targets built through
    /// [`Target::promotion`] or [`Target::decode`] always encode losslessly.
    pub fn encode(&self) -> u8 {
        match self {
            Target::Plain(square) => square.index(),
            Target::Promotion { square, kind } => {
                let base = if square.row == 0 {
                    PROMOTION_BASE_RANK_8
                } else {
                    PROMOTION_BASE_RANK_1
                };
                let choice = kind.promotion_choice().unwrap_or(0);
                base + square.col * 4 + choice
            }
        }
    }

    /// The landing square; for a promotion, the back-rank square itself.
    pub fn square(&self) -> Square {
        match self {
            Target::Plain(square) => *square,
            Target::Promotion { square, .. } => *square,
        }
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self {
            Target::Plain(_) => None,
            Target::Promotion { kind, .. } => Some(*kind),
        }
    }
}
