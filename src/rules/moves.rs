use super::error::RulesError;
use super::piece::PieceKind;
use super::square::{Square, Target};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A movement between two squares, with an optional promotion choice for
/// pawn moves landing on the back rank. The textual form is coordinate
/// notation, `e2e4` or `e7e8q`, the literal form exchanged with the
/// external engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a new move with validation
    pub fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Result<Self, RulesError> {
        if from == to {
            return Err(RulesError::NullMove(from));
        }

        if let Some(kind) = promotion {
            if kind.promotion_choice().is_none() {
                return Err(RulesError::InvalidPromotionKind(kind));
            }
            if to.row != 0 && to.row != 7 {
                return Err(RulesError::PromotionOffBackRank(to));
            }
        }

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// Create a new move without validation (for internal use when validity
    /// is guaranteed)
    pub const fn new_unchecked(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Create a simple move without promotion
    pub fn simple(from: Square, to: Square) -> Result<Self, RulesError> {
        Self::new(from, to, None)
    }

    /// Check if this is a castling move (king moves two squares horizontally)
    pub fn is_castling_shape(&self) -> bool {
        self.from.row == self.to.row && self.from.col.abs_diff(self.to.col) == 2
    }

    /// Decode a numeric (from, to) pair. The origin must be an ordinary
    /// square index; the destination may use the promotion extension.
    pub fn from_indices(from: u8, to: u8) -> Result<Self, RulesError> {
        let from = Square::from_index(from)?;
        let target = Target::decode(to)?;
        Self::new(from, target.square(), target.promotion_kind())
    }

    /// Numeric (from, to) pair, with the destination in the
    /// promotion-extended encoding when a promotion choice is present.
    pub fn to_indices(&self) -> (u8, u8) {
        let to = match self.promotion {
            Some(kind) => Target::Promotion {
                square: self.to,
                kind,
            }
            .encode(),
            None => Target::Plain(self.to).encode(),
        };
        (self.from.index(), to)
    }
}

// Display gives coordinate notation with a lowercase promotion code, the
// exact form the engine boundary consumes.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

// Implement FromStr for parsing coordinate move notation
impl FromStr for Move {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();

        match chars.len() {
            4 => {
                let from = Square::from_chars(chars[0], chars[1])?;
                let to = Square::from_chars(chars[2], chars[3])?;
                Self::new(from, to, None)
            }
            5 => {
                let from = Square::from_chars(chars[0], chars[1])?;
                let to = Square::from_chars(chars[2], chars[3])?;
                let promotion = PieceKind::from_promotion_code(chars[4])?;
                Self::new(from, to, Some(promotion))
            }
            _ => Err(RulesError::MalformedMove(s.to_string())),
        }
    }
}
