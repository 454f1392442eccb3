use super::error::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row of this color's back rank: rank 1 for White (row 7), rank 8 for
    /// Black (row 0).
    pub fn back_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row a pawn of this color promotes on (the opponent's back rank).
    pub fn promotion_row(&self) -> u8 {
        self.opposite().back_row()
    }

    /// Row this color's pawns start on.
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row delta a pawn of this color advances by. White pawns climb toward
    /// row 0, Black pawns descend toward row 7.
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

// Implement Display trait for human-readable output
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

// Implement FromStr for parsing with consistent error handling
impl FromStr for Color {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(RulesError::InvalidFen(format!(
                "Expected 'white' or 'black', got '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The four kinds a pawn may promote to, in promotion-choice order:
    /// choice 0 is Queen, 1 Knight, 2 Rook, 3 Bishop.
    pub const PROMOTION_ORDER: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Bishop,
    ];

    /// Uppercase FEN letter for this kind.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Position of this kind in the promotion-choice encoding, if it is a
    /// kind a pawn may become.
    pub fn promotion_choice(&self) -> Option<u8> {
        Self::PROMOTION_ORDER
            .iter()
            .position(|kind| kind == self)
            .map(|choice| choice as u8)
    }

    /// Parse a one-character promotion code as it appears in move notation.
    pub fn from_promotion_code(code: char) -> Result<Self, RulesError> {
        match code.to_ascii_lowercase() {
            'q' => Ok(PieceKind::Queen),
            'n' => Ok(PieceKind::Knight),
            'r' => Ok(PieceKind::Rook),
            'b' => Ok(PieceKind::Bishop),
            _ => Err(RulesError::InvalidPromotionCode(code)),
        }
    }
}

// Implement Display trait
impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-king castling eligibility. Both flags only ever go from true to
/// false over a board's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingRights {
    pub const fn all() -> Self {
        Self {
            kingside: true,
            queenside: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            kingside: false,
            queenside: false,
        }
    }

    pub fn any(&self) -> bool {
        self.kingside || self.queenside
    }
}

/// Kind-dependent state carried by a piece on the board. Pawns may be
/// capturable en passant for one ply; kings carry their castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceExtra {
    None,
    EnPassantEligible,
    Rights(CastlingRights),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub extra: PieceExtra,
}

impl Piece {
    /// A bare piece of the given kind. Kings start with no castling rights;
    /// rights are attached by the starting-position constructor or by the
    /// placement and FEN parsers.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        let extra = match kind {
            PieceKind::King => PieceExtra::Rights(CastlingRights::none()),
            _ => PieceExtra::None,
        };
        Self { kind, color, extra }
    }

    pub fn is_en_passant_eligible(&self) -> bool {
        self.extra == PieceExtra::EnPassantEligible
    }

    /// This piece's castling rights; empty for anything but a rights-carrying
    /// king.
    pub fn castling_rights(&self) -> CastlingRights {
        match self.extra {
            PieceExtra::Rights(rights) => rights,
            _ => CastlingRights::none(),
        }
    }

    /// Character in the 64-cell placement alphabet. The letter folds kind,
    /// color, and extra state together: en-passant-eligible pawns are E/e,
    /// kings are W/S/U/K by remaining rights (both, kingside, queenside,
    /// none). Uppercase is White.
    pub fn placement_char(&self) -> char {
        let letter = match (self.kind, self.extra) {
            (PieceKind::Pawn, PieceExtra::EnPassantEligible) => 'E',
            (PieceKind::King, _) => {
                let rights = self.castling_rights();
                match (rights.kingside, rights.queenside) {
                    (true, true) => 'W',
                    (true, false) => 'S',
                    (false, true) => 'U',
                    (false, false) => 'K',
                }
            }
            (kind, _) => kind.letter(),
        };
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    /// Inverse of [`Piece::placement_char`]. `.` (empty) is handled at the
    /// board level, not here.
    pub fn from_placement_char(c: char) -> Result<Self, RulesError> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let (kind, extra) = match c.to_ascii_uppercase() {
            'P' => (PieceKind::Pawn, PieceExtra::None),
            'E' => (PieceKind::Pawn, PieceExtra::EnPassantEligible),
            'N' => (PieceKind::Knight, PieceExtra::None),
            'B' => (PieceKind::Bishop, PieceExtra::None),
            'R' => (PieceKind::Rook, PieceExtra::None),
            'Q' => (PieceKind::Queen, PieceExtra::None),
            'K' => (PieceKind::King, PieceExtra::Rights(CastlingRights::none())),
            'S' => (
                PieceKind::King,
                PieceExtra::Rights(CastlingRights {
                    kingside: true,
                    queenside: false,
                }),
            ),
            'U' => (
                PieceKind::King,
                PieceExtra::Rights(CastlingRights {
                    kingside: false,
                    queenside: true,
                }),
            ),
            'W' => (PieceKind::King, PieceExtra::Rights(CastlingRights::all())),
            _ => return Err(RulesError::UnknownPieceChar(c)),
        };
        Ok(Self { kind, color, extra })
    }

    /// Standard FEN letter: kind cased by color, extra state collapsed.
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

// Display gives the placement-alphabet letter, which keeps board dumps
// faithful to the full cell state.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placement_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_alphabet_round_trips() {
        for c in "PENBRQKSUW".chars().flat_map(|c| [c, c.to_ascii_lowercase()]) {
            let piece = Piece::from_placement_char(c).unwrap();
            assert_eq!(piece.placement_char(), c);
        }
    }

    #[test]
    fn king_letters_encode_rights() {
        let king = Piece::from_placement_char('W').unwrap();
        assert_eq!(king.castling_rights(), CastlingRights::all());
        assert_eq!(king.color, Color::White);

        let king = Piece::from_placement_char('s').unwrap();
        assert!(king.castling_rights().kingside);
        assert!(!king.castling_rights().queenside);
        assert_eq!(king.color, Color::Black);

        let king = Piece::from_placement_char('u').unwrap();
        assert!(!king.castling_rights().kingside);
        assert!(king.castling_rights().queenside);
    }

    #[test]
    fn unknown_placement_char_rejected() {
        assert_eq!(
            Piece::from_placement_char('x'),
            Err(RulesError::UnknownPieceChar('x'))
        );
    }

    #[test]
    fn promotion_codes() {
        assert_eq!(
            PieceKind::from_promotion_code('q').unwrap(),
            PieceKind::Queen
        );
        assert_eq!(
            PieceKind::from_promotion_code('N').unwrap(),
            PieceKind::Knight
        );
        assert!(PieceKind::from_promotion_code('k').is_err());
        assert_eq!(PieceKind::Queen.promotion_choice(), Some(0));
        assert_eq!(PieceKind::Bishop.promotion_choice(), Some(3));
        assert_eq!(PieceKind::King.promotion_choice(), None);
    }

    #[test]
    fn fen_char_collapses_extra_state() {
        let flagged = Piece {
            kind: PieceKind::Pawn,
            color: Color::Black,
            extra: PieceExtra::EnPassantEligible,
        };
        assert_eq!(flagged.fen_char(), 'p');
        let king = Piece::from_placement_char('W').unwrap();
        assert_eq!(king.fen_char(), 'K');
    }
}
