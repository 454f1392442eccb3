use super::board::Board;
use super::error::RulesError;
use super::moves::Move;
use super::piece::{Color, Piece, PieceExtra, PieceKind};
use super::square::Square;
use super::state::CheckState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Terminal classification for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveDraw,
    InsufficientMaterial,
}

impl Status {
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::Ongoing)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ongoing => write!(f, "ongoing"),
            Status::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Status::Stalemate => write!(f, "stalemate"),
            Status::FiftyMoveDraw => write!(f, "draw by the fifty-move rule"),
            Status::InsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

/// A playable session: the board plus the side to move and the clocks FEN
/// carries. `play` is the validated mutation path; it refuses anything the
/// position does not allow, then applies, updates the counters, flips the
/// turn, and reports the new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Color,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Game {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Wrap an existing board as a fresh session with zeroed clocks.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self {
            board,
            to_move,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        self.board.legal_moves(from)
    }

    pub fn check_state(&self) -> CheckState {
        self.board.check_status()
    }

    /// Validated move application. Rejects, in order: an empty origin, a
    /// piece of the wrong color, a missing or spurious promotion choice, and
    /// a destination outside the piece's legal set. Only then mutates.
    pub fn play(&mut self, mv: Move) -> Result<Status, RulesError> {
        let piece = self
            .board
            .piece_at(mv.from)
            .ok_or(RulesError::EmptyOrigin(mv.from))?;
        if piece.color != self.to_move {
            return Err(RulesError::OutOfTurn {
                expected: self.to_move,
                moved: piece.color,
            });
        }

        let promoting = piece.kind == PieceKind::Pawn && mv.to.row == piece.color.promotion_row();
        if promoting && mv.promotion.is_none() {
            return Err(RulesError::PromotionRequired(mv));
        }
        if !promoting && mv.promotion.is_some() {
            return Err(RulesError::PromotionNotAllowed(mv));
        }

        if !self.board.legal_moves(mv.from).contains(&mv.to) {
            return Err(RulesError::IllegalMove(mv));
        }

        // Capture includes en passant: a pawn changing file always takes.
        let is_capture = self.board.piece_at(mv.to).is_some()
            || (piece.kind == PieceKind::Pawn && mv.from.col != mv.to.col);
        self.board.apply_move(mv)?;

        if piece.kind == PieceKind::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.to_move = self.to_move.opposite();

        let status = self.status();
        debug!("Played {}; {} to move, status {}", mv, self.to_move, status);
        Ok(status)
    }

    /// Classification for the side to move: mate and stalemate from the
    /// board, then the clock and material draws layered on top.
    pub fn status(&self) -> Status {
        if !self.board.has_legal_move(self.to_move) {
            return if self.board.is_in_check(self.to_move) {
                Status::Checkmate {
                    winner: self.to_move.opposite(),
                }
            } else {
                Status::Stalemate
            };
        }
        if self.halfmove_clock >= 100 {
            return Status::FiftyMoveDraw;
        }
        if self.board.insufficient_material() {
            return Status::InsufficientMaterial;
        }
        Status::Ongoing
    }

    /// Parse the six-field FEN form. Castling letters attach to the king
    /// standing on its home square; an en passant target must have its pawn
    /// in front of it.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(RulesError::InvalidFen(format!(
                "Expected 6 fields, got {}",
                fields.len()
            )));
        }

        let mut board = parse_fen_placement(fields[0])?;
        let to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(RulesError::InvalidFen(format!(
                    "Active color must be 'w' or 'b', got '{other}'"
                )))
            }
        };
        apply_castling_field(&mut board, fields[2])?;
        apply_en_passant_field(&mut board, fields[3])?;

        let halfmove_clock: u16 = fields[4].parse().map_err(|_| {
            RulesError::InvalidFen(format!("Invalid halfmove clock '{}'", fields[4]))
        })?;
        let fullmove_number: u16 = fields[5].parse().map_err(|_| {
            RulesError::InvalidFen(format!("Invalid fullmove number '{}'", fields[5]))
        })?;
        if fullmove_number == 0 {
            return Err(RulesError::InvalidFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            board,
            to_move,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Produce the six-field FEN form. Castling letters are derived by
    /// scanning for kings that still carry rights; the en passant target is
    /// the square directly behind any flagged pawn.
    pub fn to_fen(&self) -> String {
        let placement = self.fen_placement();
        let active = match self.to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let castling = self.fen_castling();
        let en_passant = self.fen_en_passant();
        format!(
            "{placement} {active} {castling} {en_passant} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }

    fn fen_placement(&self) -> String {
        let mut out = String::new();
        for row in 0..8u8 {
            if row > 0 {
                out.push('/');
            }
            let mut empties = 0u8;
            for col in 0..8u8 {
                match self.board.piece_at(Square::new_unchecked(row, col)) {
                    Some(piece) => {
                        if empties > 0 {
                            out.push((b'0' + empties) as char);
                            empties = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                out.push((b'0' + empties) as char);
            }
        }
        out
    }

    fn fen_castling(&self) -> String {
        let white = self.board.castling_rights(Color::White);
        let black = self.board.castling_rights(Color::Black);
        let mut letters = String::new();
        if white.kingside {
            letters.push('K');
        }
        if white.queenside {
            letters.push('Q');
        }
        if black.kingside {
            letters.push('k');
        }
        if black.queenside {
            letters.push('q');
        }
        if letters.is_empty() {
            letters.push('-');
        }
        letters
    }

    fn fen_en_passant(&self) -> String {
        for (square, piece) in self.board.pieces() {
            if piece.is_en_passant_eligible() {
                let behind_row = (square.row as i8 - piece.color.pawn_direction()) as u8;
                return Square::new_unchecked(behind_row, square.col).to_string();
            }
        }
        "-".to_string()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_fen_placement(text: &str) -> Result<Board, RulesError> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(RulesError::InvalidFen(format!(
            "Expected 8 ranks in placement, got {}",
            ranks.len()
        )));
    }
    let mut board = Board::empty();
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank_number = 8 - row;
        let mut col: u8 = 0;
        for c in rank_text.chars() {
            if let Some(run) = c.to_digit(10) {
                if run == 0 || run > 8 {
                    return Err(RulesError::InvalidFen(format!(
                        "Invalid empty-square run '{c}' in rank {rank_number}"
                    )));
                }
                // col <= 8 entering each iteration, so the sum tops
                // out at 16.
                col += run as u8;
                if col > 8 {
                    return Err(RulesError::InvalidFen(format!(
                        "Rank {rank_number} overflows 8 squares"
                    )));
                }
            } else {
                if col > 7 {
                    return Err(RulesError::InvalidFen(format!(
                        "Rank {rank_number} overflows 8 squares"
                    )));
                }
                let piece = fen_piece(c)?;
                board.set(Square::new_unchecked(row as u8, col), Some(piece));
                col += 1;
            }
        }
        if col != 8 {
            return Err(RulesError::InvalidFen(format!(
                "Rank {rank_number} does not have exactly 8 squares"
            )));
        }
    }
    Ok(board)
}

// FEN placement letters are the standard twelve; extra state arrives through
// the castling and en passant fields, so kings start bare here.
fn fen_piece(c: char) -> Result<Piece, RulesError> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_uppercase() {
        'P' => PieceKind::Pawn,
        'N' => PieceKind::Knight,
        'B' => PieceKind::Bishop,
        'R' => PieceKind::Rook,
        'Q' => PieceKind::Queen,
        'K' => PieceKind::King,
        _ => {
            return Err(RulesError::InvalidFen(format!(
                "Invalid piece character '{c}'"
            )))
        }
    };
    Ok(Piece::new(kind, color))
}

fn apply_castling_field(board: &mut Board, text: &str) -> Result<(), RulesError> {
    if text == "-" {
        return Ok(());
    }
    let mut seen = HashSet::new();
    for c in text.chars() {
        let (color, kingside) = match c {
            'K' => (Color::White, true),
            'Q' => (Color::White, false),
            'k' => (Color::Black, true),
            'q' => (Color::Black, false),
            _ => {
                return Err(RulesError::InvalidFen(format!(
                    "Invalid castling character '{c}'"
                )))
            }
        };
        if !seen.insert(c) {
            return Err(RulesError::InvalidFen(format!(
                "Duplicate castling character '{c}'"
            )));
        }
        grant_castling_right(board, color, kingside);
    }
    Ok(())
}

// A right with no king on its home square is meaningless; such letters are
// dropped rather than rejected.
fn grant_castling_right(board: &mut Board, color: Color, kingside: bool) {
    let home = Square::new_unchecked(color.back_row(), 4);
    if let Some(mut king) = board.piece_at(home) {
        if king.kind == PieceKind::King && king.color == color {
            let mut rights = king.castling_rights();
            if kingside {
                rights.kingside = true;
            } else {
                rights.queenside = true;
            }
            king.extra = PieceExtra::Rights(rights);
            board.set(home, Some(king));
        }
    }
}

fn apply_en_passant_field(board: &mut Board, text: &str) -> Result<(), RulesError> {
    if text == "-" {
        return Ok(());
    }
    let target: Square = text
        .parse()
        .map_err(|_| RulesError::InvalidFen(format!("Invalid en passant square '{text}'")))?;
    // A rank-3 target points at a White pawn on rank 4; a rank-6 target at a
    // Black pawn on rank 5.
    let (color, pawn_row) = match target.row {
        5 => (Color::White, 4),
        2 => (Color::Black, 3),
        _ => {
            return Err(RulesError::InvalidFen(format!(
                "En passant square must be on rank 3 or 6, got '{text}'"
            )))
        }
    };
    let pawn_square = Square::new_unchecked(pawn_row, target.col);
    match board.piece_at(pawn_square) {
        Some(mut pawn) if pawn.kind == PieceKind::Pawn && pawn.color == color => {
            pawn.extra = PieceExtra::EnPassantEligible;
            board.set(pawn_square, Some(pawn));
            Ok(())
        }
        _ => Err(RulesError::InvalidFen(format!(
            "En passant square '{text}' has no matching pawn"
        ))),
    }
}
