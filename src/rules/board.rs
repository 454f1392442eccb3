use super::error::RulesError;
use super::moves::Move;
use super::piece::{CastlingRights, Color, Piece, PieceExtra, PieceKind};
use super::square::Square;

/// The 8x8 mailbox. Row 0 holds rank 8 (Black's back rank), row 7 rank 1.
///
/// A board is built once, from the starting position, a placement string, or
/// FEN, and afterwards changes only through [`Board::apply_move`]. Cloning
/// yields the independent scratch copies the legality filter mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// The standard starting position; both kings carry both castling rights.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, &kind) in BACK_RANK_ORDER.iter().enumerate() {
            let col = col as u8;
            let mut black = Piece::new(kind, Color::Black);
            let mut white = Piece::new(kind, Color::White);
            if kind == PieceKind::King {
                black.extra = PieceExtra::Rights(CastlingRights::all());
                white.extra = PieceExtra::Rights(CastlingRights::all());
            }
            board.set(Square::new_unchecked(0, col), Some(black));
            board.set(Square::new_unchecked(7, col), Some(white));
            board.set(
                Square::new_unchecked(1, col),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            board.set(
                Square::new_unchecked(6, col),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Build a board from a 64-character placement string, rank 8 to rank 1,
    /// each rank a-file to h-file, using the alphabet of
    /// [`Piece::from_placement_char`] with `.` for an empty cell.
    pub fn from_placement(placement: &str) -> Result<Self, RulesError> {
        let chars: Vec<char> = placement.chars().collect();
        if chars.len() != 64 {
            return Err(RulesError::BadPlacementLength(chars.len()));
        }
        let mut board = Self::empty();
        for (i, &c) in chars.iter().enumerate() {
            if c == '.' {
                continue;
            }
            let square = Square::new_unchecked((i / 8) as u8, (i % 8) as u8);
            board.set(square, Some(Piece::from_placement_char(c)?));
        }
        Ok(board)
    }

    /// Inverse of [`Board::from_placement`].
    pub fn to_placement(&self) -> String {
        Square::all()
            .map(|square| match self.piece_at(square) {
                Some(piece) => piece.placement_char(),
                None => '.',
            })
            .collect()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Iterate over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Squares holding kings of the given color. The engine never assumes
    /// exactly one; zero and several are both tolerated.
    pub fn king_squares(&self, color: Color) -> Vec<Square> {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
            .collect()
    }

    /// Castling rights for a color, aggregated across its kings.
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for (_, piece) in self
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
        {
            let r = piece.castling_rights();
            rights.kingside |= r.kingside;
            rights.queenside |= r.queenside;
        }
        rights
    }

    /// Apply a move, trusting that it is legal. The only rejected input is an
    /// empty origin square, which leaves the board untouched; anything else
    /// is carried out verbatim, side effects and all. Callers wanting
    /// validation go through `Game::play`.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), RulesError> {
        let piece = self
            .piece_at(mv.from)
            .ok_or(RulesError::EmptyOrigin(mv.from))?;
        self.apply_piece_move(mv, piece);
        Ok(())
    }

    /// The application sequence: en passant flags expire first, then the
    /// moving piece's kind-specific side effects run, then the piece itself
    /// is transferred (promoted if requested), overwriting any captured
    /// occupant.
    pub(crate) fn apply_piece_move(&mut self, mv: Move, piece: Piece) {
        let mut piece = piece;
        self.clear_en_passant_flags();

        match piece.kind {
            PieceKind::Pawn => self.pawn_side_effects(mv, &mut piece),
            PieceKind::Rook => self.revoke_right_for_departed_rook(piece.color, mv.from),
            PieceKind::King => {
                piece.extra = PieceExtra::Rights(CastlingRights::none());
                if mv.from.col.abs_diff(mv.to.col) == 2 {
                    self.relocate_castling_rook(piece.color, mv.to);
                }
            }
            _ => {}
        }

        if let Some(kind) = mv.promotion {
            piece = Piece::new(kind, piece.color);
        }
        self.set(mv.from, None);
        self.set(mv.to, Some(piece));
    }

    /// Eligibility lasts exactly one ply; every application clears all flags
    /// before anything else happens.
    fn clear_en_passant_flags(&mut self) {
        for row in &mut self.squares {
            for cell in row.iter_mut() {
                if let Some(piece) = cell {
                    if piece.extra == PieceExtra::EnPassantEligible {
                        piece.extra = PieceExtra::None;
                    }
                }
            }
        }
    }

    fn pawn_side_effects(&mut self, mv: Move, pawn: &mut Piece) {
        // A two-square advance becomes capturable en passant only when an
        // enemy pawn already sits beside the landing square.
        if mv.from.row.abs_diff(mv.to.row) == 2 && self.enemy_pawn_beside(mv.to, pawn.color) {
            pawn.extra = PieceExtra::EnPassantEligible;
        }

        // A file change onto an empty square is an en passant capture; the
        // captured pawn sits one rank behind the destination.
        if mv.from.col != mv.to.col && self.piece_at(mv.to).is_none() {
            let behind_row = (mv.to.row as i8 - pawn.color.pawn_direction()) as u8;
            self.set(Square::new_unchecked(behind_row, mv.to.col), None);
        }
    }

    fn enemy_pawn_beside(&self, landing: Square, mover: Color) -> bool {
        [-1i8, 1].iter().any(|&dc| {
            landing
                .offset(0, dc)
                .and_then(|square| self.piece_at(square))
                .is_some_and(|piece| {
                    piece.kind == PieceKind::Pawn && piece.color == mover.opposite()
                })
        })
    }

    /// A rook leaving its home square costs its king the matching right,
    /// provided that king still stands on its own home square.
    fn revoke_right_for_departed_rook(&mut self, color: Color, from: Square) {
        let back = color.back_row();
        let kingside = if from == Square::new_unchecked(back, 7) {
            true
        } else if from == Square::new_unchecked(back, 0) {
            false
        } else {
            return;
        };

        let king_home = Square::new_unchecked(back, 4);
        if let Some(mut king) = self.piece_at(king_home) {
            if king.kind == PieceKind::King && king.color == color {
                if let PieceExtra::Rights(mut rights) = king.extra {
                    if kingside {
                        rights.kingside = false;
                    } else {
                        rights.queenside = false;
                    }
                    king.extra = PieceExtra::Rights(rights);
                    self.set(king_home, Some(king));
                }
            }
        }
    }

    /// The rook half of a castling move: a-rook to the d-file when the king
    /// lands on c, h-rook to the f-file when it lands on g.
    fn relocate_castling_rook(&mut self, color: Color, king_to: Square) {
        let back = color.back_row();
        let (rook_from, rook_to) = if king_to.col == 2 {
            (Square::new_unchecked(back, 0), Square::new_unchecked(back, 3))
        } else {
            (Square::new_unchecked(back, 7), Square::new_unchecked(back, 5))
        };
        let rook = self.piece_at(rook_from);
        self.set(rook_from, None);
        self.set(rook_to, rook);
    }

    /// Display the board as ASCII art from White's perspective, rank 8 at
    /// the top, using the placement alphabet so extra state stays visible.
    pub fn to_ascii(&self) -> String {
        let mut result = String::new();
        result.push_str("  a b c d e f g h\n");
        for row in 0..8u8 {
            let rank_number = 8 - row;
            result.push_str(&format!("{rank_number} "));
            for col in 0..8u8 {
                let symbol = match self.piece_at(Square::new_unchecked(row, col)) {
                    Some(piece) => piece.placement_char(),
                    None => '.',
                };
                result.push(symbol);
                if col < 7 {
                    result.push(' ');
                }
            }
            result.push_str(&format!(" {rank_number}\n"));
        }
        result.push_str("  a b c d e f g h");
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
