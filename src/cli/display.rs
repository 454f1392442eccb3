use crate::rules::{CheckState, Color, Game, Piece, PieceKind, Square};

/// Render a game for the terminal: the box-drawn board from the given
/// perspective, then a turn/clock status line and, when a side is in
/// check, a check banner.
pub fn display_game(game: &Game, perspective: Color, unicode: bool) {
    println!();
    print!("{}", render_board(game, perspective, unicode));

    println!("To move: {}", game.to_move());
    println!("Move #: {}", game.fullmove_number());

    if game.halfmove_clock() > 0 {
        println!("Halfmove clock: {} (50-move rule)", game.halfmove_clock());
    }
    if game.check_state() != CheckState::None {
        println!("{}", game.check_state());
    }
}

/// The board as a box-drawn grid with file and rank labels. White's
/// perspective puts rank 1 at the bottom; Black's flips both axes.
pub fn render_board(game: &Game, perspective: Color, unicode: bool) -> String {
    match perspective {
        Color::White => render_white_perspective(game, unicode),
        Color::Black => render_black_perspective(game, unicode),
    }
}

/// Display board from White's perspective (rank 1 at bottom)
fn render_white_perspective(game: &Game, unicode: bool) -> String {
    let mut out = String::new();
    out.push_str("  ┌─┬─┬─┬─┬─┬─┬─┬─┐\n");

    for row in 0..8u8 {
        let rank_number = 8 - row;
        out.push_str(&format!("{rank_number} │"));
        for col in 0..8u8 {
            out.push(cell_symbol(game, Square::new_unchecked(row, col), unicode));
            out.push('│');
        }
        out.push_str(&format!(" {rank_number}\n"));

        if row < 7 {
            out.push_str("  ├─┼─┼─┼─┼─┼─┼─┼─┤\n");
        }
    }

    out.push_str("  └─┴─┴─┴─┴─┴─┴─┴─┘\n");
    out.push_str("   a b c d e f g h\n");
    out
}

/// Display board from Black's perspective (rank 8 at bottom, files reversed)
fn render_black_perspective(game: &Game, unicode: bool) -> String {
    let mut out = String::new();
    out.push_str("  ┌─┬─┬─┬─┬─┬─┬─┬─┐\n");

    for row in (0..8u8).rev() {
        let rank_number = 8 - row;
        out.push_str(&format!("{rank_number} │"));
        for col in (0..8u8).rev() {
            out.push(cell_symbol(game, Square::new_unchecked(row, col), unicode));
            out.push('│');
        }
        out.push_str(&format!(" {rank_number}\n"));

        if row > 0 {
            out.push_str("  ├─┼─┼─┼─┼─┼─┼─┼─┤\n");
        }
    }

    out.push_str("  └─┴─┴─┴─┴─┴─┴─┴─┘\n");
    out.push_str("   h g f e d c b a\n");
    out
}

fn cell_symbol(game: &Game, square: Square, unicode: bool) -> char {
    match game.board().piece_at(square) {
        Some(piece) if unicode => piece_glyph(&piece),
        Some(piece) => piece.fen_char(),
        None => ' ',
    }
}

/// Unicode chess glyph for a piece
fn piece_glyph(piece: &Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

/// Check if terminal supports Unicode chess pieces
pub fn supports_unicode() -> bool {
    // Simple heuristic: check if TERM names a modern terminal
    std::env::var("TERM")
        .map(|term| {
            term.contains("xterm")
                || term.contains("screen")
                || term.contains("tmux")
                || term == "alacritty"
                || term == "kitty"
        })
        .unwrap_or(false)
        || std::env::var("TERM_PROGRAM").is_ok() // macOS Terminal, iTerm2, etc.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_perspective_puts_rank_one_last() {
        let rendered = render_board(&Game::new(), Color::White, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].starts_with("8 │r│n│b│q│k│b│n│r│"));
        assert!(lines[15].starts_with("1 │R│N│B│Q│K│B│N│R│"));
        assert_eq!(*lines.last().unwrap(), "   a b c d e f g h");
    }

    #[test]
    fn black_perspective_flips_both_axes() {
        let rendered = render_board(&Game::new(), Color::Black, false);
        let lines: Vec<&str> = rendered.lines().collect();
        // Rank 1 on top, h-file first.
        assert!(lines[1].starts_with("1 │R│N│B│K│Q│B│N│R│"));
        assert_eq!(*lines.last().unwrap(), "   h g f e d c b a");
    }

    #[test]
    fn unicode_rendering_uses_glyphs() {
        let rendered = render_board(&Game::new(), Color::White, true);
        assert!(rendered.contains('♔'));
        assert!(rendered.contains('♟'));
        assert!(!rendered.contains('K'));
    }

    #[test]
    fn glyphs_cover_both_colors() {
        let white = Piece::new(PieceKind::Queen, Color::White);
        let black = Piece::new(PieceKind::Queen, Color::Black);
        assert_eq!(piece_glyph(&white), '♕');
        assert_eq!(piece_glyph(&black), '♛');
    }
}
