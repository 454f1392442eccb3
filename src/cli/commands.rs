use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "A chess legality arbiter: it rules on moves, it does not choose them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where a command gets its position from. FEN wins when both are given;
/// with neither, commands start from the standard initial position.
#[derive(Args, Debug, Clone)]
pub struct PositionArgs {
    /// Six-field FEN string describing the position
    #[arg(long)]
    pub fen: Option<String>,

    /// 64-character placement string, rank 8 to rank 1, '.' for empty
    #[arg(long, conflicts_with = "fen")]
    pub placement: Option<String>,

    /// Side to move when loading from --placement ('white' or 'black');
    /// FEN positions carry their own
    #[arg(long)]
    pub turn: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the board for a position
    ///
    /// Draws the position with file and rank labels, followed by a
    /// turn/clock status line. Unicode piece glyphs are used when the
    /// terminal supports them; pass --ascii to force letters.
    ///
    /// Examples:
    ///   arbiter show
    ///   arbiter show --fen "8/8/8/8/8/8/8/K6k w - - 0 1"
    ///   arbiter show --flip --ascii
    Show {
        #[command(flatten)]
        position: PositionArgs,

        /// Render from Black's perspective
        #[arg(long)]
        flip: bool,

        /// Use ASCII piece letters instead of Unicode glyphs
        #[arg(long)]
        ascii: bool,
    },

    /// List legal destinations for the piece on a square
    ///
    /// Prints every square the piece may legally move to, accounting for
    /// blockers, castling, en passant, and self-check. An empty square or
    /// a piece with no moves prints nothing.
    ///
    /// Examples:
    ///   arbiter legal e2
    ///   arbiter legal g1 --json
    ///   arbiter legal d8 --fen "..."
    Legal {
        /// The square to list moves for, in algebraic notation (e.g. e2)
        square: String,

        #[command(flatten)]
        position: PositionArgs,

        /// Emit the destinations as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Apply one or more moves through the validated path
    ///
    /// Moves use coordinate notation (e2e4), with a promotion letter
    /// appended for pawn moves reaching the back rank (e7e8q). Each move
    /// is checked for turn order and legality before it is applied; the
    /// resulting board, FEN, and status are printed afterwards.
    ///
    /// Examples:
    ///   arbiter apply e2e4
    ///   arbiter apply e2e4 e7e5 g1f3
    ///   arbiter apply e7e8q --fen "..."
    Apply {
        /// Moves in coordinate notation, applied in order
        #[arg(required = true)]
        moves: Vec<String>,

        #[command(flatten)]
        position: PositionArgs,

        /// Use ASCII piece letters instead of Unicode glyphs
        #[arg(long)]
        ascii: bool,
    },

    /// Report check state and terminal classification
    ///
    /// Prints which side (if either) stands in check, and whether the
    /// position is checkmate, stalemate, a draw, or still ongoing for the
    /// side to move.
    ///
    /// Examples:
    ///   arbiter status
    ///   arbiter status --fen "..." --json
    Status {
        #[command(flatten)]
        position: PositionArgs,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the configured external engine for its move
    ///
    /// Invokes the engine program with the position's FEN fields as
    /// arguments and prints the move it answers with. The engine path and
    /// timeout come from the config file unless overridden here.
    ///
    /// Examples:
    ///   arbiter best-move
    ///   arbiter best-move --fen "..." --engine ./engine --timeout-ms 2000
    BestMove {
        #[command(flatten)]
        position: PositionArgs,

        /// Engine program to consult, overriding the configured path
        #[arg(long)]
        engine: Option<PathBuf>,

        /// Engine timeout in milliseconds, overriding the configured value
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Play an interactive game against the external engine
    ///
    /// You enter coordinate moves on stdin; the engine answers for the
    /// other side. The board is re-rendered after every ply and the game
    /// ends on checkmate, stalemate, or a draw. Type 'quit' to stop early.
    ///
    /// Examples:
    ///   arbiter play
    ///   arbiter play --color black
    ///   arbiter play --fen "..." --engine ./engine
    Play {
        #[command(flatten)]
        position: PositionArgs,

        /// Side you play: 'white' or 'black' (default: white)
        #[arg(long)]
        color: Option<String>,

        /// Engine program to play against, overriding the configured path
        #[arg(long)]
        engine: Option<PathBuf>,

        /// Use ASCII piece letters instead of Unicode glyphs
        #[arg(long)]
        ascii: bool,
    },

    /// Show or initialize the configuration file
    ///
    /// Without flags, prints the config path and current contents.
    /// With --init, writes the default configuration to disk.
    ///
    /// Examples:
    ///   arbiter config
    ///   arbiter config --init
    Config {
        /// Write a default config file, overwriting any existing one
        #[arg(long)]
        init: bool,
    },
}
