//! The chess rules core: board representation, per-piece vision, legal move
//! generation with the self-check filter, move application with all of its
//! side effects, and check/mate/stalemate classification.
//!
//! Everything here is synchronous and allocation-light; the only transient
//! state is the scratch board the legality filter clones per candidate.

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod square;
pub mod state;
pub mod vision;

// Re-export key types for easy testing
pub use board::Board;
pub use error::RulesError;
pub use game::{Game, Status};
pub use moves::Move;
pub use piece::{CastlingRights, Color, Piece, PieceExtra, PieceKind};
pub use square::{Square, Target};
pub use state::CheckState;
