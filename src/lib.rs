pub mod cli;
pub mod engine;
pub mod rules;

// Re-export key types for easy testing
pub use engine::{Engine, EngineError};
pub use rules::{
    Board, CastlingRights, CheckState, Color, Game, Move, Piece, PieceKind, RulesError, Square,
    Status, Target,
};
