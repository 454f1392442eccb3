pub mod commands;
pub mod config;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, PositionArgs};
pub use config::Config;
pub use display::{display_game, render_board, supports_unicode};
