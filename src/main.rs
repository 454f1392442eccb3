use anyhow::Result;
use arbiter::cli::{session, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            position,
            flip,
            ascii,
        } => session::handle_show(&position, flip, ascii),
        Commands::Legal {
            square,
            position,
            json,
        } => session::handle_legal(&square, &position, json),
        Commands::Apply {
            moves,
            position,
            ascii,
        } => session::handle_apply(&moves, &position, ascii),
        Commands::Status { position, json } => session::handle_status(&position, json),
        Commands::BestMove {
            position,
            engine,
            timeout_ms,
        } => session::handle_best_move(&position, engine, timeout_ms).await,
        Commands::Play {
            position,
            color,
            engine,
            ascii,
        } => session::handle_play(&position, color, engine, ascii).await,
        Commands::Config { init } => session::handle_config(init),
    }
}
