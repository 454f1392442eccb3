use crate::cli::commands::PositionArgs;
use crate::cli::config::Config;
use crate::cli::display;
use crate::engine::Engine;
use crate::rules::{Board, Color, Game, Move, Square};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Build the game a command operates on: FEN if given, else a placement
/// string (with an optional side to move), else the standard start.
pub fn load_position(args: &PositionArgs) -> Result<Game> {
    if let Some(fen) = &args.fen {
        return Game::from_fen(fen).context("Failed to parse FEN position");
    }
    if let Some(placement) = &args.placement {
        let board =
            Board::from_placement(placement).context("Failed to parse placement string")?;
        let to_move = match &args.turn {
            Some(text) => Color::from_str(text).context("Failed to parse --turn")?,
            None => Color::White,
        };
        return Ok(Game::from_board(board, to_move));
    }
    Ok(Game::new())
}

fn unicode_preference(config: &Config, ascii: bool) -> bool {
    !ascii && config.unicode_pieces && display::supports_unicode()
}

/// Resolve the engine to consult: explicit overrides first, then the
/// config file's values.
fn resolve_engine(
    config: &Config,
    path_override: Option<PathBuf>,
    timeout_override: Option<u64>,
) -> Engine {
    let path = path_override.unwrap_or_else(|| config.engine_path.clone());
    let timeout = timeout_override
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.engine_timeout());
    Engine::with_timeout(path, timeout)
}

pub fn handle_show(position: &PositionArgs, flip: bool, ascii: bool) -> Result<()> {
    let config = Config::load_or_create_default().context("Failed to initialize configuration")?;
    let game = load_position(position)?;

    let perspective = if flip { Color::Black } else { Color::White };
    display::display_game(&game, perspective, unicode_preference(&config, ascii));
    println!("Status: {}", game.status());

    Ok(())
}

pub fn handle_legal(square: &str, position: &PositionArgs, json: bool) -> Result<()> {
    let game = load_position(position)?;
    let from: Square = square
        .parse()
        .with_context(|| format!("'{square}' is not a square"))?;

    let destinations: Vec<String> = game
        .legal_moves(from)
        .iter()
        .map(Square::to_string)
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string(&destinations).context("Failed to serialize move list")?
        );
    } else if destinations.is_empty() {
        println!("No legal moves for {from}");
    } else {
        println!("{}", destinations.join(" "));
    }

    Ok(())
}

pub fn handle_apply(moves: &[String], position: &PositionArgs, ascii: bool) -> Result<()> {
    let config = Config::load_or_create_default().context("Failed to initialize configuration")?;
    let mut game = load_position(position)?;

    for text in moves {
        let mv: Move = text
            .parse()
            .with_context(|| format!("'{text}' is not a move"))?;
        let status = game
            .play(mv)
            .with_context(|| format!("Cannot apply '{text}'"))?;
        info!("Applied {} ({})", mv, status);
    }

    display::display_game(&game, Color::White, unicode_preference(&config, ascii));
    println!("FEN: {}", game.to_fen());
    println!("Status: {}", game.status());

    Ok(())
}

pub fn handle_status(position: &PositionArgs, json: bool) -> Result<()> {
    let game = load_position(position)?;
    let check = game.check_state();
    let status = game.status();

    if json {
        let report = serde_json::json!({
            "to_move": game.to_move(),
            "check": check,
            "status": status,
        });
        println!(
            "{}",
            serde_json::to_string(&report).context("Failed to serialize status report")?
        );
    } else {
        println!("To move: {}", game.to_move());
        println!("Check: {check}");
        println!("Status: {status}");
    }

    Ok(())
}

pub async fn handle_best_move(
    position: &PositionArgs,
    engine_path: Option<PathBuf>,
    timeout_ms: Option<u64>,
) -> Result<()> {
    let config = Config::load_or_create_default().context("Failed to initialize configuration")?;
    let game = load_position(position)?;
    let engine = resolve_engine(&config, engine_path, timeout_ms);

    let status = game.status();
    if status.is_over() {
        println!("Game is already over: {status}");
        return Ok(());
    }

    let mv = engine
        .best_move(&game)
        .await
        .with_context(|| format!("Engine '{}' produced no move", engine.path().display()))?;
    println!("{mv}");

    Ok(())
}

pub async fn handle_play(
    position: &PositionArgs,
    color: Option<String>,
    engine_path: Option<PathBuf>,
    ascii: bool,
) -> Result<()> {
    let config = Config::load_or_create_default().context("Failed to initialize configuration")?;
    let mut game = load_position(position)?;
    let engine = resolve_engine(&config, engine_path, None);
    let unicode = unicode_preference(&config, ascii);

    let human = match &color {
        Some(text) => Color::from_str(text).context("Failed to parse --color")?,
        None => Color::White,
    };
    println!("You play {human}; the engine plays {}.", human.opposite());
    println!("Enter moves in coordinate notation (e2e4, e7e8q). Type 'quit' to stop.");

    let mut status = game.status();
    while !status.is_over() {
        display::display_game(&game, human, unicode);

        if game.to_move() == human {
            let Some(line) = prompt_move(game.to_move())? else {
                println!("Game abandoned.");
                return Ok(());
            };
            let mv: Move = match line.parse() {
                Ok(mv) => mv,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            status = match game.play(mv) {
                Ok(status) => status,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
        } else {
            println!("Engine is thinking...");
            let mv = engine
                .best_move(&game)
                .await
                .with_context(|| format!("Engine '{}' produced no move", engine.path().display()))?;
            status = game
                .play(mv)
                .with_context(|| format!("Engine move '{mv}' was rejected"))?;
            println!("Engine plays {mv}");
        }
    }

    display::display_game(&game, human, unicode);
    println!("Game over: {status}");
    Ok(())
}

/// Read one move from stdin. `None` means the player quit.
fn prompt_move(to_move: Color) -> Result<Option<String>> {
    print!("{to_move} to move> ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    if bytes == 0 {
        // EOF: treat like quitting.
        return Ok(None);
    }

    let line = input.trim().to_string();
    match line.as_str() {
        "quit" | "exit" | "resign" => Ok(None),
        _ => Ok(Some(line)),
    }
}

pub fn handle_config(init: bool) -> Result<()> {
    let config_file = Config::default_config_file()?;

    if init {
        let config = Config::default();
        config.save().context("Failed to write config file")?;
        println!("Wrote default configuration to {}", config_file.display());
        return Ok(());
    }

    if !config_file.exists() {
        warn!("No config file at {}", config_file.display());
        println!("Run 'arbiter config --init' to create one. Defaults in effect:");
    } else {
        println!("Configuration at {}:", config_file.display());
    }
    let config = Config::load_or_create_default().context("Failed to load configuration")?;
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to render configuration")?
    );

    Ok(())
}
