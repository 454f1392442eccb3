//! Client for the external search engine. The engine is an opaque program:
//! it receives the six FEN fields of the current position as its arguments,
//! prints a coordinate move on stdout, and exits zero. Everything else —
//! a nonzero exit, a timeout, output with no move in it — is a typed,
//! recoverable failure for the caller to handle.

use crate::rules::{Game, Move};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

lazy_static! {
    // First coordinate-move token in the engine's output, with an optional
    // promotion code. Tolerates banner text around the move.
    static ref MOVE_TOKEN: Regex =
        Regex::new(r"\b[a-h][1-8][a-h][1-8][qnrb]?\b").expect("move token pattern is valid");
}

// Keep error excerpts readable when an engine dumps pages of output.
const EXCERPT_LEN: usize = 120;

/// Custom error types for external engine invocations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to launch engine '{path}': {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine produced no move within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Engine exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("No move found in engine output: '{output}'")]
    NoMove { output: String },
}

/// Handle on the external engine program.
pub struct Engine {
    path: PathBuf,
    timeout: Duration,
}

impl Engine {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_timeout(path, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Ask the engine for its move in the given position. The child process
    /// is killed if the timeout elapses or the returned future is dropped;
    /// an abandoned consultation never leaks a search process.
    pub async fn best_move(&self, game: &Game) -> Result<Move, EngineError> {
        let fen = game.to_fen();
        debug!("Consulting engine {} with position {}", self.path.display(), fen);

        let child = Command::new(&self.path)
            .args(fen.split_whitespace())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                warn!(
                    "Engine {} timed out after {:?}",
                    self.path.display(),
                    self.timeout
                );
                EngineError::Timeout {
                    timeout: self.timeout,
                }
            })?
            .map_err(|source| EngineError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!(
                "Engine {} exited with {}",
                self.path.display(),
                output.status
            );
            return Err(EngineError::Failed {
                status: output.status,
                stderr: excerpt(&String::from_utf8_lossy(&output.stderr)),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mv = parse_move_token(&stdout)?;
        debug!("Engine {} answered {}", self.path.display(), mv);
        Ok(mv)
    }
}

/// Extract the first coordinate-move token from engine output and parse it.
/// A token that fails move validation (a null move, a bad promotion rank)
/// counts as no move at all.
fn parse_move_token(output: &str) -> Result<Move, EngineError> {
    let no_move = || EngineError::NoMove {
        output: excerpt(output),
    };
    let token = MOVE_TOKEN.find(output).ok_or_else(no_move)?;
    token.as_str().parse().map_err(|_| no_move())
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(EXCERPT_LEN).collect();
        format!("{cut}...")
    }
}
