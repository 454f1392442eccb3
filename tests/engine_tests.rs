//! External engine client tests
//!
//! Each test scripts a throwaway stub engine and exercises one leg of the
//! contract: the argv handshake, move extraction, and the typed failures.

#![cfg(unix)]

use arbiter::engine::{Engine, EngineError};
use arbiter::rules::{Game, PieceKind};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn stub_engine(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("engine");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub engine");
    let mut perms = fs::metadata(&path).expect("stat stub engine").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("mark stub engine executable");
    path
}

#[tokio::test]
async fn best_move_parses_the_engine_answer() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(stub_engine(&dir, "echo e2e4"));
    let mv = engine.best_move(&Game::new()).await.unwrap();
    assert_eq!(mv.to_string(), "e2e4");
}

#[tokio::test]
async fn engine_receives_the_six_fen_fields_as_argv() {
    let dir = TempDir::new().unwrap();
    // The stub verifies the handshake before answering: six arguments, a
    // slash-separated placement first, then the active color.
    let body = r#"[ "$#" -eq 6 ] || exit 7
case "$1" in */*/*/*/*/*/*/*) ;; *) exit 8 ;; esac
[ "$2" = "w" ] || exit 9
echo g1f3"#;
    let engine = Engine::new(stub_engine(&dir, body));
    let mv = engine.best_move(&Game::new()).await.unwrap();
    assert_eq!(mv.to_string(), "g1f3");
}

#[tokio::test]
async fn noisy_output_still_yields_the_first_move_token() {
    let dir = TempDir::new().unwrap();
    let body = "echo 'info depth 9 score cp 31'\necho 'bestmove d2d4 ponder g8f6'";
    let engine = Engine::new(stub_engine(&dir, body));
    let mv = engine.best_move(&Game::new()).await.unwrap();
    assert_eq!(mv.to_string(), "d2d4");
}

#[tokio::test]
async fn promotion_tokens_cross_the_boundary() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(stub_engine(&dir, "echo e7e8q"));
    let mv = engine.best_move(&Game::new()).await.unwrap();
    assert_eq!(mv.promotion, Some(PieceKind::Queen));
}

#[tokio::test]
async fn moveless_output_is_a_typed_failure() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(stub_engine(&dir, "echo resign"));
    let err = engine.best_move(&Game::new()).await.unwrap_err();
    assert!(matches!(err, EngineError::NoMove { .. }), "got {err:?}");

    let engine = Engine::new(stub_engine(&dir, "true"));
    let err = engine.best_move(&Game::new()).await.unwrap_err();
    assert!(matches!(err, EngineError::NoMove { .. }), "got {err:?}");
}

#[tokio::test]
async fn nonzero_exit_reports_status_and_stderr() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(stub_engine(&dir, "echo 'illegal position' >&2\nexit 3"));
    match engine.best_move(&Game::new()).await.unwrap_err() {
        EngineError::Failed { status, stderr } => {
            assert_eq!(status.code(), Some(3));
            assert!(stderr.contains("illegal position"), "stderr: {stderr}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let engine = Engine::new("/no/such/engine/binary");
    let err = engine.best_move(&Game::new()).await.unwrap_err();
    assert!(matches!(err, EngineError::Spawn { .. }), "got {err:?}");
}

#[tokio::test]
async fn slow_engine_times_out() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::with_timeout(
        stub_engine(&dir, "sleep 5\necho e2e4"),
        Duration::from_millis(100),
    );
    let err = engine.best_move(&Game::new()).await.unwrap_err();
    assert!(matches!(err, EngineError::Timeout { .. }), "got {err:?}");
}
