//! Morabaraba - Unified CLI
//!
//! Local two-player play plus tools for saved games.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use morabaraba::cli::{Cli, Command};
use morabaraba::config::Settings;
use morabaraba::engine::{Action, Game, GameLog, GameState};
use serde::Deserialize;
use morabaraba::render::render;
use morabaraba::session;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    match cli.command_or_default() {
        Command::Play { resume } => run_play(&settings, resume.as_deref()),
        Command::Replay { file, json } => run_replay(&settings, &file, json),
        Command::Show { file } => run_show(&settings, &file),
        Command::Schema => run_schema(),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(settings))]
fn run_play(settings: &Settings, resume: Option<&Path>) -> Result<()> {
    let mut game = match resume {
        Some(path) => Game::resume(load_state(path)?),
        None => Game::new(),
    };

    info!(
        a = settings.players().name(morabaraba::engine::Player::A),
        b = settings.players().name(morabaraba::engine::Player::B),
        "Starting local game"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session::run(&mut game, settings, stdin.lock(), stdout.lock())
}

/// Accepted action log layouts: a saved log, or a bare array of actions
/// played from a fresh game.
#[derive(Deserialize)]
#[serde(untagged)]
enum LogFile {
    Log(GameLog),
    Actions(Vec<Action>),
}

/// Replay an action log and print where it ends
#[instrument(skip(settings))]
fn run_replay(settings: &Settings, file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read action log {}", file.display()))?;
    let log = match serde_json::from_str::<LogFile>(&content)
        .with_context(|| format!("Failed to parse action log {}", file.display()))?
    {
        LogFile::Log(log) => log,
        LogFile::Actions(actions) => GameLog {
            origin: GameState::new(),
            actions,
        },
    };

    let game = log
        .replay()
        .with_context(|| format!("Action log {} is not a legal game", file.display()))?;
    info!(actions = log.actions.len(), "Replay complete");

    if json {
        println!("{}", game.state().to_json()?);
    } else {
        println!("{}", render(game.state(), settings));
    }
    Ok(())
}

/// Validate a snapshot and print its board
#[instrument(skip(settings))]
fn run_show(settings: &Settings, file: &Path) -> Result<()> {
    let state = load_state(file)?;
    println!("{}", render(&state, settings));
    Ok(())
}

/// Print the snapshot JSON schema
fn run_schema() -> Result<()> {
    let schema = schemars::schema_for!(GameState);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn load_state(path: &Path) -> Result<GameState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    GameState::from_json(&content)
        .with_context(|| format!("Snapshot {} is invalid", path.display()))
}
