//! Line-driven local two-player session.
//!
//! Reads one command per line from any [`BufRead`] and writes the board
//! after each to any [`Write`], so the same loop serves a terminal and
//! scripted tests.

use crate::config::Settings;
use crate::render::render;
use anyhow::{Context, Result};
use morabaraba_engine::{Game, Point};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  <0-23>       click a point (place, select, move or remove)
  r, reset     start a new game
  u, undo      take back the last action
  s <path>     save the game state as JSON
  l <path>     save the action log, with its starting state, as JSON
  h, help      show this help
  q, quit      leave";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Click on a board point.
    Click(Point),
    /// Start over.
    Reset,
    /// Take back the last action.
    Undo,
    /// Save the state to a file.
    SaveState(PathBuf),
    /// Save the action log to a file.
    SaveLog(PathBuf),
    /// Show the command list.
    Help,
    /// Leave the session.
    Quit,
}

impl Input {
    /// Parses a line of input. Returns `None` for anything unrecognized.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(point) = Point::parse(line) {
            return Some(Input::Click(point));
        }
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };
        match (command, argument) {
            ("r" | "reset", "") => Some(Input::Reset),
            ("u" | "undo", "") => Some(Input::Undo),
            ("h" | "help" | "?", "") => Some(Input::Help),
            ("q" | "quit" | "exit", "") => Some(Input::Quit),
            ("s" | "save", path) if !path.is_empty() => Some(Input::SaveState(path.into())),
            ("l" | "log", path) if !path.is_empty() => Some(Input::SaveLog(path.into())),
            _ => None,
        }
    }
}

/// Runs a session until `quit` or end of input.
///
/// Rejected moves and unknown commands are reported and play continues;
/// only I/O failures end the session with an error.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    settings: &Settings,
    input: R,
    mut output: W,
) -> Result<()> {
    info!("Session started");
    writeln!(output, "{}\n", render(game.state(), settings))?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(%line, "Input received");

        match Input::parse(&line) {
            Some(Input::Click(point)) => {
                if let Err(err) = game.click(point) {
                    writeln!(output, "✗ {}", err)?;
                }
            }
            Some(Input::Reset) => {
                game.reset();
            }
            Some(Input::Undo) => match game.undo() {
                Ok(true) => {}
                Ok(false) => writeln!(output, "✗ Nothing to undo")?,
                Err(err) => writeln!(output, "✗ {}", err)?,
            },
            Some(Input::SaveState(path)) => {
                save(&path, &game.state().to_json()?, &mut output)?;
                continue;
            }
            Some(Input::SaveLog(path)) => {
                save(&path, &serde_json::to_string_pretty(&game.log())?, &mut output)?;
                continue;
            }
            Some(Input::Help) => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Some(Input::Quit) => break,
            None => {
                writeln!(output, "✗ Unknown command '{}' (h for help)", line.trim())?;
                continue;
            }
        }

        writeln!(output, "{}\n", render(game.state(), settings))?;
    }

    info!(actions = game.history().len(), "Session ended");
    Ok(())
}

/// Writes `content` to `path`, reporting the outcome to the player.
fn save<W: Write>(path: &Path, content: &str, output: &mut W) -> Result<()> {
    match std::fs::write(path, content) {
        Ok(()) => {
            info!(path = %path.display(), "Saved");
            writeln!(output, "Saved to {}", path.display())?;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Save failed");
            writeln!(output, "✗ Could not save to {}: {}", path.display(), err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse(" 7 "), Some(Input::Click(Point::at(7))));
        assert_eq!(Input::parse("r"), Some(Input::Reset));
        assert_eq!(Input::parse("undo"), Some(Input::Undo));
        assert_eq!(
            Input::parse("s game.json"),
            Some(Input::SaveState(PathBuf::from("game.json")))
        );
        assert_eq!(
            Input::parse("log  moves.json"),
            Some(Input::SaveLog(PathBuf::from("moves.json")))
        );
        assert_eq!(Input::parse("q"), Some(Input::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Input::parse("24"), None);
        assert_eq!(Input::parse("save"), None);
        assert_eq!(Input::parse("r now"), None);
        assert_eq!(Input::parse("jump"), None);
    }
}
