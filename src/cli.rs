//! Command-line interface for morabaraba.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Morabaraba - two-player board game in the terminal
#[derive(Parser, Debug)]
#[command(name = "morabaraba")]
#[command(about = "Play Morabaraba on a shared terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (missing file means defaults)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a local two-player game
    Play {
        /// Resume from a saved state snapshot
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Replay a JSON action log and print the final position
    Replay {
        /// Path to the action log
        file: PathBuf,

        /// Print the final state as JSON instead of the board
        #[arg(long)]
        json: bool,
    },

    /// Validate and display a saved state snapshot
    Show {
        /// Path to the state snapshot
        file: PathBuf,
    },

    /// Print the JSON schema of the state snapshot
    Schema,
}

impl Cli {
    /// The selected command, defaulting to a fresh game.
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Play { resume: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_play() {
        let cli = Cli::parse_from(["morabaraba"]);
        assert_eq!(cli.command_or_default(), Command::Play { resume: None });
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_replay_flags() {
        let cli = Cli::parse_from(["morabaraba", "replay", "moves.json", "--json", "-c", "x.toml"]);
        assert_eq!(
            cli.command_or_default(),
            Command::Replay {
                file: PathBuf::from("moves.json"),
                json: true
            }
        );
        assert_eq!(cli.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        <Cli as CommandFactory>::command().debug_assert();
    }
}
