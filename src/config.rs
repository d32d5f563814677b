//! Front-end settings loaded from `morabaraba.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use morabaraba_engine::Player;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "morabaraba.toml";

/// Display names of the two players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerNames {
    /// Name shown for player A.
    a: String,
    /// Name shown for player B.
    b: String,
}

impl PlayerNames {
    /// Returns the display name of `player`.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::A => &self.a,
            Player::B => &self.b,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            a: "Black".to_string(),
            b: "White".to_string(),
        }
    }
}

/// How the board is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Symbol for player A's pieces.
    symbol_a: char,
    /// Symbol for player B's pieces.
    symbol_b: char,
    /// List the legal targets under the board.
    show_hints: bool,
}

impl DisplaySettings {
    /// Returns the piece symbol of `player`.
    pub fn symbol(&self, player: Player) -> char {
        match player {
            Player::A => self.symbol_a,
            Player::B => self.symbol_b,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            symbol_a: '●',
            symbol_b: '○',
            show_hints: true,
        }
    }
}

/// All front-end settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Player names.
    players: PlayerNames,
    /// Board display.
    display: DisplaySettings,
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        settings.validate()?;
        info!(a = %settings.players.a, b = %settings.players.b, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No settings file, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.symbol_a == self.display.symbol_b {
            return Err(ConfigError::new(format!(
                "Both players use the symbol '{}'",
                self.display.symbol_a
            )));
        }
        if self.display.symbol_a.is_ascii_digit() || self.display.symbol_b.is_ascii_digit() {
            return Err(ConfigError::new(
                "Piece symbols cannot be digits".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
