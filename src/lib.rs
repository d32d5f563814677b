//! Morabaraba - terminal front end
//!
//! The rules live in [`morabaraba_engine`]; this crate adds the pieces a
//! person at a keyboard needs:
//!
//! - [`config`]: player names and board symbols from `morabaraba.toml`
//! - [`render`]: text rendering of the board, status panel and hints
//! - [`session`]: the line-driven play loop
//! - [`cli`]: command-line arguments

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod render;
pub mod session;

pub use config::{ConfigError, DisplaySettings, PlayerNames, Settings};
pub use morabaraba_engine as engine;
