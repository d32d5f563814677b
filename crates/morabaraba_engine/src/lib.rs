//! Pure Morabaraba game logic.
//!
//! The South African mill game on a 24-point board: three concentric
//! squares, cross connectors and diagonals. Twelve pieces each are placed,
//! then moved along board lines; three in a line (a mill) captures an
//! opponent piece, and a player reduced to three pieces may fly.
//!
//! The crate is UI-agnostic and performs no I/O. Front ends feed
//! [`Action`]s (or raw clicks) into a [`Game`] and render its
//! [`GameState`].
//!
//! # Example
//!
//! ```
//! use morabaraba_engine::{Game, Phase, Player, Point};
//!
//! let mut game = Game::new();
//! game.click(Point::at(0))?;
//! game.click(Point::at(1))?;
//!
//! let state = game.state();
//! assert_eq!(state.turn(), Player::A);
//! assert_eq!(state.phase(), Phase::Placing);
//! # Ok::<(), morabaraba_engine::ActionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod board;
pub mod contracts;
mod game;
pub mod invariants;
mod point;
pub mod rules;
mod state;
mod transitions;
mod types;

pub use action::{Action, ActionError, Placement, Relocation, Removal, Selection};
pub use board::{Mill, adjacent, is_mill_formed, mills_containing};
pub use game::{Game, GameLog};
pub use point::{POINT_COUNT, Point, PointOutOfRange};
pub use state::{GameState, SnapshotError};
pub use types::{Cell, Cells, PIECES_PER_PLAYER, Phase, Player, ToPlace};
