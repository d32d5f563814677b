//! Game rules for Morabaraba.
//!
//! Pure functions evaluating board positions. Rules are kept apart from
//! state transitions so contracts and front ends can reuse them.

pub mod mills;
pub mod mobility;
pub mod outcome;

pub use mills::{is_protected, removable_pieces};
pub use mobility::{can_fly, has_any_move, legal_destinations};
pub use outcome::check_winner;
