//! Selection invariant: only the side to move selects, and only its own piece.

use super::Invariant;
use crate::{GameState, Phase};

/// Invariant: a selected point exists only during the moving phase, with no
/// removal pending, and holds a piece of the player to act.
pub struct SelectionInvariant;

impl Invariant<GameState> for SelectionInvariant {
    fn holds(state: &GameState) -> bool {
        match state.selected {
            Some(point) => {
                state.phase == Phase::Moving
                    && state.pending_removal.is_none()
                    && state.cells.is_owned_by(point, state.turn)
            }
            None => true,
        }
    }

    fn description() -> &'static str {
        "Selection is an own piece of the player to move, in the moving phase"
    }
}
