//! Phase consistency invariant: placing lasts exactly as long as the allowance.

use super::Invariant;
use crate::{GameState, Phase};

/// Invariant: the game is in the placing phase if and only if some player
/// still has pieces to place.
pub struct PhaseConsistentInvariant;

impl Invariant<GameState> for PhaseConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        (state.phase == Phase::Placing) != state.to_place.is_exhausted()
    }

    fn description() -> &'static str {
        "Phase is Placing exactly while pieces remain to be placed"
    }
}
