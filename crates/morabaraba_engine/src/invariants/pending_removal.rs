//! Pending removal invariant: the mill maker keeps the turn until they capture.

use super::Invariant;
use crate::GameState;

/// Invariant: while a removal is pending, the turn belongs to the player who
/// formed the mill and the game is not over.
pub struct PendingRemovalInvariant;

impl Invariant<GameState> for PendingRemovalInvariant {
    fn holds(state: &GameState) -> bool {
        match state.pending_removal {
            Some(player) => state.turn == player && state.winner.is_none(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "A pending removal belongs to the player to act in an unfinished game"
    }
}
