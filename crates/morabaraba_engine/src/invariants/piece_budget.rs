//! Piece budget invariant: no player ever has more than 12 pieces in play.

use super::Invariant;
use crate::{GameState, PIECES_PER_PLAYER, Player};
use strum::IntoEnumIterator;

/// Invariant: pieces on the board plus pieces still to place never exceed
/// the per-player allowance.
///
/// During placing the sum only drops when a piece is captured; after
/// placing it equals 12 minus the pieces lost.
pub struct PieceBudgetInvariant;

impl Invariant<GameState> for PieceBudgetInvariant {
    fn holds(state: &GameState) -> bool {
        Player::iter().all(|player| {
            state.cells.count(player) + state.to_place.get(player) as usize
                <= PIECES_PER_PLAYER as usize
        })
    }

    fn description() -> &'static str {
        "Pieces on board plus pieces to place never exceed 12 per player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Point};

    #[test]
    fn test_new_game_holds() {
        assert!(PieceBudgetInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_extra_piece_violates() {
        let mut state = GameState::new();
        state.cells.set(Point::at(0), Cell::Occupied(Player::B));
        assert!(!PieceBudgetInvariant::holds(&state));
    }
}
