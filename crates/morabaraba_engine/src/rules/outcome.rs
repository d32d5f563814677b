//! Terminal condition detection.

use super::mobility::has_any_move;
use crate::{GameState, Phase, Player};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Minimum pieces a player needs on the board to stay in the game.
pub const MIN_PIECES: usize = 3;

/// Determines whether the position is decided.
///
/// Only applies in the moving phase:
/// - a player with fewer than three pieces loses;
/// - the player to move loses if no legal move is available. This is not
///   evaluated while a removal is pending, since the capture changes the
///   board before anyone moves.
#[instrument(skip(state))]
pub fn check_winner(state: &GameState) -> Option<Player> {
    if let Some(winner) = state.winner() {
        return Some(winner);
    }
    if state.phase() != Phase::Moving {
        return None;
    }

    let cells = state.cells();
    if let Some(loser) = Player::iter().find(|&player| cells.count(player) < MIN_PIECES) {
        return Some(loser.opponent());
    }

    if state.pending_removal().is_none() && !has_any_move(cells, state.turn()) {
        return Some(state.turn().opponent());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Point, ToPlace};

    fn moving_state(a: &[usize], b: &[usize], turn: Player) -> GameState {
        let mut state = GameState::new();
        state.phase = Phase::Moving;
        state.to_place = ToPlace::with(0, 0);
        state.turn = turn;
        for &i in a {
            state.cells.set(Point::at(i), Cell::Occupied(Player::A));
        }
        for &i in b {
            state.cells.set(Point::at(i), Cell::Occupied(Player::B));
        }
        state
    }

    #[test]
    fn test_no_winner_while_placing() {
        assert_eq!(check_winner(&GameState::new()), None);
    }

    #[test]
    fn test_two_pieces_lose() {
        let state = moving_state(&[0, 1, 2, 3], &[9, 10], Player::B);
        assert_eq!(check_winner(&state), Some(Player::A));
    }

    #[test]
    fn test_blocked_side_to_move_loses() {
        let state = moving_state(&[3, 5, 18, 20], &[4, 10, 13, 19], Player::A);
        assert_eq!(check_winner(&state), Some(Player::B));
    }

    #[test]
    fn test_blocked_side_not_to_move_plays_on() {
        let state = moving_state(&[3, 5, 18, 20], &[4, 10, 13, 19], Player::B);
        assert_eq!(check_winner(&state), None);
    }

    #[test]
    fn test_blocked_side_waits_for_pending_removal() {
        let mut state = moving_state(&[3, 5, 18, 20], &[4, 10, 13, 19], Player::A);
        state.pending_removal = Some(Player::A);
        assert_eq!(check_winner(&state), None);
    }
}
