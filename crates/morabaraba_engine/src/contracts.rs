//! Contract-based validation for Morabaraba.
//!
//! Each action kind has a contract: preconditions that must hold before it
//! is applied, and postconditions relating the state before and after.
//! Preconditions are always checked; postconditions in debug builds.

use super::action::{ActionError, Placement, Relocation, Removal, Selection};
use super::invariants::{InvariantSet, MorabarabaInvariants};
use super::rules::{is_protected, legal_destinations, removable_pieces};
use super::{Cell, GameState, Phase, Player, Point};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for a transition.
pub trait Contract<A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &GameState, action: &A) -> Result<(), ActionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &GameState, after: &GameState) -> Result<(), ActionError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: No winner has been declared.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects every action once the game is decided.
    pub fn check(state: &GameState) -> Result<(), ActionError> {
        match state.winner() {
            Some(winner) => Err(ActionError::GameOver(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: The game is in the given phase.
pub struct InPhase;

impl InPhase {
    /// Rejects actions belonging to another phase.
    pub fn check(state: &GameState, phase: Phase) -> Result<(), ActionError> {
        if state.phase() != phase {
            Err(ActionError::WrongPhase(state.phase()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: No capture is owed.
pub struct NoRemovalPending;

impl NoRemovalPending {
    /// Rejects ordinary play while a mill capture is outstanding.
    pub fn check(state: &GameState) -> Result<(), ActionError> {
        match state.pending_removal() {
            Some(player) => Err(ActionError::RemovalPending(player)),
            None => Ok(()),
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects actions by the player not on turn.
    pub fn check(state: &GameState, player: Player) -> Result<(), ActionError> {
        if state.turn() != player {
            Err(ActionError::WrongPlayer(player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The point must be empty.
pub struct PointIsEmpty;

impl PointIsEmpty {
    /// Rejects targets that already hold a piece.
    pub fn check(state: &GameState, point: Point) -> Result<(), ActionError> {
        if !state.cells().is_empty(point) {
            Err(ActionError::PointOccupied(point))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The player has pieces left to place.
pub struct HasPiecesToPlace;

impl HasPiecesToPlace {
    /// Rejects placements beyond the allowance.
    pub fn check(state: &GameState, player: Player) -> Result<(), ActionError> {
        if state.to_place().get(player) == 0 {
            Err(ActionError::NoPiecesLeft(player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The point holds a piece of the player.
pub struct OwnsPiece;

impl OwnsPiece {
    /// Rejects selections of empty or opponent points.
    pub fn check(state: &GameState, point: Point, player: Player) -> Result<(), ActionError> {
        if !state.cells().is_owned_by(point, player) {
            Err(ActionError::NotOwnPiece(point, player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The source of a move is the selected piece.
pub struct IsSelected;

impl IsSelected {
    /// Rejects moves from anywhere but the current selection.
    pub fn check(state: &GameState, from: Point) -> Result<(), ActionError> {
        if state.selected() != Some(from) {
            Err(ActionError::NotSelected(from))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The destination is adjacent, or the player is flying.
pub struct ReachableDestination;

impl ReachableDestination {
    /// Rejects destinations outside the legal set.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, mov: &Relocation) -> Result<(), ActionError> {
        if legal_destinations(state.cells(), mov.from, mov.player).contains(&mov.to) {
            Ok(())
        } else {
            Err(ActionError::IllegalDestination {
                from: mov.from,
                to: mov.to,
            })
        }
    }
}

/// Precondition: The player owes a capture.
pub struct RemovalPendingFor;

impl RemovalPendingFor {
    /// Rejects removals by anyone but the mill maker.
    pub fn check(state: &GameState, player: Player) -> Result<(), ActionError> {
        match state.pending_removal() {
            Some(pending) if pending == player => Ok(()),
            Some(_) => Err(ActionError::WrongPlayer(player)),
            None => Err(ActionError::NoRemovalPending(player)),
        }
    }
}

/// Precondition: The point holds an opponent piece.
pub struct HoldsOpponentPiece;

impl HoldsOpponentPiece {
    /// Rejects removals of empty points or own pieces.
    pub fn check(state: &GameState, removal: &Removal) -> Result<(), ActionError> {
        match state.cells().get(removal.point) {
            Cell::Empty => Err(ActionError::PointEmpty(removal.point)),
            Cell::Occupied(owner) if owner == removal.player => {
                Err(ActionError::NotOpponentPiece(removal.point))
            }
            Cell::Occupied(_) => Ok(()),
        }
    }
}

/// Precondition: Mill pieces are spared while unprotected pieces remain.
pub struct NotProtectedByMill;

impl NotProtectedByMill {
    /// Rejects removal targets outside the candidate set.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, removal: &Removal) -> Result<(), ActionError> {
        let opponent = removal.player.opponent();
        if removable_pieces(state.cells(), opponent).contains(&removal.point) {
            Ok(())
        } else if is_protected(state.cells(), removal.point, opponent) {
            Err(ActionError::ProtectedByMill(removal.point))
        } else {
            Err(ActionError::NotOpponentPiece(removal.point))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Verifies the full invariant set on a resulting state.
fn invariants_hold(after: &GameState) -> Result<(), ActionError> {
    MorabarabaInvariants::check_all(after).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        ActionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

fn ensure(condition: bool, description: &str) -> Result<(), ActionError> {
    if condition {
        Ok(())
    } else {
        warn!(description, "Postcondition failed");
        Err(ActionError::InvariantViolation(description.to_string()))
    }
}

fn pieces_on_board(state: &GameState) -> usize {
    state.cells().count(Player::A) + state.cells().count(Player::B)
}

// ─────────────────────────────────────────────────────────────
//  Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions: game not over, placing phase, no capture owed, player's
/// turn, empty point, allowance left.
///
/// Postconditions: one more piece on the board, one less in the allowance.
pub struct PlacementContract;

impl Contract<Placement> for PlacementContract {
    fn pre(state: &GameState, action: &Placement) -> Result<(), ActionError> {
        GameNotOver::check(state)?;
        InPhase::check(state, Phase::Placing)?;
        NoRemovalPending::check(state)?;
        PlayersTurn::check(state, action.player)?;
        PointIsEmpty::check(state, action.point)?;
        HasPiecesToPlace::check(state, action.player)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), ActionError> {
        ensure(
            pieces_on_board(after) == pieces_on_board(before) + 1,
            "Placement adds exactly one piece",
        )?;
        ensure(
            after.to_place().total() + 1 == before.to_place().total(),
            "Placement consumes exactly one piece of allowance",
        )?;
        invariants_hold(after)
    }
}

/// Contract for removals.
///
/// Preconditions: game not over, capture owed by the player, opponent piece
/// at the point, point among the removal candidates.
///
/// Postconditions: exactly one piece fewer, no capture owed.
pub struct RemovalContract;

impl Contract<Removal> for RemovalContract {
    fn pre(state: &GameState, action: &Removal) -> Result<(), ActionError> {
        GameNotOver::check(state)?;
        RemovalPendingFor::check(state, action.player)?;
        HoldsOpponentPiece::check(state, action)?;
        NotProtectedByMill::check(state, action)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), ActionError> {
        ensure(
            pieces_on_board(after) + 1 == pieces_on_board(before),
            "Removal takes exactly one piece",
        )?;
        ensure(
            after.pending_removal().is_none(),
            "Removal settles the pending capture",
        )?;
        invariants_hold(after)
    }
}

/// Contract for selecting the source of a move.
pub struct SelectionContract;

impl Contract<Selection> for SelectionContract {
    fn pre(state: &GameState, action: &Selection) -> Result<(), ActionError> {
        GameNotOver::check(state)?;
        InPhase::check(state, Phase::Moving)?;
        NoRemovalPending::check(state)?;
        PlayersTurn::check(state, action.player)?;
        OwnsPiece::check(state, action.point, action.player)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), ActionError> {
        ensure(
            before.cells() == after.cells(),
            "Selection leaves the board untouched",
        )?;
        invariants_hold(after)
    }
}

/// Contract for moves.
///
/// Preconditions: game not over, moving phase, no capture owed, player's
/// turn, source is the selection, destination empty and reachable.
///
/// Postconditions: piece count unchanged, selection cleared.
pub struct MoveContract;

impl Contract<Relocation> for MoveContract {
    fn pre(state: &GameState, action: &Relocation) -> Result<(), ActionError> {
        GameNotOver::check(state)?;
        InPhase::check(state, Phase::Moving)?;
        NoRemovalPending::check(state)?;
        PlayersTurn::check(state, action.player)?;
        IsSelected::check(state, action.from)?;
        PointIsEmpty::check(state, action.to)?;
        ReachableDestination::check(state, action)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), ActionError> {
        ensure(
            pieces_on_board(after) == pieces_on_board(before),
            "Moves keep the piece count",
        )?;
        ensure(after.selected().is_none(), "Moves clear the selection")?;
        invariants_hold(after)
    }
}
