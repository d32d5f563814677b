//! The complete, serializable game state.

use super::invariants::{InvariantSet, MorabarabaInvariants};
use super::point::Point;
use super::rules::check_winner;
use super::types::{Cells, Phase, Player, ToPlace};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Complete game state.
///
/// The only mutable entity of the engine. Every accepted action produces a
/// new `GameState`; the previous one is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Occupant of each point.
    pub(crate) cells: Cells,
    /// Player to act.
    pub(crate) turn: Player,
    /// Current phase.
    pub(crate) phase: Phase,
    /// Remaining placement allowance.
    pub(crate) to_place: ToPlace,
    /// Piece chosen as the source of a move.
    pub(crate) selected: Option<Point>,
    /// Player who formed a mill and must remove an opponent piece.
    pub(crate) pending_removal: Option<Player>,
    /// Winner, once the game is over.
    pub(crate) winner: Option<Player>,
}

impl GameState {
    /// Creates the initial state: empty board, full allowances, A to place.
    #[instrument]
    pub fn new() -> Self {
        Self {
            cells: Cells::new(),
            turn: Player::A,
            phase: Phase::Placing,
            to_place: ToPlace::new(),
            selected: None,
            pending_removal: None,
            winner: None,
        }
    }

    /// Returns a fresh initial state. Always succeeds.
    #[instrument]
    pub fn reset() -> Self {
        debug!("Resetting game");
        Self::new()
    }

    /// Returns the board cells.
    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Returns the player to act.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the remaining placement allowance.
    pub fn to_place(&self) -> ToPlace {
        self.to_place
    }

    /// Returns the selected source piece, if any.
    pub fn selected(&self) -> Option<Point> {
        self.selected
    }

    /// Returns the player who must remove a piece, if any.
    pub fn pending_removal(&self) -> Option<Player> {
        self.pending_removal
    }

    /// Returns the winner, if the game is over.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns true once a winner has been declared.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns a status string for display.
    pub fn status_line(&self) -> String {
        if let Some(winner) = self.winner {
            return format!("{} wins!", winner);
        }
        let mut line = format!("Phase: {} • Turn: {}", self.phase, self.turn);
        if let Some(player) = self.pending_removal {
            line.push_str(&format!(" • {} remove an opponent piece", player));
        }
        line
    }

    /// Serializes the state as JSON.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a state from JSON, rejecting snapshots that break the
    /// game invariants.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let state: Self = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    /// Checks that the state could arise in play: the game invariants
    /// hold and `winner` matches the position.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Inconsistent`] describing the first problem.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        MorabarabaInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Rejected inconsistent snapshot");
            SnapshotError::Inconsistent(descriptions)
        })?;

        let mut undecided = self.clone();
        undecided.winner = None;
        let decided = check_winner(&undecided);
        if decided != self.winner {
            let description = match decided {
                Some(winner) => format!("{} has already won", winner),
                None => "Winner recorded for an undecided position".to_string(),
            };
            warn!(%description, "Rejected snapshot with stale winner");
            return Err(SnapshotError::Inconsistent(description));
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Error loading or saving a [`GameState`] snapshot.
#[derive(Debug, derive_more::Display)]
pub enum SnapshotError {
    /// The JSON could not be encoded or decoded.
    #[display("Malformed game state: {}", _0)]
    Json(serde_json::Error),
    /// The decoded state violates game invariants.
    #[display("Inconsistent game state: {}", _0)]
    Inconsistent(String),
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(err) => Some(err),
            SnapshotError::Inconsistent(_) => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.turn(), Player::A);
        assert_eq!(state.phase(), Phase::Placing);
        assert_eq!(state.to_place(), ToPlace::with(12, 12));
        assert_eq!(state.cells().empty_points().count(), 24);
        assert_eq!(state.selected(), None);
        assert_eq!(state.pending_removal(), None);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_json_shape_is_flat() {
        let state = GameState::new().place(Point::at(0), Player::A).unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["cells"].as_array().map(Vec::len), Some(24));
        assert_eq!(json["cells"][0], "A");
        assert!(json["cells"][1].is_null());
        assert_eq!(json["turn"], "B");
        assert_eq!(json["toPlace"]["A"], 11);
        assert_eq!(json["phase"], "Placing");
        assert_eq!(json["toPlace"]["B"], 12);
        assert!(json["selected"].is_null());
        assert!(json["pendingRemoval"].is_null());
        assert!(json["winner"].is_null());
    }

    #[test]
    fn test_json_snapshot_restores_state() {
        let state = GameState::new();
        let json = state.to_json().unwrap();
        assert_eq!(GameState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_inconsistent_snapshot_rejected() {
        let mut value = serde_json::to_value(GameState::new()).unwrap();
        value["phase"] = serde_json::json!("Moving");
        let err = GameState::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(_)));
    }

    fn blocked_position(winner: Option<&str>) -> String {
        // A at 4, 10, 13, 22 and B at 3, 5, 18, 20; A moves 22 -> 19 and
        // leaves B without a move.
        let mut cells = vec![serde_json::Value::Null; 24];
        for i in [4, 10, 13, 19] {
            cells[i] = serde_json::json!("A");
        }
        for i in [3, 5, 18, 20] {
            cells[i] = serde_json::json!("B");
        }
        serde_json::json!({
            "cells": cells,
            "turn": "B",
            "phase": "Moving",
            "toPlace": { "A": 0, "B": 0 },
            "selected": null,
            "pendingRemoval": null,
            "winner": winner,
        })
        .to_string()
    }

    #[test]
    fn test_snapshot_with_missing_winner_rejected() {
        let err = GameState::from_json(&blocked_position(None)).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(ref d) if d.contains("Player A")));
    }

    #[test]
    fn test_snapshot_with_current_winner_accepted() {
        let state = GameState::from_json(&blocked_position(Some("A"))).unwrap();
        assert_eq!(state.winner(), Some(Player::A));
    }

    #[test]
    fn test_snapshot_with_premature_winner_rejected() {
        let mut value = serde_json::to_value(GameState::new()).unwrap();
        value["winner"] = serde_json::json!("B");
        assert!(GameState::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_malformed_snapshot_rejected() {
        let err = GameState::from_json("{\"cells\": 3}").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_status_line() {
        let mut state = GameState::new();
        assert_eq!(state.status_line(), "Phase: placing • Turn: Player A");
        state.pending_removal = Some(Player::A);
        assert_eq!(
            state.status_line(),
            "Phase: placing • Turn: Player A • Player A remove an opponent piece"
        );
        state.pending_removal = None;
        state.winner = Some(Player::B);
        assert_eq!(state.status_line(), "Player B wins!");
    }
}
