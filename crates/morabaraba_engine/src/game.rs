//! Game session driver.
//!
//! [`Game`] owns the current [`GameState`] and the log of accepted actions.
//! It is the single place where input is turned into transitions, which
//! makes undo and replay a matter of re-running the log.

use super::action::{Action, ActionError};
use super::{Cell, GameState, Phase, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A recorded game: the state play started from and the accepted actions.
///
/// A log without an `origin` starts from a fresh game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameLog {
    /// State the actions apply to.
    #[serde(default)]
    pub origin: GameState,
    /// Accepted actions, oldest first.
    pub actions: Vec<Action>,
}

impl GameLog {
    /// Rebuilds the recorded game.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvariantViolation`] if the origin is not a
    /// reachable position, otherwise the first rejected action.
    #[instrument(skip(self), fields(count = self.actions.len()))]
    pub fn replay(&self) -> Result<Game, ActionError> {
        self.origin
            .validate()
            .map_err(|err| ActionError::InvariantViolation(err.to_string()))?;
        let game = Game::replay_from(self.origin.clone(), &self.actions)?;
        info!(status = %game.state().status_line(), "Log replayed");
        Ok(game)
    }
}

/// A running game with its action history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    /// State the history starts from.
    origin: GameState,
    state: GameState,
    history: Vec<Action>,
}

impl Game {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues a game from a saved state, with an empty history.
    #[instrument(skip(state), fields(status = %state.status_line()))]
    pub fn resume(state: GameState) -> Self {
        Self {
            origin: state.clone(),
            state,
            history: Vec::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the accepted actions since the last reset.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Returns the history together with the state it starts from, so a
    /// resumed game replays from where it was resumed.
    pub fn log(&self) -> GameLog {
        GameLog {
            origin: self.origin.clone(),
            actions: self.history.clone(),
        }
    }

    /// Applies an action.
    ///
    /// A move to an unreachable point is a soft rejection: the selection is
    /// dropped (recorded as a deselect) and the error is still returned so
    /// the caller can tell nothing moved.
    ///
    /// # Errors
    ///
    /// Returns the engine's rejection; the state is unchanged apart from the
    /// soft-rejected move's cleared selection.
    #[instrument(skip(self, action), fields(action = %action))]
    pub fn apply(&mut self, action: Action) -> Result<&GameState, ActionError> {
        match self.state.apply(&action) {
            Ok(next) => {
                self.state = next;
                self.record(action);
                debug!(status = %self.state.status_line(), "Action accepted");
                Ok(&self.state)
            }
            Err(err @ ActionError::IllegalDestination { .. }) => {
                debug!(error = %err, "Illegal destination, dropping selection");
                if let Action::Move(mov) = action {
                    let deselect = Action::Deselect { player: mov.player };
                    self.state = self.state.apply(&deselect)?;
                    self.history.push(deselect);
                }
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, "Action rejected");
                Err(err)
            }
        }
    }

    /// Handles a click on `point` on behalf of the player to act.
    ///
    /// Dispatches by context: a pending capture removes, placing places, and
    /// in the moving phase a click selects an own piece, moves the selection
    /// to an empty point, or drops the selection on an opponent piece.
    ///
    /// # Errors
    ///
    /// Returns the rejection of the dispatched action.
    #[instrument(skip(self))]
    pub fn click(&mut self, point: Point) -> Result<&GameState, ActionError> {
        let state = &self.state;
        if let Some(winner) = state.winner() {
            return Err(ActionError::GameOver(winner));
        }
        let player = state.turn();

        let action = if state.pending_removal().is_some() {
            Action::remove(point, player)
        } else {
            match (state.phase(), state.selected()) {
                (Phase::Placing, _) => Action::place(point, player),
                (Phase::Moving, None) => Action::select(point, player),
                (Phase::Moving, Some(from)) => match state.cells().get(point) {
                    Cell::Empty => Action::relocate(from, point, player),
                    Cell::Occupied(owner) if owner == player => Action::select(point, player),
                    Cell::Occupied(_) => Action::Deselect { player },
                },
            }
        };

        self.apply(action)
    }

    /// Starts a new game. Always succeeds.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::reset();
        self.record(Action::Reset);
        &self.state
    }

    /// Takes back the last accepted action.
    ///
    /// Returns `Ok(false)` if there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Fails only if the recorded history no longer replays.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<bool, ActionError> {
        let Some((last, earlier)) = self.history.split_last() else {
            return Ok(false);
        };
        debug!(undone = %last, "Undoing action");
        *self = Self::replay_from(self.origin.clone(), earlier)?;
        Ok(true)
    }

    /// Rebuilds a game by applying `actions` to a fresh state, in order.
    ///
    /// # Errors
    ///
    /// Returns the first rejection. Replay is strict: a recorded move to an
    /// unreachable point fails rather than deselecting.
    pub fn replay(actions: &[Action]) -> Result<Self, ActionError> {
        Self::replay_from(GameState::new(), actions)
    }

    /// Rebuilds a game by applying `actions` to `origin`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first rejection.
    #[instrument(skip(origin, actions), fields(count = actions.len()))]
    pub fn replay_from(origin: GameState, actions: &[Action]) -> Result<Self, ActionError> {
        let mut game = Self::resume(origin);
        for action in actions {
            game.state = game.state.apply(action)?;
            game.record(*action);
        }
        Ok(game)
    }

    /// Appends an accepted action to the history. A reset starts a new
    /// history from the initial state.
    fn record(&mut self, action: Action) {
        if action == Action::Reset {
            self.origin = GameState::new();
            self.history.clear();
        } else {
            self.history.push(action);
        }
    }
}
