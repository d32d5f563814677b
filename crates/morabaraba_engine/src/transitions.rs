//! State transitions: the engine's action-application functions.
//!
//! Every transition borrows the current state and returns a new one. A
//! rejected action returns an error and leaves the input untouched.

use super::action::{Action, ActionError, Placement, Relocation, Removal, Selection};
use super::board::is_mill_formed;
use super::contracts::{
    Contract, GameNotOver, InPhase, MoveContract, PlacementContract, PlayersTurn,
    RemovalContract, SelectionContract,
};
use super::rules::{check_winner, removable_pieces};
use super::{Cell, GameState, Phase, Player, Point};
use tracing::{debug, info, instrument};

impl GameState {
    /// Places a piece of `player` on an empty point.
    ///
    /// # Errors
    ///
    /// Rejects the placement if the game is over, the phase is not
    /// [`Phase::Placing`], a capture is pending, it is not `player`'s turn,
    /// the point is occupied or the allowance is used up.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place(&self, point: Point, player: Player) -> Result<GameState, ActionError> {
        let action = Placement { point, player };
        PlacementContract::pre(self, &action)?;

        let mut next = self.clone();
        next.cells.set(point, Cell::Occupied(player));
        next.to_place.take(player);
        next.conclude_turn(point, player);

        if next.phase == Phase::Placing && next.to_place.is_exhausted() {
            info!("All pieces placed, entering moving phase");
            next.phase = Phase::Moving;
        }
        next.refresh_winner();

        #[cfg(debug_assertions)]
        PlacementContract::post(self, &next)?;

        Ok(next)
    }

    /// Removes an opponent piece after `player` formed a mill.
    ///
    /// # Errors
    ///
    /// Rejects the removal if no capture is owed by `player`, the point does
    /// not hold an opponent piece, or the piece sits in a mill while the
    /// opponent still has pieces outside mills.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn remove(&self, point: Point, player: Player) -> Result<GameState, ActionError> {
        let action = Removal { point, player };
        RemovalContract::pre(self, &action)?;

        let mut next = self.clone();
        next.cells.set(point, Cell::Empty);
        next.pending_removal = None;
        next.turn = player.opponent();
        next.refresh_winner();
        debug!(remaining = next.cells.count(player.opponent()), "Piece removed");

        #[cfg(debug_assertions)]
        RemovalContract::post(self, &next)?;

        Ok(next)
    }

    /// Selects one of `player`'s pieces as the source of a move.
    ///
    /// Selecting another own piece replaces the selection.
    ///
    /// # Errors
    ///
    /// Rejects the selection outside the moving phase, while a capture is
    /// pending, out of turn, or on a point not holding `player`'s piece.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn select(&self, point: Point, player: Player) -> Result<GameState, ActionError> {
        let action = Selection { point, player };
        SelectionContract::pre(self, &action)?;

        let mut next = self.clone();
        next.selected = Some(point);

        #[cfg(debug_assertions)]
        SelectionContract::post(self, &next)?;

        Ok(next)
    }

    /// Drops the current selection, if any.
    ///
    /// # Errors
    ///
    /// Rejects the request once the game is over, outside the moving phase
    /// or out of turn.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn deselect(&self, player: Player) -> Result<GameState, ActionError> {
        GameNotOver::check(self)?;
        InPhase::check(self, Phase::Moving)?;
        PlayersTurn::check(self, player)?;

        let mut next = self.clone();
        next.selected = None;
        Ok(next)
    }

    /// Moves the selected piece from `from` to `to`.
    ///
    /// A player with exactly three pieces may fly to any empty point; with
    /// more, only adjacent empty points are reachable.
    ///
    /// # Errors
    ///
    /// Rejects the move outside the moving phase, while a capture is
    /// pending, out of turn, if `from` is not the selection, if `to` is
    /// occupied, or with [`ActionError::IllegalDestination`] if `to` is not
    /// reachable.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn move_piece(
        &self,
        from: Point,
        to: Point,
        player: Player,
    ) -> Result<GameState, ActionError> {
        let action = Relocation { from, to, player };
        MoveContract::pre(self, &action)?;

        let mut next = self.clone();
        next.cells.set(from, Cell::Empty);
        next.cells.set(to, Cell::Occupied(player));
        next.selected = None;
        next.conclude_turn(to, player);
        next.refresh_winner();

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        Ok(next)
    }

    /// Applies any action.
    ///
    /// # Errors
    ///
    /// Returns the rejection of the underlying transition.
    pub fn apply(&self, action: &Action) -> Result<GameState, ActionError> {
        match *action {
            Action::Place(Placement { point, player }) => self.place(point, player),
            Action::Remove(Removal { point, player }) => self.remove(point, player),
            Action::Select(Selection { point, player }) => self.select(point, player),
            Action::Deselect { player } => self.deselect(player),
            Action::Move(Relocation { from, to, player }) => self.move_piece(from, to, player),
            Action::Reset => Ok(GameState::reset()),
        }
    }

    /// Ends `player`'s placement or move at `point`: either a capture is
    /// owed, or the turn passes.
    fn conclude_turn(&mut self, point: Point, player: Player) {
        let opponent = player.opponent();
        if is_mill_formed(&self.cells, point, player) {
            if removable_pieces(&self.cells, opponent).is_empty() {
                debug!(%point, "Mill formed but nothing to remove");
                self.turn = opponent;
            } else {
                info!(%point, %player, "Mill formed");
                self.pending_removal = Some(player);
            }
        } else {
            self.turn = opponent;
        }
    }

    fn refresh_winner(&mut self) {
        if let Some(winner) = check_winner(self) {
            if self.winner.is_none() {
                info!(%winner, "Game over");
            }
            self.winner = Some(winner);
            self.selected = None;
            self.pending_removal = None;
        }
    }
}
