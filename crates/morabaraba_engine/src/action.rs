//! First-class action types for Morabaraba.
//!
//! Actions are domain events, not side effects. They carry the player's
//! intent, can be validated before application and serialized for replay.

use super::{Phase, Player, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placing a piece from the allowance onto an empty point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Placement {
    /// Target point.
    pub point: Point,
    /// Player placing the piece.
    pub player: Player,
}

/// Capturing an opponent piece after forming a mill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Removal {
    /// Point of the opponent piece.
    pub point: Point,
    /// Player who formed the mill.
    pub player: Player,
}

/// Choosing the source piece of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Selection {
    /// Point of the player's own piece.
    pub point: Point,
    /// Player selecting.
    pub player: Player,
}

/// Relocating the selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Relocation {
    /// Selected source point.
    pub from: Point,
    /// Empty destination point.
    pub to: Point,
    /// Player moving.
    pub player: Player,
}

/// Any input the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Place a piece.
    Place(Placement),
    /// Remove an opponent piece.
    Remove(Removal),
    /// Select the source of a move.
    Select(Selection),
    /// Drop the current selection.
    Deselect {
        /// Player to move.
        player: Player,
    },
    /// Move the selected piece.
    Move(Relocation),
    /// Start a new game.
    Reset,
}

impl Action {
    /// Creates a placement action.
    pub fn place(point: Point, player: Player) -> Self {
        Action::Place(Placement { point, player })
    }

    /// Creates a removal action.
    pub fn remove(point: Point, player: Player) -> Self {
        Action::Remove(Removal { point, player })
    }

    /// Creates a selection action.
    pub fn select(point: Point, player: Player) -> Self {
        Action::Select(Selection { point, player })
    }

    /// Creates a move action.
    pub fn relocate(from: Point, to: Point, player: Player) -> Self {
        Action::Move(Relocation { from, to, player })
    }

    /// Returns the acting player, if the action has one.
    pub fn player(&self) -> Option<Player> {
        match self {
            Action::Place(p) => Some(p.player),
            Action::Remove(r) => Some(r.player),
            Action::Select(s) => Some(s.player),
            Action::Deselect { player } => Some(*player),
            Action::Move(m) => Some(m.player),
            Action::Reset => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(p) => write!(f, "{} places at {}", p.player, p.point),
            Action::Remove(r) => write!(f, "{} removes {}", r.player, r.point),
            Action::Select(s) => write!(f, "{} selects {}", s.player, s.point),
            Action::Deselect { player } => write!(f, "{} deselects", player),
            Action::Move(m) => write!(f, "{} moves {} -> {}", m.player, m.from, m.to),
            Action::Reset => write!(f, "reset"),
        }
    }
}

/// Reason an action was rejected. The state is never changed by a
/// rejected action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The game is already over.
    #[display("Game is already over ({} won)", _0)]
    GameOver(Player),

    /// The action does not belong to the current phase.
    #[display("Not allowed in the {} phase", _0)]
    WrongPhase(Phase),

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// A mill was formed and its capture must happen first.
    #[display("{} must remove an opponent piece first", _0)]
    RemovalPending(Player),

    /// No capture is owed by this player.
    #[display("{} has no removal pending", _0)]
    NoRemovalPending(Player),

    /// The point already holds a piece.
    #[display("Point {} is already occupied", _0)]
    PointOccupied(Point),

    /// The point holds no piece.
    #[display("Point {} is empty", _0)]
    PointEmpty(Point),

    /// The point does not hold a piece of the acting player.
    #[display("Point {} does not hold a piece of {}", _0, _1)]
    NotOwnPiece(Point, Player),

    /// The placement allowance is used up.
    #[display("{} has no pieces left to place", _0)]
    NoPiecesLeft(Player),

    /// The source of a move is not the selected piece.
    #[display("Point {} is not the selected piece", _0)]
    NotSelected(Point),

    /// The destination is not reachable from the source.
    #[display("Cannot move from {} to {}", from, to)]
    IllegalDestination {
        /// Source point.
        from: Point,
        /// Rejected destination.
        to: Point,
    },

    /// The point does not hold an opponent piece.
    #[display("Point {} does not hold an opponent piece", _0)]
    NotOpponentPiece(Point),

    /// The piece is in a mill while unprotected pieces remain.
    #[display("Point {} is protected by a mill", _0)]
    ProtectedByMill(Point),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ActionError {}
