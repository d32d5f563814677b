//! Core domain types for Morabaraba.

use super::point::{POINT_COUNT, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pieces each player brings to the board.
pub const PIECES_PER_PLAYER: u8 = 12;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player A (moves first).
    #[strum(to_string = "Player A")]
    A,
    /// Player B (moves second).
    #[strum(to_string = "Player B")]
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

/// A point's occupant.
///
/// Serialized as `null`, `"A"` or `"B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(from = "Option<Player>", into = "Option<Player>")]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// A piece of the given player.
    Occupied(Player),
}

impl From<Option<Player>> for Cell {
    fn from(occupant: Option<Player>) -> Self {
        occupant.map_or(Cell::Empty, Cell::Occupied)
    }
}

impl From<Cell> for Option<Player> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// The 24 board cells, indexed by [`Point`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Cells {
    cells: [Cell; POINT_COUNT],
}

impl Cells {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; POINT_COUNT],
        }
    }

    /// Gets the cell at the given point.
    pub fn get(&self, point: Point) -> Cell {
        self.cells[point.index()]
    }

    /// Sets the cell at the given point.
    pub fn set(&mut self, point: Point, cell: Cell) {
        self.cells[point.index()] = cell;
    }

    /// Checks if a point is empty.
    pub fn is_empty(&self, point: Point) -> bool {
        self.get(point) == Cell::Empty
    }

    /// Checks if a point holds a piece of `player`.
    pub fn is_owned_by(&self, point: Point, player: Player) -> bool {
        self.get(point) == Cell::Occupied(player)
    }

    /// Counts the pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Occupied(player))
            .count()
    }

    /// Returns the points holding pieces of `player`.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Point> + '_ {
        Point::ALL
            .into_iter()
            .filter(move |&point| self.is_owned_by(point, player))
    }

    /// Returns the empty points.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        Point::ALL.into_iter().filter(|&point| self.is_empty(point))
    }

    /// Checks if any point is empty.
    pub fn has_empty(&self) -> bool {
        self.cells.contains(&Cell::Empty)
    }

    /// Returns all cells in point order.
    pub fn as_array(&self) -> &[Cell; POINT_COUNT] {
        &self.cells
    }
}

impl Default for Cells {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase of the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Players place pieces from their allowance onto empty points.
    Placing,
    /// Players relocate pieces along board lines, or fly with three left.
    Moving,
}

/// Remaining placement allowance per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToPlace {
    /// Pieces player A still has to place.
    #[serde(rename = "A")]
    a: u8,
    /// Pieces player B still has to place.
    #[serde(rename = "B")]
    b: u8,
}

impl ToPlace {
    /// Full allowance for both players.
    pub fn new() -> Self {
        Self::with(PIECES_PER_PLAYER, PIECES_PER_PLAYER)
    }

    /// Explicit allowance for each player.
    pub fn with(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    /// Returns the remaining allowance of `player`.
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    /// Takes one piece from `player`'s allowance.
    pub(crate) fn take(&mut self, player: Player) {
        let slot = match player {
            Player::A => &mut self.a,
            Player::B => &mut self.b,
        };
        *slot = slot.saturating_sub(1);
    }

    /// Both players have placed every piece.
    pub fn is_exhausted(&self) -> bool {
        self.a == 0 && self.b == 0
    }

    /// Pieces left to place across both players.
    pub fn total(&self) -> u8 {
        self.a + self.b
    }
}

impl Default for ToPlace {
    fn default() -> Self {
        Self::new()
    }
}
