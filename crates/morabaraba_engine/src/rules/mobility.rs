//! Move legality, flying and stalemate detection.

use crate::board::adjacent;
use crate::{Cells, Player, Point};
use tracing::instrument;

/// Pieces at which a player starts flying.
pub const FLYING_PIECES: usize = 3;

/// Checks whether `player` may fly: exactly three pieces left on the board.
pub fn can_fly(cells: &Cells, player: Player) -> bool {
    cells.count(player) == FLYING_PIECES
}

/// Returns the points a piece of `player` at `from` may move to.
///
/// A flying player may move to any empty point; otherwise only empty
/// neighbours of `from` are legal.
#[instrument(skip(cells))]
pub fn legal_destinations(cells: &Cells, from: Point, player: Player) -> Vec<Point> {
    if can_fly(cells, player) {
        cells.empty_points().collect()
    } else {
        adjacent(from)
            .iter()
            .copied()
            .filter(|&to| cells.is_empty(to))
            .collect()
    }
}

/// Checks whether `player` has at least one legal move.
#[instrument(skip(cells))]
pub fn has_any_move(cells: &Cells, player: Player) -> bool {
    match cells.count(player) {
        0 => false,
        FLYING_PIECES => cells.has_empty(),
        _ => cells
            .pieces(player)
            .any(|from| adjacent(from).iter().any(|&to| cells.is_empty(to))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn board(a: &[usize], b: &[usize]) -> Cells {
        let mut cells = Cells::new();
        for &i in a {
            cells.set(Point::at(i), Cell::Occupied(Player::A));
        }
        for &i in b {
            cells.set(Point::at(i), Cell::Occupied(Player::B));
        }
        cells
    }

    #[test]
    fn test_adjacent_destinations_with_four_pieces() {
        let cells = board(&[0, 1, 3, 5], &[9]);
        let mut dest = legal_destinations(&cells, Point::at(0), Player::A);
        dest.sort();
        assert_eq!(dest, vec![Point::at(4)]);
    }

    #[test]
    fn test_flying_reaches_every_empty_point() {
        let cells = board(&[0, 1, 3, 5], &[9, 13, 17]);
        assert!(can_fly(&cells, Player::B));
        let dest = legal_destinations(&cells, Point::at(9), Player::B);
        assert_eq!(dest.len(), 24 - 7);
        assert!(dest.contains(&Point::at(4)));
    }

    #[test]
    fn test_blocked_player_has_no_move() {
        // A at 3 and 5 plus two more, all neighbours taken by B.
        let cells = board(&[3, 5, 18, 20], &[4, 10, 13, 19]);
        assert!(!has_any_move(&cells, Player::A));
        assert!(has_any_move(&cells, Player::B));
    }

    #[test]
    fn test_no_pieces_no_move() {
        assert!(!has_any_move(&Cells::new(), Player::A));
    }

    #[test]
    fn test_flying_player_moves_while_board_has_room() {
        let cells = board(&[3, 5, 18], &[4, 10, 13, 19]);
        assert!(has_any_move(&cells, Player::A));
    }
}
