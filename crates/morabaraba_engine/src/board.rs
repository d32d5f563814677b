//! Static board topology: coordinates, adjacency and mills.
//!
//! The board is three concentric squares joined by cross connectors, with the
//! South African diagonals through the inner corners. All tables are fixed at
//! compile time and never mutated.

use super::point::{POINT_COUNT, Point};
use super::types::{Cell, Cells, Player};
use tracing::instrument;

/// A line of three points that scores when held by one player.
pub type Mill = [Point; 3];

const fn p(index: usize) -> Point {
    Point::at(index)
}

/// Display coordinates on a 100x100 canvas, indexed by point.
///
/// Presentation-only; the engine never reads them.
#[rustfmt::skip]
pub const COORDINATES: [(u8, u8); POINT_COUNT] = [
    (5, 5), (50, 5), (95, 5),
    (20, 20), (50, 20), (80, 20),
    (35, 35), (50, 35), (65, 35),
    (5, 50), (20, 50), (35, 50),
    (65, 50), (80, 50), (95, 50),
    (35, 65), (50, 65), (65, 65),
    (20, 80), (50, 80), (80, 80),
    (5, 95), (50, 95), (95, 95),
];

/// Neighbours reachable by a non-flying move, indexed by point.
///
/// Links are one-way where the board defines them so: 19 reaches 15 and 17,
/// but neither 15 nor 17 reaches 19.
pub const ADJACENCY: [&[Point]; POINT_COUNT] = [
    &[p(1), p(9), p(4)],
    &[p(0), p(2), p(4)],
    &[p(1), p(14), p(4)],
    &[p(4), p(10)],
    &[p(1), p(3), p(5), p(7), p(0), p(2), p(6), p(8)],
    &[p(4), p(13)],
    &[p(7), p(11), p(4)],
    &[p(4), p(6), p(8)],
    &[p(7), p(12), p(4)],
    &[p(0), p(10), p(21), p(13)],
    &[p(3), p(9), p(11), p(18)],
    &[p(6), p(10), p(15), p(13)],
    &[p(8), p(13), p(17)],
    &[p(5), p(12), p(14), p(20), p(9), p(11), p(17), p(15)],
    &[p(2), p(13), p(23)],
    &[p(11), p(16), p(13), p(23)],
    &[p(15), p(17), p(19)],
    &[p(12), p(16), p(13), p(21)],
    &[p(10), p(19)],
    &[p(16), p(18), p(20), p(22), p(21), p(23), p(17), p(15)],
    &[p(13), p(19)],
    &[p(9), p(22), p(19), p(17)],
    &[p(19), p(21), p(23)],
    &[p(14), p(22), p(19), p(15)],
];

/// Every scoring line on the board.
pub const MILLS: [Mill; 22] = [
    // Rings
    [p(0), p(1), p(2)],
    [p(3), p(4), p(5)],
    [p(6), p(7), p(8)],
    [p(9), p(10), p(11)],
    [p(12), p(13), p(14)],
    [p(15), p(16), p(17)],
    [p(18), p(19), p(20)],
    [p(21), p(22), p(23)],
    // Cross connectors
    [p(0), p(9), p(21)],
    [p(3), p(10), p(18)],
    [p(6), p(11), p(15)],
    [p(1), p(4), p(7)],
    [p(16), p(19), p(22)],
    [p(8), p(12), p(17)],
    [p(5), p(13), p(20)],
    [p(2), p(14), p(23)],
    // Diagonals
    [p(0), p(4), p(8)],
    [p(2), p(4), p(6)],
    [p(21), p(19), p(17)],
    [p(23), p(19), p(15)],
    [p(9), p(13), p(17)],
    [p(11), p(13), p(15)],
];

/// Returns the fixed neighbour set of a point.
pub fn adjacent(point: Point) -> &'static [Point] {
    ADJACENCY[point.index()]
}

/// Returns the display coordinates of a point.
pub fn coordinates(point: Point) -> (u8, u8) {
    COORDINATES[point.index()]
}

/// Returns every mill line that includes the given point.
pub fn mills_containing(point: Point) -> impl Iterator<Item = &'static Mill> {
    MILLS.iter().filter(move |mill| mill.contains(&point))
}

/// Checks whether `player` holds a complete mill through `point`.
///
/// Only lines through `point` are considered: a mill is triggered by the
/// piece that just arrived there, not found by rescanning the board.
#[instrument(skip(cells))]
pub fn is_mill_formed(cells: &Cells, point: Point, player: Player) -> bool {
    mills_containing(point).any(|mill| {
        mill.iter()
            .all(|&member| cells.get(member) == Cell::Occupied(player))
    })
}
