//! Capture eligibility after a mill is formed.

use crate::board::is_mill_formed;
use crate::{Cells, Player, Point};
use tracing::instrument;

/// Checks whether the piece at `point` sits in a complete mill of its owner.
pub fn is_protected(cells: &Cells, point: Point, owner: Player) -> bool {
    cells.is_owned_by(point, owner) && is_mill_formed(cells, point, owner)
}

/// Returns the pieces of `opponent` that may be removed.
///
/// Pieces outside any mill are preferred: if `opponent` has at least one,
/// only those are candidates. If every piece is inside a mill, all of them
/// are.
#[instrument(skip(cells))]
pub fn removable_pieces(cells: &Cells, opponent: Player) -> Vec<Point> {
    let (in_mills, free): (Vec<Point>, Vec<Point>) = cells
        .pieces(opponent)
        .partition(|&point| is_mill_formed(cells, point, opponent));

    if free.is_empty() { in_mills } else { free }
}
