//! Text rendering of a game state.
//!
//! Points are laid out on a 7x7 grid derived from the board's display
//! coordinates. Empty points show their number, so players know what to
//! type.

use crate::config::Settings;
use morabaraba_engine::board::coordinates;
use morabaraba_engine::rules::{legal_destinations, removable_pieces};
use morabaraba_engine::{Cell, GameState, Phase, Player, Point};
use std::fmt::Write;

const GRID: usize = 7;

/// Maps a display coordinate (5..=95 in steps of 15) to a grid slot.
fn slot(coordinate: u8) -> usize {
    (coordinate.saturating_sub(5) / 15) as usize
}

/// Renders the board as a grid of fixed-width tokens.
pub fn render_board(state: &GameState, settings: &Settings) -> String {
    let mut grid = [[None::<Point>; GRID]; GRID];
    for point in Point::ALL {
        let (x, y) = coordinates(point);
        grid[slot(y)][slot(x)] = Some(point);
    }

    let mut out = String::new();
    for row in grid {
        let line: String = row
            .iter()
            .map(|slot| match slot {
                Some(point) => token(state, settings, *point),
                None => "    ".to_string(),
            })
            .collect();
        out.push_str(line.trim_end());
        out.push_str("\n\n");
    }
    out.pop();
    out
}

fn token(state: &GameState, settings: &Settings, point: Point) -> String {
    match state.cells().get(point) {
        Cell::Empty => format!("{:>3} ", point.index()),
        Cell::Occupied(player) => {
            let symbol = settings.display().symbol(player);
            if state.selected() == Some(point) {
                format!(" [{}]", symbol)
            } else {
                format!("  {} ", symbol)
            }
        }
    }
}

/// Renders the status panel: phase, turn, piece counts and allowances.
pub fn render_status(state: &GameState, settings: &Settings) -> String {
    let names = settings.players();
    let mut out = String::new();

    match state.winner() {
        Some(winner) => {
            let _ = writeln!(out, "{} wins! Type r to play again.", names.name(winner));
        }
        None => {
            let _ = write!(
                out,
                "Phase: {} • Turn: {}",
                state.phase(),
                names.name(state.turn())
            );
            if let Some(player) = state.pending_removal() {
                let _ = write!(out, " • {} remove an opponent piece", names.name(player));
            }
            out.push('\n');
        }
    }

    let cells = state.cells();
    let _ = writeln!(
        out,
        "{} pieces: {} • {} pieces: {}",
        names.name(Player::A),
        cells.count(Player::A),
        names.name(Player::B),
        cells.count(Player::B),
    );
    let _ = write!(
        out,
        "To place → {}: {}  {}: {}",
        names.name(Player::A),
        state.to_place().get(Player::A),
        names.name(Player::B),
        state.to_place().get(Player::B),
    );
    out
}

/// Lists the points the player to act can usefully click, if helpful.
pub fn render_hints(state: &GameState) -> Option<String> {
    if state.is_over() {
        return None;
    }
    let player = state.turn();
    let cells = state.cells();

    let (label, points) = if state.pending_removal().is_some() {
        ("Remove one of", removable_pieces(cells, player.opponent()))
    } else {
        match (state.phase(), state.selected()) {
            (Phase::Placing, _) => return None,
            (Phase::Moving, Some(from)) => ("Move to one of", legal_destinations(cells, from, player)),
            (Phase::Moving, None) => (
                "Pieces that can move",
                cells
                    .pieces(player)
                    .filter(|&from| !legal_destinations(cells, from, player).is_empty())
                    .collect(),
            ),
        }
    };

    let list = points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("{}: {}", label, list))
}

/// Renders the board, the status panel and, if enabled, the hints.
pub fn render(state: &GameState, settings: &Settings) -> String {
    let mut out = render_board(state, settings);
    out.push_str("\n\n");
    out.push_str(&render_status(state, settings));
    if *settings.display().show_hints()
        && let Some(hints) = render_hints(state)
    {
        out.push('\n');
        out.push_str(&hints);
    }
    out
}
