//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use morabaraba_engine::{GameState, Point};
use serde_json::json;

/// Shorthand for a board point.
pub fn pt(index: usize) -> Point {
    Point::at(index)
}

/// Builds a validated state from piece positions.
pub fn snapshot(
    a: &[usize],
    b: &[usize],
    phase: &str,
    turn: &str,
    to_place: (u8, u8),
    pending_removal: Option<&str>,
) -> GameState {
    let mut cells = vec![json!(null); 24];
    for &i in a {
        cells[i] = json!("A");
    }
    for &i in b {
        cells[i] = json!("B");
    }
    let value = json!({
        "cells": cells,
        "turn": turn,
        "phase": phase,
        "toPlace": { "A": to_place.0, "B": to_place.1 },
        "selected": null,
        "pendingRemoval": pending_removal,
        "winner": null,
    });
    GameState::from_json(&value.to_string()).expect("consistent snapshot")
}

/// Builds a moving-phase state with no capture pending.
pub fn moving(a: &[usize], b: &[usize], turn: &str) -> GameState {
    snapshot(a, b, "Moving", turn, (0, 0), None)
}
