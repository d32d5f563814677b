//! Session driver: click dispatch, replay, undo and whole-game invariants.

mod common;

use common::{moving, pt};
use morabaraba_engine::invariants::{InvariantSet, MorabarabaInvariants};
use morabaraba_engine::rules::{legal_destinations, removable_pieces};
use morabaraba_engine::{Action, ActionError, Cell, Game, GameState, Phase, Player, ToPlace};

/// Plays one turn-step with a fixed policy: lowest-numbered candidate first.
fn step(game: &mut Game) -> Result<(), ActionError> {
    let state = game.state().clone();
    let player = state.turn();

    let action = if state.pending_removal().is_some() {
        Action::remove(removable_pieces(state.cells(), player.opponent())[0], player)
    } else if state.phase() == Phase::Placing {
        let point = state.cells().empty_points().next().expect("room to place");
        Action::place(point, player)
    } else {
        let (from, to) = state
            .cells()
            .pieces(player)
            .find_map(|from| {
                legal_destinations(state.cells(), from, player)
                    .first()
                    .map(|&to| (from, to))
            })
            .expect("side to move has a move");
        game.apply(Action::select(from, player))?;
        Action::relocate(from, to, player)
    };

    game.apply(action).map(|_| ())
}

#[test]
fn test_invariants_hold_through_a_whole_game() {
    let mut game = Game::new();
    let mut previous_allowance = game.state().to_place().total();
    let mut reached_moving = false;

    for _ in 0..400 {
        if game.state().is_over() {
            break;
        }
        step(&mut game).expect("policy only plays legal actions");
        let state = game.state();

        assert!(MorabarabaInvariants::check_all(state).is_ok());
        assert!(state.to_place().total() <= previous_allowance);
        previous_allowance = state.to_place().total();

        match state.phase() {
            Phase::Moving => {
                assert_eq!(state.to_place(), ToPlace::with(0, 0));
                reached_moving = true;
            }
            Phase::Placing => assert!(!reached_moving, "phase reverted to placing"),
        }
    }

    assert!(reached_moving);
    let replayed = Game::replay(game.history()).expect("history replays");
    assert_eq!(replayed.state(), game.state());
}

#[test]
fn test_click_dispatch_in_moving_phase() {
    let mut game = Game::resume(moving(&[0, 1, 3, 5, 22], &[9, 13, 17, 20], "A"));

    // Opponent piece with nothing selected: rejected.
    assert_eq!(
        game.click(pt(9)),
        Err(ActionError::NotOwnPiece(pt(9), Player::A))
    );

    game.click(pt(0)).expect("select");
    assert_eq!(game.state().selected(), Some(pt(0)));

    // Another own piece re-selects.
    game.click(pt(3)).expect("reselect");
    assert_eq!(game.state().selected(), Some(pt(3)));

    // Opponent piece deselects.
    game.click(pt(9)).expect("deselect");
    assert_eq!(game.state().selected(), None);

    game.click(pt(3)).expect("select");
    let state = game.click(pt(4)).expect("move");
    assert_eq!(state.cells().get(pt(4)), Cell::Occupied(Player::A));
    assert_eq!(state.turn(), Player::B);
}

#[test]
fn test_click_removes_when_capture_pending() {
    let mut game = Game::new();
    for i in [0, 10, 1, 11, 2] {
        game.click(pt(i)).expect("placement");
    }
    assert_eq!(game.state().pending_removal(), Some(Player::A));

    let state = game.click(pt(10)).expect("removal");
    assert_eq!(state.cells().get(pt(10)), Cell::Empty);
    assert_eq!(state.turn(), Player::B);
}

#[test]
fn test_replay_recorded_game() {
    let log = r#"[
        { "action": "place", "point": 0, "player": "A" },
        { "action": "place", "point": 10, "player": "B" },
        { "action": "place", "point": 1, "player": "A" },
        { "action": "place", "point": 11, "player": "B" },
        { "action": "place", "point": 2, "player": "A" },
        { "action": "remove", "point": 11, "player": "A" }
    ]"#;
    let actions: Vec<Action> = serde_json::from_str(log).expect("valid log");

    let game = Game::replay(&actions).expect("legal game");
    assert_eq!(game.history(), actions.as_slice());
    assert_eq!(game.state().to_place(), ToPlace::with(9, 10));
    assert_eq!(game.state().cells().count(Player::B), 1);
    assert_eq!(game.state().turn(), Player::B);
}

#[test]
fn test_replay_stops_at_first_rejection() {
    let actions = [
        Action::place(pt(0), Player::A),
        Action::place(pt(0), Player::B),
    ];
    assert_eq!(
        Game::replay(&actions),
        Err(ActionError::PointOccupied(pt(0)))
    );
}

#[test]
fn test_undo_walks_back_to_start() {
    let mut game = Game::new();
    for i in [0, 10, 1] {
        game.click(pt(i)).expect("placement");
    }
    while game.undo().expect("history replays") {}
    assert_eq!(game.state(), &GameState::new());
    assert!(game.history().is_empty());
}
