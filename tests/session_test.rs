//! Tests for the line-driven play session.

use morabaraba::config::Settings;
use morabaraba::engine::{Cell, Game, GameLog, GameState, Player, Point};
use morabaraba::session;

fn play(script: &str) -> (Game, String) {
    play_from(Game::new(), script)
}

fn play_from(mut game: Game, script: &str) -> (Game, String) {
    let mut output = Vec::new();
    session::run(&mut game, &Settings::default(), script.as_bytes(), &mut output)
        .expect("session should not fail on in-memory I/O");
    (game, String::from_utf8(output).expect("output is UTF-8"))
}

#[test]
fn test_clicks_place_pieces_alternately() {
    let (game, output) = play("0\n1\n");
    assert_eq!(game.state().cells().get(Point::at(0)), Cell::Occupied(Player::A));
    assert_eq!(game.state().cells().get(Point::at(1)), Cell::Occupied(Player::B));
    assert_eq!(game.history().len(), 2);
    assert!(output.contains("Turn: Black"));
    assert!(output.contains("Turn: White"));
}

#[test]
fn test_rejection_is_reported_and_play_continues() {
    let (game, output) = play("0\n0\n5\n");
    assert!(output.contains("✗ Point 0 is already occupied"));
    assert_eq!(game.history().len(), 2);
    assert_eq!(game.state().cells().get(Point::at(5)), Cell::Occupied(Player::B));
}

#[test]
fn test_unknown_command_is_reported() {
    let (game, output) = play("dance\n");
    assert!(output.contains("Unknown command 'dance'"));
    assert_eq!(game.state(), &GameState::new());
}

#[test]
fn test_undo_and_reset() {
    let (game, _) = play("0\n1\nu\n");
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.state().turn(), Player::B);

    let (game, output) = play("u\n");
    assert!(output.contains("Nothing to undo"));
    assert!(game.history().is_empty());

    let (game, _) = play("0\n1\nr\n");
    assert_eq!(game.state(), &GameState::new());
}

#[test]
fn test_quit_stops_reading() {
    let (game, _) = play("0\nq\n1\n");
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_save_state_and_log() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    let log_path = dir.path().join("log.json");
    let script = format!(
        "0\n9\ns {}\nl {}\n",
        state_path.display(),
        log_path.display()
    );
    let (game, output) = play(&script);
    assert!(output.contains("Saved to"));

    let saved = GameState::from_json(&std::fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(&saved, game.state());

    let log: GameLog =
        serde_json::from_str(&std::fs::read_to_string(&log_path).unwrap()).unwrap();
    assert_eq!(log.origin, GameState::new());
    assert_eq!(log.actions, game.history());
    assert_eq!(log.replay().unwrap().state(), game.state());
}

#[test]
fn test_log_saved_after_resume_replays() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.json");
    let start = GameState::new().place(Point::at(5), Player::A).unwrap();

    let script = format!("6\n7\nl {}\n", log_path.display());
    let (game, _) = play_from(Game::resume(start.clone()), &script);
    assert_eq!(game.history().len(), 2);

    let log: GameLog =
        serde_json::from_str(&std::fs::read_to_string(&log_path).unwrap()).unwrap();
    assert_eq!(log.origin, start);
    let replayed = log.replay().expect("log replays from its origin");
    assert_eq!(replayed.state(), game.state());
    assert_eq!(
        replayed.state().cells().get(Point::at(7)),
        Cell::Occupied(Player::A)
    );
}

#[test]
fn test_save_to_missing_directory_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("state.json");
    let (_, output) = play(&format!("s {}\n0\n", path.display()));
    assert!(output.contains("Could not save"));
}
