//! End-to-end tests for headless script runs.

use strictly_handheld::{HandheldConfig, parse_script, run_script};
use strictly_tictactoe::{Outcome, Phase, Player, Position};

/// X takes the top row while O takes two cells of the middle row.
const X_WINS_TOP_ROW: &str = "p v p v v h p v p v v h p";

fn run(script: &str) -> strictly_handheld::ScriptRun {
    let steps = parse_script(script).unwrap();
    run_script(&steps, &HandheldConfig::default())
}

#[test]
fn test_place_move_place_move_place() {
    let report = run("p h p h p").report;
    assert_eq!(report.board, "XOX/.../...");
    assert_eq!(report.to_move, Player::O);
    assert_eq!(report.cursor, Position::TopRight);
    assert_eq!(report.outcome, Outcome::InProgress);
    assert_eq!(report.phase, Phase::Playing);
}

#[test]
fn test_occupied_cell_press_is_absorbed() {
    let report = run("p p p").report;
    assert_eq!(report.board, "X../.../...");
    assert_eq!(report.to_move, Player::O);
}

#[test]
fn test_win_freezes_board() {
    let report = run(&format!("{X_WINS_TOP_ROW} v p wait:1000")).report;
    assert_eq!(report.board, "XXX/OO./...");
    assert_eq!(report.outcome.winner(), Some(Player::X));
    assert_eq!(report.phase, Phase::Ended);
}

#[test]
fn test_game_resets_after_delay() {
    let frozen = run(&format!("{X_WINS_TOP_ROW} wait:2990")).report;
    assert_eq!(frozen.phase, Phase::Ended);
    assert_eq!(frozen.board, "XXX/OO./...");

    let reset = run(&format!("{X_WINS_TOP_ROW} wait:3000")).report;
    assert_eq!(reset.phase, Phase::Playing);
    assert_eq!(reset.board, ".../.../...");
    assert_eq!(reset.to_move, Player::X);
    assert_eq!(reset.cursor, Position::TopLeft);
}

#[test]
fn test_tick_length_sets_elapsed_time() {
    let config = HandheldConfig::default().with_tick_ms(25).unwrap();
    let steps = parse_script("h wait:100").unwrap();
    let report = run_script(&steps, &config).report;

    // Initial frame, press, release, then four idle ticks.
    assert_eq!(report.ticks, 7);
    assert_eq!(report.elapsed_ms, 175);
}

#[test]
fn test_report_serializes_outcome() {
    let report = run(X_WINS_TOP_ROW).report;
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["board"], "XXX/OO./...");
    assert_eq!(json["phase"], "Ended");
    assert_eq!(json["outcome"]["Win"]["player"], "X");
}

#[test]
fn test_bad_script_is_rejected() {
    let err = parse_script("p h wait").unwrap_err();
    assert_eq!(err.token, "wait");
}
