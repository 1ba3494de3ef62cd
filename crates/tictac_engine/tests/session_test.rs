//! Tests for the session event surface and its deferred actions.

use std::time::Duration;
use tictac_engine::{
    GameStatus, Mode, Player, Session, SessionConfig, Speaker, DEFAULT_COMPUTER_DELAY,
};

fn computer_session(seed: u64) -> Session {
    Session::new(SessionConfig {
        mode: Mode::HumanVsComputer,
        seed: Some(seed),
        ..SessionConfig::default()
    })
}

/// Plays the lowest free cell for X and lets the computer answer, until the game ends.
fn play_out(session: &mut Session) {
    while !session.game().is_over() {
        let cell = session
            .game()
            .board()
            .squares()
            .iter()
            .position(|s| s.player().is_none())
            .expect("game not over, so a cell is free");
        session.apply_move(cell).expect("legal move");
        session.advance_by(DEFAULT_COMPUTER_DELAY);
    }
}

#[test]
fn test_computer_games_always_finish_and_score() {
    for seed in 0..20 {
        let mut session = computer_session(seed);
        play_out(&mut session);
        let scores = session.game().scores();
        assert_eq!(scores.x_wins() + scores.o_wins() + scores.draws(), 1);
    }
}

#[test]
fn test_computer_never_loses_to_naive_play() {
    for seed in 0..20 {
        let mut session = computer_session(seed);
        play_out(&mut session);
        assert_ne!(session.game().status(), GameStatus::Won(Player::X));
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = computer_session(42);
    let mut b = computer_session(42);
    play_out(&mut a);
    play_out(&mut b);
    assert_eq!(a.game().board(), b.game().board());
}

#[test]
fn test_computer_opens_when_o_starts() {
    let mut session = computer_session(5);
    session.new_game();
    assert_eq!(session.game().starting_player(), Player::O);
    assert!(session.computer_pending());

    session.advance_by(DEFAULT_COMPUTER_DELAY);
    assert_eq!(session.game().board().occupied(), 1);
    assert_eq!(session.game().active_player(), Player::X);
}

#[test]
fn test_new_game_during_delay_prevents_double_move() {
    let mut session = computer_session(9);
    session.apply_move(4).expect("legal move");
    session.advance_by(Duration::from_millis(200));
    session.new_game();
    session.new_game();
    // Back to X starting; the queued move from the first game must not fire.
    assert_eq!(session.game().starting_player(), Player::X);
    session.advance_by(Duration::from_secs(5));
    assert_eq!(session.game().board().occupied(), 0);
}

#[test]
fn test_hint_uses_state_at_reply_time() {
    let mut session = Session::default();
    session.send_assistant_message("hint for my move");
    session.apply_move(4).expect("legal move");
    session.advance_by(Duration::from_secs(1));

    let reply = session.transcript().last().expect("reply");
    assert_eq!(reply.speaker, Speaker::Assistant);
    // O to move after X took the center: first free corner is cell 1.
    assert!(reply.text.contains("cell 1"), "{}", reply.text);
}

#[test]
fn test_rewind_reschedules_computer_move() {
    let mut session = computer_session(11);
    session.apply_move(0).expect("legal move");
    session.advance_by(DEFAULT_COMPUTER_DELAY);
    assert_eq!(session.game().history().len(), 3);
    session.apply_move(8).expect("legal move");
    assert!(session.computer_pending());

    // Back to X's turn: the queued reply is dropped.
    session.jump_to(2).expect("step exists");
    assert!(!session.computer_pending());
    assert_eq!(session.game().active_player(), Player::X);
    session.advance_by(Duration::from_secs(5));
    assert_eq!(session.game().board().occupied(), 2);

    // Back to O's turn: a fresh computer move is queued and played.
    session.jump_to(1).expect("step exists");
    assert!(session.computer_pending());
    assert_eq!(session.game().active_player(), Player::O);
    session.advance_by(DEFAULT_COMPUTER_DELAY);
    assert!(!session.computer_pending());
    assert_eq!(session.game().board().occupied(), 2);
    assert_eq!(session.game().history().len(), 3);
    assert_eq!(session.game().active_player(), Player::X);
}

#[test]
fn test_rewind_to_unknown_step_keeps_state() {
    let mut session = computer_session(3);
    session.apply_move(4).expect("legal move");
    assert!(session.jump_to(7).is_err());
    assert!(session.computer_pending());
    assert_eq!(session.game().board().occupied(), 1);
}

#[test]
fn test_view_serializes_to_json() {
    let mut session = Session::default();
    session.apply_move(0).expect("legal move");
    let json = serde_json::to_value(session.view()).expect("view serializes");
    assert_eq!(json["mode"], "human-vs-human");
    assert_eq!(json["cells"][0], "X");
    assert_eq!(json["active_player"], "O");
    assert_eq!(json["history_len"], 2);
}
