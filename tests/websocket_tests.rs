mod common;

use common::*;
use futures_util::SinkExt;
use rochambeau::game::core::feedback::SoundCue;
use rochambeau::game::core::{Move, Outcome, RoundPhase, Scores, resolve};
use rochambeau::messages::ServerMessage;

/// Join and consume the welcome + first round prompt. Returns the welcome's sound flag.
async fn join(ws: &mut WsStream, user_id: Option<&str>) -> bool {
    ws.send(join_msg(user_id)).await.unwrap();

    let sound_enabled = match recv(ws).await {
        ServerMessage::Welcome { sound_enabled, .. } => sound_enabled,
        other => panic!("Expected Welcome, got {:?}", other),
    };
    assert!(matches!(recv(ws).await, ServerMessage::RoundStart { round: 1, .. }));
    sound_enabled
}

/// Join with sound turned off so only phase messages arrive
async fn join_muted(ws: &mut WsStream) {
    if join(ws, None).await {
        ws.send(toggle_sound_msg()).await.unwrap();
        assert_eq!(
            recv(ws).await,
            ServerMessage::SoundPreference { enabled: false }
        );
    }
}

#[tokio::test]
async fn join_gets_welcome_and_first_round() {
    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;

    ws.send(join_msg(Some("alice"))).await.unwrap();

    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::Welcome {
            user_id: "alice".to_string(),
            max_rounds: 5,
            sound_enabled: true,
        }
    );
    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::RoundStart {
            round: 1,
            message: "Make your choice!".to_string(),
        }
    );
}

#[tokio::test]
async fn anonymous_players_get_an_id() {
    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;

    ws.send(join_msg(None)).await.unwrap();

    match recv(&mut ws).await {
        ServerMessage::Welcome { user_id, .. } => assert!(!user_id.is_empty()),
        other => panic!("Expected Welcome, got {:?}", other),
    }
}

#[tokio::test]
async fn round_phases_arrive_in_order() {
    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;
    join_muted(&mut ws).await;

    ws.send(choose_msg(Move::Rock)).await.unwrap();

    let opponent_choice = match recv(&mut ws).await {
        ServerMessage::MovesRevealed {
            player_choice,
            opponent_choice,
        } => {
            assert_eq!(player_choice, Move::Rock);
            opponent_choice
        }
        other => panic!("Expected MovesRevealed, got {:?}", other),
    };

    match recv(&mut ws).await {
        ServerMessage::RoundResult {
            outcome,
            player_choice,
            opponent_choice: shown,
            scores,
            ..
        } => {
            assert_eq!(player_choice, Move::Rock);
            assert_eq!(shown, opponent_choice);
            assert_eq!(outcome, resolve(Move::Rock, opponent_choice));
            let expected = match outcome {
                Outcome::Player => Scores { player: 1, opponent: 0 },
                Outcome::Opponent => Scores { player: 0, opponent: 1 },
                Outcome::Tie => Scores::default(),
            };
            assert_eq!(scores, expected);
        }
        other => panic!("Expected RoundResult, got {:?}", other),
    }

    assert_eq!(recv(&mut ws).await, ServerMessage::InputEnabled);
    assert!(matches!(recv(&mut ws).await, ServerMessage::RoundStart { round: 2, .. }));
}

#[tokio::test]
async fn second_choice_during_round_is_rejected() {
    let settings = rochambeau::game::engine::MatchSettings {
        max_rounds: 5,
        timings: rochambeau::game::engine::PhaseTimings::uniform(std::time::Duration::from_millis(200)),
    };
    let server = spawn_test_server_with_settings(settings).await;
    let mut ws = connect(&server).await;
    join_muted(&mut ws).await;

    ws.send(choose_msg(Move::Paper)).await.unwrap();
    ws.send(choose_msg(Move::Scissors)).await.unwrap();

    assert!(matches!(recv(&mut ws).await, ServerMessage::MovesRevealed { .. }));

    // Exactly one round is scored; the second choice is rejected somewhere in the sequence
    let mut results = 0;
    let mut rejected = 0;
    loop {
        match recv(&mut ws).await {
            ServerMessage::RoundResult { .. } => results += 1,
            ServerMessage::MoveRejected { phase } => {
                assert_ne!(phase, RoundPhase::AwaitingInput);
                rejected += 1;
            }
            ServerMessage::RoundStart { round: 2, .. } => break,
            _ => {}
        }
    }

    assert_eq!(results, 1);
    assert_eq!(rejected, 1);
}

/// Play one round and read messages until the next round starts or the match ends.
/// Returns the round outcome and, for the last round, the final summary.
async fn play_round(ws: &mut WsStream, choice: Move) -> (Outcome, Option<(Outcome, Scores)>) {
    ws.send(choose_msg(choice)).await.unwrap();

    let mut round_outcome = None;
    loop {
        match recv(ws).await {
            ServerMessage::RoundResult { outcome, .. } => round_outcome = Some(outcome),
            ServerMessage::RoundStart { .. } => {
                return (round_outcome.expect("RoundResult before RoundStart"), None);
            }
            ServerMessage::GameEnd { outcome, scores, .. } => {
                let round_outcome = round_outcome.expect("RoundResult before GameEnd");
                return (round_outcome, Some((outcome, scores)));
            }
            _ => {}
        }
    }
}

#[tokio::test]
async fn full_match_ends_with_summary_matching_the_rounds() {
    let server = spawn_test_server_with_settings(fast_settings(3)).await;
    let mut ws = connect(&server).await;
    join_muted(&mut ws).await;

    let mut tally = Scores::default();
    for round in 1..=3 {
        let (outcome, summary) = play_round(&mut ws, Move::Paper).await;
        match outcome {
            Outcome::Player => tally.player += 1,
            Outcome::Opponent => tally.opponent += 1,
            Outcome::Tie => {}
        }

        if round < 3 {
            assert!(summary.is_none());
            continue;
        }

        let (match_outcome, scores) = summary.expect("last round ends the match");
        assert_eq!(scores, tally);
        assert_eq!(
            match_outcome,
            rochambeau::game::core::determine_match_result(tally.player, tally.opponent)
        );
    }

    // No more input until play again
    ws.send(choose_msg(Move::Rock)).await.unwrap();
    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::MoveRejected {
            phase: RoundPhase::MatchOver
        }
    );
}

#[tokio::test]
async fn play_again_restarts_from_round_one() {
    let server = spawn_test_server_with_settings(fast_settings(1)).await;
    let mut ws = connect(&server).await;
    join_muted(&mut ws).await;

    let (_, summary) = play_round(&mut ws, Move::Rock).await;
    assert!(summary.is_some());

    ws.send(play_again_msg()).await.unwrap();
    assert_eq!(recv(&mut ws).await, ServerMessage::MatchReset);
    assert!(matches!(recv(&mut ws).await, ServerMessage::RoundStart { round: 1, .. }));

    // A fresh round is accepted and scored from zero
    ws.send(choose_msg(Move::Scissors)).await.unwrap();
    assert!(matches!(recv(&mut ws).await, ServerMessage::MovesRevealed { .. }));
    match recv(&mut ws).await {
        ServerMessage::RoundResult { scores, .. } => {
            assert!(scores.player + scores.opponent <= 1);
        }
        other => panic!("Expected RoundResult, got {:?}", other),
    }
}

#[tokio::test]
async fn sound_cues_follow_the_round() {
    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;
    assert!(join(&mut ws, Some("carol")).await);

    ws.send(choose_msg(Move::Rock)).await.unwrap();

    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::PlaySound {
            cue: SoundCue::Click
        }
    );
    assert!(matches!(recv(&mut ws).await, ServerMessage::MovesRevealed { .. }));
    let outcome = match recv(&mut ws).await {
        ServerMessage::RoundResult { outcome, .. } => outcome,
        other => panic!("Expected RoundResult, got {:?}", other),
    };
    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::PlaySound {
            cue: SoundCue::for_round(outcome)
        }
    );
}

#[tokio::test]
async fn sound_preference_survives_reconnect() {
    let server = spawn_test_server().await;

    let mut ws = connect(&server).await;
    assert!(join(&mut ws, Some("dave")).await);
    ws.send(toggle_sound_msg()).await.unwrap();
    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::SoundPreference { enabled: false }
    );
    ws.close(None).await.unwrap();

    let mut ws = connect(&server).await;
    assert!(!join(&mut ws, Some("dave")).await);

    // Another player keeps the default
    let mut other = connect(&server).await;
    assert!(join(&mut other, Some("erin")).await);
}

#[tokio::test]
async fn choosing_before_join_is_an_error() {
    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;

    ws.send(choose_msg(Move::Rock)).await.unwrap();

    assert!(matches!(recv(&mut ws).await, ServerMessage::Error { .. }));
}

#[tokio::test]
async fn unknown_move_is_an_error() {
    use tokio_tungstenite::tungstenite::Message;

    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;
    join_muted(&mut ws).await;

    let raw = r#"{"type": "choose", "choice": "lizard"}"#;
    ws.send(Message::Text(raw.to_string().into())).await.unwrap();

    assert!(matches!(recv(&mut ws).await, ServerMessage::Error { .. }));
}

#[tokio::test]
async fn joining_twice_is_an_error() {
    let server = spawn_test_server().await;
    let mut ws = connect(&server).await;
    join_muted(&mut ws).await;

    ws.send(join_msg(Some("again"))).await.unwrap();

    assert!(matches!(recv(&mut ws).await, ServerMessage::Error { .. }));
}
