use super::core::feedback::{self, PROMPT, SoundCue};
use super::core::messages::ServerMessage;
use super::core::{MatchState, Move, Outcome, Scores};
use super::engine::{Presenter, RoundResolution};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Presents a match to a WebSocket client as [`ServerMessage`]s.
///
/// Sound cues are only sent while the shared sound flag is on.
pub struct ClientPresenter {
    tx: broadcast::Sender<ServerMessage>,
    sound_enabled: Arc<AtomicBool>,
}

impl ClientPresenter {
    pub fn new(tx: broadcast::Sender<ServerMessage>, sound_enabled: Arc<AtomicBool>) -> Self {
        Self { tx, sound_enabled }
    }

    fn send(&self, msg: ServerMessage) {
        let _ = self.tx.send(msg);
    }

    fn cue(&self, cue: SoundCue) {
        if self.sound_enabled.load(Ordering::Relaxed) {
            self.send(ServerMessage::PlaySound { cue });
        }
    }
}

impl Presenter for ClientPresenter {
    fn on_moves_revealed(&mut self, player_move: Move, opponent_move: Move) {
        self.cue(SoundCue::Click);
        self.send(ServerMessage::MovesRevealed {
            player_choice: player_move,
            opponent_choice: opponent_move,
        });
    }

    fn on_round_resolved(&mut self, resolution: &RoundResolution) {
        self.send(ServerMessage::RoundResult {
            outcome: resolution.outcome,
            player_choice: resolution.player_move,
            opponent_choice: resolution.opponent_move,
            scores: resolution.scores,
            message: feedback::round_message(
                resolution.outcome,
                resolution.player_move,
                resolution.opponent_move,
            ),
        });
        self.cue(SoundCue::for_round(resolution.outcome));
    }

    fn on_input_enabled(&mut self) {
        self.send(ServerMessage::InputEnabled);
    }

    fn on_round_advanced(&mut self, round: u32) {
        self.send(ServerMessage::RoundStart {
            round,
            message: PROMPT.to_string(),
        });
    }

    fn on_match_over(&mut self, outcome: Outcome, scores: Scores) {
        self.send(ServerMessage::GameEnd {
            outcome,
            scores,
            message: feedback::final_message(outcome).to_string(),
        });
        self.cue(SoundCue::for_match(outcome));
    }

    fn on_match_reset(&mut self, state: &MatchState) {
        self.send(ServerMessage::MatchReset);
        self.on_round_advanced(state.current_round());
    }
}
