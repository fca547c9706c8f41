use super::feedback::SoundCue;
use super::moves::{Move, Outcome};
use super::session::{RoundPhase, Scores};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        user_id: Option<String>,
    },
    Choose {
        choice: Move,
    },
    PlayAgain,
    ToggleSound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        user_id: String,
        max_rounds: u32,
        sound_enabled: bool,
    },
    RoundStart {
        round: u32,
        message: String,
    },
    MovesRevealed {
        player_choice: Move,
        opponent_choice: Move,
    },
    RoundResult {
        outcome: Outcome,
        player_choice: Move,
        opponent_choice: Move,
        scores: Scores,
        message: String,
    },
    InputEnabled,
    GameEnd {
        outcome: Outcome,
        scores: Scores,
        message: String,
    },
    MatchReset,
    SoundPreference {
        enabled: bool,
    },
    PlaySound {
        cue: SoundCue,
    },
    MoveRejected {
        phase: RoundPhase,
    },
    Error {
        message: String,
    },
}
