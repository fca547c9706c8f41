//! What the player sees and hears at each step of a match.

use super::moves::{Move, Outcome};
use serde::{Deserialize, Serialize};

pub const PROMPT: &str = "Make your choice!";

/// Named sound effects; the client owns the actual audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Click,
    Win,
    Lose,
    Tie,
    Victory,
    Defeat,
    Draw,
}

impl SoundCue {
    pub fn for_round(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Player => SoundCue::Win,
            Outcome::Opponent => SoundCue::Lose,
            Outcome::Tie => SoundCue::Tie,
        }
    }

    pub fn for_match(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Player => SoundCue::Victory,
            Outcome::Opponent => SoundCue::Defeat,
            Outcome::Tie => SoundCue::Draw,
        }
    }
}

pub fn round_message(outcome: Outcome, player: Move, opponent: Move) -> String {
    match outcome {
        Outcome::Player => format!(
            "You win this round! {} beats {}",
            player.emoji(),
            opponent.emoji()
        ),
        Outcome::Opponent => format!(
            "Computer wins this round! {} beats {}",
            opponent.emoji(),
            player.emoji()
        ),
        Outcome::Tie => format!("It's a tie! Both chose {}", player.emoji()),
    }
}

pub fn final_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Player => "Congratulations! You Won The Game!",
        Outcome::Opponent => "Game Over! Computer Wins The Game!",
        Outcome::Tie => "It's a Tie Game! Try Again!",
    }
}
