use super::moves::Outcome;
use super::rules::{determine_match_result, is_match_complete};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub opponent: u32,
}

/// Where a round currently is in its timed presentation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    AwaitingInput,
    Revealing,
    Resolved,
    CoolingDown,
    MatchOver,
}

/// Scores and round counter for one match (pure logic, no I/O)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    scores: Scores,
    current_round: u32,
    max_rounds: u32,
}

impl MatchState {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            scores: Scores::default(),
            current_round: 1,
            max_rounds: max_rounds.max(1),
        }
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Player => self.scores.player += 1,
            Outcome::Opponent => self.scores.opponent += 1,
            Outcome::Tie => {}
        }
    }

    pub fn is_complete(&self) -> bool {
        is_match_complete(self.current_round, self.max_rounds)
    }

    /// Move on to the next round. Returns None once the last round has been played.
    pub fn advance_round(&mut self) -> Option<u32> {
        if self.is_complete() {
            return None;
        }
        self.current_round += 1;
        Some(self.current_round)
    }

    pub fn result(&self) -> Outcome {
        determine_match_result(self.scores.player, self.scores.opponent)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_rounds);
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(super::rules::DEFAULT_MAX_ROUNDS)
    }
}
