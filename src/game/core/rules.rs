use super::moves::Outcome;
use std::cmp::Ordering;

pub const DEFAULT_MAX_ROUNDS: u32 = 5;

/// True once the round just resolved was the last one
pub fn is_match_complete(current_round: u32, max_rounds: u32) -> bool {
    current_round >= max_rounds
}

pub fn determine_match_result(player_score: u32, opponent_score: u32) -> Outcome {
    match player_score.cmp(&opponent_score) {
        Ordering::Greater => Outcome::Player,
        Ordering::Less => Outcome::Opponent,
        Ordering::Equal => Outcome::Tie,
    }
}
