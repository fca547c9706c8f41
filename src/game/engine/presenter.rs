use crate::game::core::{MatchState, Move, Outcome, Scores};

/// A resolved round, as handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResolution {
    pub round: u32,
    pub outcome: Outcome,
    pub player_move: Move,
    pub opponent_move: Move,
    pub scores: Scores,
}

/// Receives a notification at every phase boundary of the turn sequencer.
///
/// Calls arrive in phase order: moves revealed, round resolved, then either
/// match over, or input enabled followed by round advanced.
pub trait Presenter: Send + 'static {
    fn on_moves_revealed(&mut self, _player_move: Move, _opponent_move: Move) {}

    fn on_round_resolved(&mut self, resolution: &RoundResolution);

    fn on_input_enabled(&mut self) {}

    fn on_round_advanced(&mut self, round: u32);

    fn on_match_over(&mut self, outcome: Outcome, scores: Scores);

    fn on_match_reset(&mut self, _state: &MatchState) {}
}
