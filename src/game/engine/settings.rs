use crate::game::core::DEFAULT_MAX_ROUNDS;
use std::time::Duration;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_GAME_OVER_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_ENABLE_INPUT_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_CLEAR_BOARD_DELAY: Duration = Duration::from_millis(1000);

/// Delays between the presentation phases of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Moves shown -> result shown
    pub reveal: Duration,
    /// Last result shown -> final summary
    pub game_over: Duration,
    /// Result shown -> input re-enabled
    pub enable_input: Duration,
    /// Input re-enabled -> board cleared and next round started
    pub clear_board: Duration,
}

impl PhaseTimings {
    pub fn uniform(delay: Duration) -> Self {
        Self {
            reveal: delay,
            game_over: delay,
            enable_input: delay,
            clear_board: delay,
        }
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            reveal: DEFAULT_REVEAL_DELAY,
            game_over: DEFAULT_GAME_OVER_DELAY,
            enable_input: DEFAULT_ENABLE_INPUT_DELAY,
            clear_board: DEFAULT_CLEAR_BOARD_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub max_rounds: u32,
    pub timings: PhaseTimings,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            timings: PhaseTimings::default(),
        }
    }
}
