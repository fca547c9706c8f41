pub mod feedback;
pub mod messages;
pub mod moves;
pub mod rules;
pub mod session;

pub use moves::{Move, Outcome, resolve};
pub use rules::{DEFAULT_MAX_ROUNDS, determine_match_result, is_match_complete};
pub use session::{MatchState, RoundPhase, Scores};
