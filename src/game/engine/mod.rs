pub mod active_match;
pub mod opponent;
pub mod presenter;
pub mod sequencer;
pub mod settings;

pub use active_match::{ActiveMatch, MatchError};
pub use opponent::{Opponent, RandomOpponent, ScriptedOpponent, choose_opponent_move};
pub use presenter::{Presenter, RoundResolution};
pub use sequencer::{MoveRejected, Scheduled, Transition, TurnSequencer};
pub use settings::{MatchSettings, PhaseTimings};
