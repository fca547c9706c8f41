use super::opponent::Opponent;
use super::presenter::{Presenter, RoundResolution};
use super::settings::{MatchSettings, PhaseTimings};
use crate::game::core::{MatchState, Move, RoundPhase, resolve};
use std::time::Duration;
use tracing::{debug, info};

/// A delayed step of the round sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// revealing -> resolved
    Resolve,
    /// resolved -> match over
    FinishMatch,
    /// cooling down: input buttons come back
    EnableInput,
    /// cooling down -> awaiting input for the next round
    NextRound,
}

/// A transition the caller must fire once `delay` has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub transition: Transition,
    pub delay: Duration,
    /// Which scheduling this came from; bumped by every schedule and reset
    pub generation: u64,
}

/// A move arrived while the sequencer was not awaiting input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRejected {
    pub phase: RoundPhase,
}

/// Round engine and turn sequencer for a single match.
///
/// Owns the match state exclusively. Time is not handled here: every call
/// that starts a delay returns a [`Scheduled`] transition which the owner
/// fires with [`TurnSequencer::fire`] when the delay elapses. Only the most
/// recently scheduled transition is honoured: a timer left over from an
/// earlier round or from before a reset carries an older generation and is
/// dropped, even when its transition kind matches the pending one.
pub struct TurnSequencer<O, P> {
    state: MatchState,
    phase: RoundPhase,
    pending: Option<Transition>,
    generation: u64,
    revealed: Option<(Move, Move)>,
    timings: PhaseTimings,
    opponent: O,
    presenter: P,
}

impl<O: Opponent, P: Presenter> TurnSequencer<O, P> {
    pub fn new(settings: MatchSettings, opponent: O, presenter: P) -> Self {
        Self {
            state: MatchState::new(settings.max_rounds),
            phase: RoundPhase::AwaitingInput,
            pending: None,
            generation: 0,
            revealed: None,
            timings: settings.timings,
            opponent,
            presenter,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn pending(&self) -> Option<Transition> {
        self.pending
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Start a round with the player's move. Only accepted while awaiting input.
    pub fn request_player_move(&mut self, player_move: Move) -> Result<Scheduled, MoveRejected> {
        if self.phase != RoundPhase::AwaitingInput {
            debug!(phase = ?self.phase, ?player_move, "Ignoring move outside of input phase");
            return Err(MoveRejected { phase: self.phase });
        }

        let opponent_move = self.opponent.choose_move();
        debug!(
            round = self.state.current_round(),
            ?player_move,
            ?opponent_move,
            "Moves revealed"
        );

        self.revealed = Some((player_move, opponent_move));
        self.phase = RoundPhase::Revealing;
        self.presenter.on_moves_revealed(player_move, opponent_move);

        Ok(self.schedule(Transition::Resolve, self.timings.reveal))
    }

    /// Fire a previously scheduled transition. Returns the follow-up, if any.
    pub fn fire(&mut self, scheduled: Scheduled) -> Option<Scheduled> {
        if self.pending != Some(scheduled.transition) || scheduled.generation != self.generation {
            debug!(
                transition = ?scheduled.transition,
                generation = scheduled.generation,
                pending = ?self.pending,
                current = self.generation,
                "Dropping stale transition"
            );
            return None;
        }
        self.pending = None;

        match scheduled.transition {
            Transition::Resolve => self.resolve_round(),
            Transition::FinishMatch => {
                self.finish_match();
                None
            }
            Transition::EnableInput => {
                self.presenter.on_input_enabled();
                Some(self.schedule(Transition::NextRound, self.timings.clear_board))
            }
            Transition::NextRound => {
                self.start_next_round();
                None
            }
        }
    }

    /// Start over from round 1. Valid from any phase; cancels whatever was pending.
    pub fn reset(&mut self) {
        info!(
            phase = ?self.phase,
            round = self.state.current_round(),
            "Match reset"
        );
        self.state.reset();
        self.phase = RoundPhase::AwaitingInput;
        self.pending = None;
        self.generation += 1;
        self.revealed = None;
        self.presenter.on_match_reset(&self.state);
    }

    fn schedule(&mut self, transition: Transition, delay: Duration) -> Scheduled {
        self.generation += 1;
        self.pending = Some(transition);
        Scheduled {
            transition,
            delay,
            generation: self.generation,
        }
    }

    fn resolve_round(&mut self) -> Option<Scheduled> {
        let (player_move, opponent_move) = self.revealed.take()?;
        let outcome = resolve(player_move, opponent_move);
        self.state.record(outcome);
        self.phase = RoundPhase::Resolved;

        let resolution = RoundResolution {
            round: self.state.current_round(),
            outcome,
            player_move,
            opponent_move,
            scores: self.state.scores(),
        };
        info!(
            round = resolution.round,
            ?outcome,
            scores = ?resolution.scores,
            "Round resolved"
        );
        self.presenter.on_round_resolved(&resolution);

        if self.state.is_complete() {
            Some(self.schedule(Transition::FinishMatch, self.timings.game_over))
        } else {
            self.phase = RoundPhase::CoolingDown;
            Some(self.schedule(Transition::EnableInput, self.timings.enable_input))
        }
    }

    fn finish_match(&mut self) {
        let outcome = self.state.result();
        let scores = self.state.scores();
        self.phase = RoundPhase::MatchOver;

        info!(?outcome, ?scores, "Match over");
        self.presenter.on_match_over(outcome, scores);
    }

    fn start_next_round(&mut self) {
        let Some(round) = self.state.advance_round() else {
            return;
        };
        self.phase = RoundPhase::AwaitingInput;

        debug!(round, "Next round");
        self.presenter.on_round_advanced(round);
    }
}
