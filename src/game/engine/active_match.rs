use super::opponent::Opponent;
use super::presenter::Presenter;
use super::sequencer::{MoveRejected, Scheduled, TurnSequencer};
use crate::game::core::Move;
#[cfg(test)]
use crate::game::core::{MatchState, RoundPhase};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("move rejected while {0:?}")]
    Rejected(MoveRejected),
    #[error("match task has stopped")]
    Closed,
}

impl From<MoveRejected> for MatchError {
    fn from(rejected: MoveRejected) -> Self {
        MatchError::Rejected(rejected)
    }
}

/// Phase and state of a running match at one instant
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub phase: RoundPhase,
    pub state: MatchState,
}

enum Command {
    Choose {
        choice: Move,
        reply: oneshot::Sender<Result<(), MoveRejected>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    #[cfg(test)]
    Snapshot {
        reply: oneshot::Sender<MatchSnapshot>,
    },
}

/// Handle to a match running on its own task. Dropping every handle ends the match.
#[derive(Clone)]
pub struct ActiveMatch {
    tx: mpsc::Sender<Command>,
}

impl ActiveMatch {
    /// Spawn the task that owns `sequencer` and drives its timers
    pub fn spawn<O: Opponent, P: Presenter>(sequencer: TurnSequencer<O, P>) -> Self {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(run_match(sequencer, rx));
        Self { tx }
    }

    pub async fn request_player_move(&self, choice: Move) -> Result<(), MatchError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Choose { choice, reply }).await?;
        rx.await.map_err(|_| MatchError::Closed)??;
        Ok(())
    }

    pub async fn reset(&self) -> Result<(), MatchError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Reset { reply }).await?;
        rx.await.map_err(|_| MatchError::Closed)
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Result<MatchSnapshot, MatchError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply }).await?;
        rx.await.map_err(|_| MatchError::Closed)
    }

    async fn send(&self, cmd: Command) -> Result<(), MatchError> {
        self.tx.send(cmd).await.map_err(|_| MatchError::Closed)
    }
}

/// A scheduled transition pinned to a point in time
#[derive(Clone, Copy)]
struct Timer {
    scheduled: Scheduled,
    deadline: Instant,
}

impl From<Scheduled> for Timer {
    fn from(scheduled: Scheduled) -> Self {
        Self {
            scheduled,
            deadline: Instant::now() + scheduled.delay,
        }
    }
}

async fn run_match<O: Opponent, P: Presenter>(
    mut sequencer: TurnSequencer<O, P>,
    mut rx: mpsc::Receiver<Command>,
) {
    // At most one transition is ever in flight; replacing it cancels the old one
    let mut timer: Option<Timer> = None;

    loop {
        let deadline = timer.map(|t| t.deadline);

        tokio::select! {
            cmd = rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                match cmd {
                    Command::Choose { choice, reply } => {
                        let result = match sequencer.request_player_move(choice) {
                            Ok(scheduled) => {
                                timer = Some(scheduled.into());
                                Ok(())
                            }
                            Err(rejected) => Err(rejected),
                        };
                        let _ = reply.send(result);
                    }
                    Command::Reset { reply } => {
                        sequencer.reset();
                        timer = None;
                        let _ = reply.send(());
                    }
                    #[cfg(test)]
                    Command::Snapshot { reply } => {
                        let _ = reply.send(MatchSnapshot {
                            phase: sequencer.phase(),
                            state: sequencer.state().clone(),
                        });
                    }
                }
            }
            _ = wait_for(deadline) => {
                if let Some(fired) = timer.take() {
                    debug!(transition = ?fired.scheduled.transition, "Timer fired");
                    timer = sequencer.fire(fired.scheduled).map(Timer::from);
                }
            }
        }
    }

    info!(
        round = sequencer.state().current_round(),
        phase = ?sequencer.phase(),
        "Match task stopped"
    );
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
