use crate::game::core::Move;
use rand::Rng;

/// Source of the computer's moves
pub trait Opponent: Send + 'static {
    fn choose_move(&mut self) -> Move;
}

/// Implementation for closures
impl<F> Opponent for F
where
    F: FnMut() -> Move + Send + 'static,
{
    fn choose_move(&mut self) -> Move {
        self()
    }
}

/// Pick one of the three moves uniformly at random
pub fn choose_opponent_move() -> Move {
    let index = rand::rng().random_range(0..Move::ALL.len());
    Move::ALL[index]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOpponent;

impl Opponent for RandomOpponent {
    fn choose_move(&mut self) -> Move {
        choose_opponent_move()
    }
}

/// Plays a fixed sequence of moves, wrapping around when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    moves: Vec<Move>,
    next: usize,
}

impl ScriptedOpponent {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves, next: 0 }
    }
}

impl Opponent for ScriptedOpponent {
    fn choose_move(&mut self) -> Move {
        let Some(&mv) = self.moves.get(self.next % self.moves.len().max(1)) else {
            return choose_opponent_move();
        };
        self.next += 1;
        mv
    }
}
