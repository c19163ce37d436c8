use rand::seq::IndexedRandom;

use super::{Agent, AgentKind, GameState};
use crate::board::Pos;
use crate::rng::GameRng;

/// Plays a uniformly random empty cell.
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Random
    }

    fn make_move(&mut self, state: &GameState<'_>) -> Option<Pos> {
        state.board.empty_cells().choose(&mut self.rng).copied()
    }
}
