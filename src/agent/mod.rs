//! Agent contract shared by every strategy
//!
//! A turn driver hands each agent a read-only [`GameState`] and gets back a
//! move, or `None` when no legal move exists. Agents never mutate the
//! caller's board; searches work on private copies.

pub mod factory;
pub mod random;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::error::{ConfigError, TableError};

pub use factory::{build_agent, AgentSpec};
pub use random::RandomAgent;

/// Snapshot handed to an agent for one decision
#[derive(Debug, Clone, Copy)]
pub struct GameState<'a> {
    pub board: &'a Board,
    /// Color the agent plays this turn
    pub current_player: Stone,
    /// Strategy of the other side, when the driver knows it
    pub opponent: Option<AgentKind>,
}

impl<'a> GameState<'a> {
    pub fn new(board: &'a Board, current_player: Stone) -> Self {
        Self {
            board,
            current_player,
            opponent: None,
        }
    }

    pub fn with_opponent(mut self, opponent: AgentKind) -> Self {
        self.opponent = Some(opponent);
        self
    }
}

/// Strategy identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Minimax,
    AlphaBeta,
    Expectimax,
    MultiAStar,
    Mcts,
    QLearning,
}

impl AgentKind {
    pub const ALL: [AgentKind; 7] = [
        AgentKind::Random,
        AgentKind::Minimax,
        AgentKind::AlphaBeta,
        AgentKind::Expectimax,
        AgentKind::MultiAStar,
        AgentKind::Mcts,
        AgentKind::QLearning,
    ];

    /// Configuration name, as accepted by [`FromStr`]
    pub fn key(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alphabeta",
            AgentKind::Expectimax => "expectimax",
            AgentKind::MultiAStar => "multiastar",
            AgentKind::Mcts => "mcts",
            AgentKind::QLearning => "qlearning",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Random => "Random",
            AgentKind::Minimax => "Minimax",
            AgentKind::AlphaBeta => "AlphaBeta",
            AgentKind::Expectimax => "Expectimax",
            AgentKind::MultiAStar => "StarMultiHeuristic",
            AgentKind::Mcts => "MCTS",
            AgentKind::QLearning => "QLearning",
        };
        f.write_str(name)
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| ConfigError::UnknownAgent(s.to_string()))
    }
}

/// A move-producing strategy.
pub trait Agent {
    /// Strategy identifier
    fn kind(&self) -> AgentKind;

    /// Choose a move for `state.current_player`, or `None` when the board
    /// has no empty cell.
    fn make_move(&mut self, state: &GameState<'_>) -> Option<Pos>;

    /// Called once with the final board when a game ends.
    fn game_over(&mut self, _board: &Board) {}

    /// Persist anything learned during play. Stateless agents have nothing to save.
    fn save(&self) -> Result<(), TableError> {
        Ok(())
    }
}
