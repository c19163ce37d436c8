use std::path::PathBuf;

use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::symmetry::CanonicalState;
use super::value_table::{TdParams, ValueTable};
use crate::agent::{Agent, AgentKind, GameState};
use crate::board::{Board, Pos, Stone};
use crate::error::TableError;
use crate::eval::evaluate_noisy;
use crate::rng::GameRng;
use crate::search::ZobristTable;

/// Settings for [`ValueTableAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTableConfig {
    pub td: TdParams,
    /// Chance of a random move; only used while learning
    pub epsilon: f64,
    pub learning: bool,
    /// Where the table is loaded from and saved to
    pub table_path: Option<PathBuf>,
}

impl Default for ValueTableConfig {
    fn default() -> Self {
        Self {
            td: TdParams::default(),
            epsilon: 0.3,
            learning: false,
            table_path: Some(PathBuf::from("trained/q_table.json")),
        }
    }
}

/// The agent's last decision, waiting for the position it led to
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    state: u64,
    mv: Pos,
    color: Stone,
}

/// Reinforcement agent backed by a symmetry-reduced value table.
///
/// Each call first scores the decision made on the previous call against
/// the position that followed it, then picks the empty cell with the
/// highest stored value (random among ties).
pub struct ValueTableAgent {
    config: ValueTableConfig,
    table: ValueTable,
    zobrist: ZobristTable,
    pending: Option<Pending>,
    rng: GameRng,
}

impl ValueTableAgent {
    /// Agent for `board_size` boards, loading the configured table if present.
    pub fn new(config: ValueTableConfig, board_size: usize, rng: GameRng) -> Self {
        let table = match &config.table_path {
            Some(path) => ValueTable::load_or_empty(path, board_size),
            None => ValueTable::new(board_size),
        };
        Self::with_table(config, table, rng)
    }

    pub fn with_table(config: ValueTableConfig, table: ValueTable, rng: GameRng) -> Self {
        let zobrist = ZobristTable::new(table.board_size());
        Self {
            config,
            table,
            zobrist,
            pending: None,
            rng,
        }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn config(&self) -> &ValueTableConfig {
        &self.config
    }

    /// Keep the table and hash keys in step with the board being played.
    fn ensure_board_size(&mut self, size: usize) {
        if self.table.board_size() != size {
            warn!(
                "value table is for {0}x{0} boards, resetting for {1}x{1}",
                self.table.board_size(),
                size
            );
            self.table = ValueTable::new(size);
            self.zobrist = ZobristTable::new(size);
            self.pending = None;
        }
    }

    /// Score the previous decision against `board`, the position it led to.
    fn settle_pending(&mut self, board: &Board) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let reward = f64::from(evaluate_noisy(board, pending.color, &mut self.rng));
        let next = CanonicalState::of(board, &self.zobrist).key;
        let value = self
            .table
            .td_update(pending.state, pending.mv, reward, next, &self.config.td);
        debug!("value update for {}: {value:.3} (reward {reward})", pending.mv);
    }

    /// Opening book: the center, or the first empty cell if it is taken.
    fn opening_move(board: &Board) -> Option<Pos> {
        let center = board.center();
        if board.is_empty(center) {
            Some(center)
        } else {
            board.empty_cells().first().copied()
        }
    }

    fn greedy_move(&mut self, canonical: &CanonicalState, empty: &[Pos]) -> Option<Pos> {
        let initial = self.config.td.initial_value;
        let values: Vec<f64> = empty
            .iter()
            .map(|&pos| {
                self.table
                    .value_or(canonical.key, canonical.to_canonical(pos), initial)
            })
            .collect();
        let best = values.iter().copied().reduce(f64::max)?;
        let tied: Vec<Pos> = empty
            .iter()
            .zip(&values)
            .filter(|&(_, &v)| v == best)
            .map(|(&pos, _)| pos)
            .collect();
        tied.choose(&mut self.rng).copied()
    }
}

impl Agent for ValueTableAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::QLearning
    }

    fn make_move(&mut self, state: &GameState<'_>) -> Option<Pos> {
        let board = state.board;
        let color = state.current_player;
        self.ensure_board_size(board.size());
        self.settle_pending(board);

        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        if board.stones(color).next().is_none() {
            return Self::opening_move(board);
        }

        let canonical = CanonicalState::of(board, &self.zobrist);
        let explore = self.config.learning && self.rng.random::<f64>() < self.config.epsilon;
        let choice = if explore {
            empty.choose(&mut self.rng).copied()
        } else {
            self.greedy_move(&canonical, &empty)
        };
        let mv = choice?;

        self.pending = Some(Pending {
            state: canonical.key,
            mv: canonical.to_canonical(mv),
            color,
        });
        Some(mv)
    }

    fn game_over(&mut self, board: &Board) {
        if board.size() == self.table.board_size() {
            self.settle_pending(board);
        }
        self.pending = None;
    }

    /// Write the table to the configured path. Without a path this does nothing.
    fn save(&self) -> Result<(), TableError> {
        match &self.config.table_path {
            Some(path) => self.table.save(path),
            None => Ok(()),
        }
    }
}
