//! Sparse state-action value table with JSON persistence
//!
//! States are canonical keys (see [`super::symmetry`]); moves are stored in
//! the canonical frame of their state. Loading is best-effort: a missing,
//! unreadable, or mismatched file yields an empty table.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::board::Pos;
use crate::error::TableError;

/// Temporal-difference learning parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdParams {
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Value of any state-action pair not yet in the table
    pub initial_value: f64,
}

impl Default for TdParams {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            gamma: 0.9,
            initial_value: 0.1,
        }
    }
}

/// Mapping canonical state key -> move -> value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    board_size: usize,
    entries: HashMap<u64, HashMap<Pos, f64>>,
}

#[derive(Serialize, Deserialize)]
struct StoredMove {
    row: u8,
    col: u8,
    value: f64,
}

#[derive(Serialize, Deserialize)]
struct StoredState {
    state: u64,
    moves: Vec<StoredMove>,
}

#[derive(Serialize, Deserialize)]
struct StoredTable {
    board_size: usize,
    states: Vec<StoredState>,
}

impl ValueTable {
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            entries: HashMap::new(),
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of states with at least one stored move
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, state: u64, mv: Pos) -> Option<f64> {
        self.entries.get(&state).and_then(|moves| moves.get(&mv)).copied()
    }

    pub fn value_or(&self, state: u64, mv: Pos, default: f64) -> f64 {
        self.get(state, mv).unwrap_or(default)
    }

    /// Highest stored value of `state`, if it has any
    pub fn max_value(&self, state: u64) -> Option<f64> {
        self.entries
            .get(&state)?
            .values()
            .copied()
            .reduce(f64::max)
    }

    pub fn set(&mut self, state: u64, mv: Pos, value: f64) {
        self.entries.entry(state).or_default().insert(mv, value);
    }

    /// `Q[s,a] += alpha * (reward + gamma * max Q[s',·] - Q[s,a])`.
    ///
    /// An unseen successor contributes `initial_value`. Returns the new value.
    pub fn td_update(
        &mut self,
        state: u64,
        mv: Pos,
        reward: f64,
        next_state: u64,
        params: &TdParams,
    ) -> f64 {
        let current = self.value_or(state, mv, params.initial_value);
        let future = self.max_value(next_state).unwrap_or(params.initial_value);
        let updated = current + params.alpha * (reward + params.gamma * future - current);
        self.set(state, mv, updated);
        updated
    }

    /// Load the table stored at `path`, or an empty table if that fails.
    pub fn load_or_empty(path: &Path, board_size: usize) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                info!("no value table at {} ({e}), starting fresh", path.display());
                return Self::new(board_size);
            }
        };
        let stored: StoredTable = match serde_json::from_str(&content) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("ignoring unreadable value table {}: {e}", path.display());
                return Self::new(board_size);
            }
        };
        if stored.board_size != board_size {
            warn!(
                "ignoring value table {} for a {}x{} board (playing {board_size}x{board_size})",
                path.display(),
                stored.board_size,
                stored.board_size
            );
            return Self::new(board_size);
        }

        let mut table = Self::new(board_size);
        for state in stored.states {
            for mv in state.moves {
                table.set(state.state, Pos::new(mv.row, mv.col), mv.value);
            }
        }
        info!("loaded value table from {} ({} states)", path.display(), table.len());
        table
    }

    /// Write the table to `path` as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let mut states: Vec<StoredState> = self
            .entries
            .iter()
            .map(|(&state, moves)| {
                let mut moves: Vec<StoredMove> = moves
                    .iter()
                    .map(|(pos, &value)| StoredMove {
                        row: pos.row,
                        col: pos.col,
                        value,
                    })
                    .collect();
                moves.sort_by_key(|m| (m.row, m.col));
                StoredState { state, moves }
            })
            .collect();
        states.sort_by_key(|s| s.state);

        let json = serde_json::to_string(&StoredTable {
            board_size: self.board_size,
            states,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json).map_err(|source| TableError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved value table to {} ({} states)", path.display(), self.len());
        Ok(())
    }
}
