//! Depth-limited game tree search: Minimax, Alpha-Beta, and Expectimax
//!
//! All three share one skeleton. Each ply enumerates every empty cell (no
//! candidate reduction), plays it on a private copy of the board, and
//! recurses until the depth limit or a full board, where the position is
//! scored with [`evaluate_state`] from the searching color's perspective.
//!
//! - **Minimax**: the opponent ply minimizes.
//! - **Alpha-Beta**: Minimax with α/β bounds; prunes branches that cannot
//!   change the result, so it returns the same move and score as Minimax.
//! - **Expectimax**: the opponent ply averages its children uniformly.
//!
//! Ties keep the first move seen in row-major order.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::{SearchKind, Searcher};
//!
//! let mut board = Board::new(7);
//! board.place_stone(Pos::new(3, 3), Stone::Black);
//!
//! let mut searcher = Searcher::new(SearchKind::AlphaBeta, Stone::White, 1);
//! let result = searcher.search(&board);
//! assert!(result.best_move.is_some());
//! ```

use log::debug;

use crate::agent::{Agent, AgentKind, GameState};
use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate_state;

/// Which opponent model the search uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Minimax,
    AlphaBeta,
    Expectimax,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Backed-up value of the root position
    pub score: f64,
    /// Total nodes visited
    pub nodes: u64,
}

/// Depth-limited searcher for one color
pub struct Searcher {
    kind: SearchKind,
    color: Stone,
    max_depth: u8,
    nodes: u64,
}

impl Searcher {
    pub fn new(kind: SearchKind, color: Stone, max_depth: u8) -> Self {
        Self {
            kind,
            color,
            max_depth,
            nodes: 0,
        }
    }

    /// Search `board` with `color` to move.
    ///
    /// `best_move` is `None` when the board is full or the depth limit is 0.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        self.nodes = 0;
        let (score, best_move) = match self.kind {
            SearchKind::Minimax => self.minimax(board, 0, true),
            SearchKind::AlphaBeta => {
                self.alpha_beta(board, 0, true, f64::NEG_INFINITY, f64::INFINITY)
            }
            SearchKind::Expectimax => self.expectimax(board, 0, true),
        };
        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    #[inline]
    fn side(&self, maximizing: bool) -> Stone {
        if maximizing {
            self.color
        } else {
            self.color.opponent()
        }
    }

    /// Shared terminal test: returns the legal moves, or `None` at a leaf.
    fn expand(&mut self, board: &Board, depth: u8) -> Option<Vec<Pos>> {
        self.nodes += 1;
        let moves = board.empty_cells();
        if depth >= self.max_depth || moves.is_empty() {
            None
        } else {
            Some(moves)
        }
    }

    #[inline]
    fn leaf(&self, board: &Board) -> f64 {
        f64::from(evaluate_state(board, self.color))
    }

    fn minimax(&mut self, board: &Board, depth: u8, maximizing: bool) -> (f64, Option<Pos>) {
        let Some(moves) = self.expand(board, depth) else {
            return (self.leaf(board), None);
        };

        let stone = self.side(maximizing);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;
        for mv in moves {
            let child = play(board, mv, stone);
            let (score, _) = self.minimax(&child, depth + 1, !maximizing);
            if (maximizing && score > best) || (!maximizing && score < best) {
                best = score;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> (f64, Option<Pos>) {
        let Some(moves) = self.expand(board, depth) else {
            return (self.leaf(board), None);
        };

        let stone = self.side(maximizing);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;
        for mv in moves {
            let child = play(board, mv, stone);
            let (score, _) = self.alpha_beta(&child, depth + 1, !maximizing, alpha, beta);
            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        (best, best_move)
    }

    #[allow(clippy::cast_precision_loss)]
    fn expectimax(&mut self, board: &Board, depth: u8, maximizing: bool) -> (f64, Option<Pos>) {
        let Some(moves) = self.expand(board, depth) else {
            return (self.leaf(board), None);
        };

        let stone = self.side(maximizing);
        if !maximizing {
            // Chance ply: the opponent is assumed to pick uniformly
            let count = moves.len() as f64;
            let mut total = 0.0;
            for mv in moves {
                let child = play(board, mv, stone);
                total += self.expectimax(&child, depth + 1, true).0;
            }
            return (total / count, None);
        }

        let mut best = f64::NEG_INFINITY;
        let mut best_move = None;
        for mv in moves {
            let child = play(board, mv, stone);
            let (score, _) = self.expectimax(&child, depth + 1, false);
            if score > best {
                best = score;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }
}

/// Copy of `board` with `stone` placed at `mv`
#[inline]
fn play(board: &Board, mv: Pos, stone: Stone) -> Board {
    let mut child = board.clone();
    child.place_stone(mv, stone);
    child
}

/// Agent wrapping a [`Searcher`] of a fixed kind and depth.
pub struct TreeSearchAgent {
    kind: SearchKind,
    depth: u8,
}

impl TreeSearchAgent {
    /// Depth is at least 1 so that a move is always produced on a non-full board.
    pub fn new(kind: SearchKind, depth: u8) -> Self {
        Self {
            kind,
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Agent for TreeSearchAgent {
    fn kind(&self) -> AgentKind {
        match self.kind {
            SearchKind::Minimax => AgentKind::Minimax,
            SearchKind::AlphaBeta => AgentKind::AlphaBeta,
            SearchKind::Expectimax => AgentKind::Expectimax,
        }
    }

    fn make_move(&mut self, state: &GameState<'_>) -> Option<Pos> {
        if state.board.is_full() {
            return None;
        }
        let mut searcher = Searcher::new(self.kind, state.current_player, self.depth);
        let result = searcher.search(state.board);
        debug!(
            "{:?} depth {} chose {:?} (score {}, {} nodes)",
            self.kind, self.depth, result.best_move, result.score, result.nodes
        );
        result.best_move
    }
}
