//! Search strategies for Gomoku agents
//!
//! Contains:
//! - Candidate move generation (border, bounding box, scored top-k)
//! - Minimax, Alpha-Beta and Expectimax over all empty cells
//! - Multi-heuristic best-first search
//! - Monte Carlo Tree Search
//! - Zobrist hashing for position identification

pub mod best_first;
pub mod candidates;
pub mod mcts;
pub mod minimax;
pub mod zobrist;

pub use best_first::{best_first_search, BestFirstResult, Heuristic, HeuristicRotation, MultiHeuristicAgent};
pub use candidates::{border_cells, bounding_box, scored_top_k, MAX_CANDIDATES};
pub use mcts::{MctsAgent, MctsConfig, SearchTree};
pub use minimax::{SearchKind, SearchResult, Searcher, TreeSearchAgent};
pub use zobrist::ZobristTable;
