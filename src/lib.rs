//! Search-based Gomoku agents
//!
//! Interchangeable agents for five-in-a-row on an N×N board:
//! - Minimax, Alpha-Beta and Expectimax over every empty cell
//! - Multi-heuristic best-first search
//! - Monte Carlo Tree Search
//! - A value-table learner keyed on symmetry-reduced positions
//! - A uniform random baseline
//!
//! # Architecture
//!
//! - [`board`]: size-parametric board backed by bitboards
//! - [`rules`]: five-in-a-row detection
//! - [`eval`]: line-pattern heuristic shared by every agent
//! - [`search`]: candidate generation and the search strategies
//! - [`learning`]: canonicalization, value table and learning agent
//! - [`agent`]: the [`Agent`] contract and the declarative factory
//! - [`game`]: headless turn driver
//! - [`config`]: TOML match configuration
//!
//! # Quick Start
//!
//! ```
//! use gomoku::agent::{build_agent, Agent, AgentSpec, GameState};
//! use gomoku::{Board, Pos, Stone};
//!
//! let mut board = Board::new(9);
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! let spec = AgentSpec { depth: Some(1), ..AgentSpec::of("alphabeta") };
//! let mut agent = build_agent(&spec, 9, Some(7)).unwrap();
//! let mv = agent.make_move(&GameState::new(&board, Stone::White)).unwrap();
//! assert!(board.place_stone(mv, Stone::White));
//! ```
//!
//! # Randomness
//!
//! Every stochastic choice draws from a generator owned by the agent (see
//! [`rng`]); a fixed seed replays a game exactly.

pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod learning;
pub mod rng;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use agent::{Agent, AgentKind, GameState};
pub use board::{Board, Pos, Stone};
pub use error::{ConfigError, TableError};
pub use game::{GameRecord, Match, Winner};
