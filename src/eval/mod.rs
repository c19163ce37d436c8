//! Evaluation module for Gomoku positions
//!
//! This module provides line-pattern scoring for board positions:
//! - Run scoring by length, blocked ends, and gaps (`patterns`)
//! - Line, color, and whole-board evaluation (`heuristic`)
//! - Bounded random jitter for non-deterministic play

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_color, evaluate_line, evaluate_noisy, evaluate_state, jitter};
pub use patterns::{calc, PatternScore};
