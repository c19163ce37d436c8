//! Value-table reinforcement learning
//!
//! - [`symmetry`]: canonical board keys under rotation and reflection
//! - [`value_table`]: sparse state-action values with JSON persistence
//! - [`agent`]: the learning agent playing from the table

pub mod agent;
pub mod symmetry;
pub mod value_table;

pub use agent::{ValueTableAgent, ValueTableConfig};
pub use symmetry::{canonical, canonical_key, CanonicalState, Symmetry};
pub use value_table::{TdParams, ValueTable};
