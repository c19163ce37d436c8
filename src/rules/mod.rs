//! Game rules for standard Gomoku
//!
//! Five or more in a row wins; a full board without a five is a draw.

pub mod win;

// Re-exports for convenient access
pub use win::{has_five_at_pos, has_five_in_row, winning_cells, DIRECTIONS, WIN_LENGTH};
