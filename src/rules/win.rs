//! Win condition checking
//!
//! A game is won by five or more stones of one color in a row along a row,
//! column, or either diagonal.

use crate::board::{Board, Pos, Stone};

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Number of stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Count consecutive `color` stones from `pos` (exclusive) stepping by `(dr, dc)`.
fn count_direction(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let mut count = 0;
    let mut cur = pos;
    while let Some(next) = cur.offset(dr, dc, board.size()) {
        if board.get(next) != color {
            break;
        }
        count += 1;
        cur = next;
    }
    count
}

/// Fast five-in-a-row check through a specific position.
///
/// Only checks the 4 lines through `pos`, so it is the check to use right
/// after placing a stone there.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty || board.get(pos) != color {
        return false;
    }
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + count_direction(board, pos, dr, dc, color) + count_direction(board, pos, -dr, -dc, color)
            >= WIN_LENGTH
    })
}

/// Check if there's 5+ in a row anywhere for the given color
pub fn has_five_in_row(board: &Board, color: Stone) -> bool {
    // Only line starts need checking: a run is found from its first stone.
    board.stones(color).any(|pos| {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            let is_start = pos
                .offset(-dr, -dc, board.size())
                .is_none_or(|prev| board.get(prev) != color);
            is_start && 1 + count_direction(board, pos, dr, dc, color) >= WIN_LENGTH
        })
    })
}

/// Empty cells where `color` would complete five.
///
/// Every five-cell window holding four `color` stones and one empty cell
/// contributes that empty cell. Sorted, without duplicates.
pub fn winning_cells(board: &Board, color: Stone) -> Vec<Pos> {
    let size = board.size();
    let mut cells = Vec::new();
    for idx in 0..board.total_cells() {
        let start = Pos::from_index(idx, size);
        for &(dr, dc) in &DIRECTIONS {
            let Some(window) = (0..WIN_LENGTH as i32)
                .map(|k| start.offset(dr * k, dc * k, size))
                .collect::<Option<Vec<Pos>>>()
            else {
                continue;
            };
            let own = window.iter().filter(|&&p| board.get(p) == color).count();
            let empty: Vec<Pos> = window.into_iter().filter(|&p| board.is_empty(p)).collect();
            if own == WIN_LENGTH - 1 && empty.len() == 1 {
                cells.push(empty[0]);
            }
        }
    }
    cells.sort_unstable();
    cells.dedup();
    cells
}
