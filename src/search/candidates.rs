//! Candidate move generation
//!
//! Search over every empty cell is only affordable at very shallow depth.
//! These generators reduce the move set to cells near the action:
//! - [`border_cells`]: empty cells touching a stone, randomly down-sampled
//! - [`bounding_box`]: empty cells in the stones' bounding box plus a margin
//! - [`scored_top_k`]: the `k` best cells by attack, defense, and crowding

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Pos, Stone};
use crate::eval::jitter;
use crate::rules::{DIRECTIONS, WIN_LENGTH};

/// Upper bound on the number of border cells returned
pub const MAX_CANDIDATES: usize = 255;

/// Number of random cells offered when no stone is on the board yet
const OPENING_SAMPLE: usize = 2;

/// Empty cells within Chebyshev `distance` of any stone.
///
/// The result is shuffled and capped at `max_moves`. On an empty board a
/// random sample of at most two empty cells is returned instead; a full
/// board yields no cells.
pub fn border_cells<R: Rng>(
    board: &Board,
    distance: usize,
    max_moves: usize,
    rng: &mut R,
) -> Vec<Pos> {
    let reach = i32::try_from(distance.max(1)).unwrap_or(1);
    let (mut border, mut isolated): (Vec<Pos>, Vec<Pos>) = board
        .empty_cells()
        .into_iter()
        .partition(|&pos| has_neighbor(board, pos, reach));

    if border.is_empty() {
        isolated.shuffle(rng);
        isolated.truncate(OPENING_SAMPLE);
        return isolated;
    }

    border.shuffle(rng);
    border.truncate(max_moves);
    border
}

fn has_neighbor(board: &Board, pos: Pos, reach: i32) -> bool {
    (-reach..=reach).any(|dr| {
        (-reach..=reach).any(|dc| {
            (dr, dc) != (0, 0)
                && pos
                    .offset(dr, dc, board.size())
                    .is_some_and(|n| board.get(n) != Stone::Empty)
        })
    })
}

/// Empty cells inside the bounding box of all stones, grown by `buffer`
/// cells on every side and clipped to the board.
///
/// An empty board has no bounding box; its center is returned.
pub fn bounding_box(board: &Board, buffer: usize) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let stones = board.stones(Stone::Black).chain(board.stones(Stone::White));
    let (mut min_row, mut max_row, mut min_col, mut max_col) = (u8::MAX, 0, u8::MAX, 0);
    for pos in stones {
        min_row = min_row.min(pos.row);
        max_row = max_row.max(pos.row);
        min_col = min_col.min(pos.col);
        max_col = max_col.max(pos.col);
    }

    let last = board.size() - 1;
    let rows = (min_row as usize).saturating_sub(buffer)..=(max_row as usize + buffer).min(last);
    let cols = (min_col as usize).saturating_sub(buffer)..=(max_col as usize + buffer).min(last);
    rows.flat_map(|r| cols.clone().map(move |c| (r, c)))
        .map(|(r, c)| Pos::from_index(r * board.size() + c, board.size()))
        .filter(|&pos| board.is_empty(pos))
        .collect()
}

/// Run potential of placing at `pos`: for each direction, `10^(n-1)` where
/// `n` is the number of `color` stones adjacent along that line.
fn line_potential(board: &Board, pos: Pos, color: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let run = adjacent_run(board, pos, dr, dc, color)
                + adjacent_run(board, pos, -dr, -dc, color);
            match run.min(WIN_LENGTH) {
                0 => 0,
                n => 10i32.pow(u32::try_from(n - 1).unwrap_or(0)),
            }
        })
        .sum()
}

fn adjacent_run(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let mut run = 0;
    let mut cur = pos;
    while let Some(next) = cur.offset(dr, dc, board.size()) {
        if board.get(next) != color {
            break;
        }
        run += 1;
        cur = next;
    }
    run
}

/// Number of occupied cells among the 8 neighbors of `pos`
fn neighbor_density(board: &Board, pos: Pos) -> i32 {
    let mut count = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if (dr, dc) != (0, 0)
                && pos
                    .offset(dr, dc, board.size())
                    .is_some_and(|n| board.get(n) != Stone::Empty)
            {
                count += 1;
            }
        }
    }
    count
}

/// Combined score of an empty cell for `color`:
/// `(offense + defense) * neighbor_density`.
pub fn cell_score(board: &Board, pos: Pos, color: Stone) -> i32 {
    let offense = line_potential(board, pos, color);
    let defense = line_potential(board, pos, color.opponent());
    (offense + defense) * neighbor_density(board, pos)
}

/// The `k` highest scoring empty cells for `color`, best first.
///
/// Scores are jittered before ranking so equal positions are not always
/// resolved the same way. Cells scoring zero are never returned. An empty
/// board short-circuits to its center.
pub fn scored_top_k<R: Rng>(board: &Board, color: Stone, k: usize, rng: &mut R) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }
    if k == 0 {
        return Vec::new();
    }

    // Min-heap bounded to k entries: the weakest kept cell sits on top.
    let mut heap: BinaryHeap<Reverse<(i32, Reverse<Pos>)>> = BinaryHeap::with_capacity(k + 1);
    for pos in board.empty_cells() {
        let score = cell_score(board, pos, color);
        if score <= 0 {
            continue;
        }
        heap.push(Reverse((jitter(score, rng), Reverse(pos))));
        if heap.len() > k {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse((_, Reverse(pos)))| pos)
        .collect()
}
