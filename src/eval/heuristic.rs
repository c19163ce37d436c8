//! Heuristic evaluation function for Gomoku board positions
//!
//! Every row, column, and diagonal long enough to hold a five is scanned as a
//! one-dimensional line. Runs of same-color stones are scored by [`calc`]
//! according to their length and how many of their ends are blocked.

use rand::Rng;

use crate::board::{Board, Pos, Stone};

use super::patterns::calc;

/// Fraction of a score that [`jitter`] may add or remove
pub const JITTER_RATIO: f64 = 0.2;

/// Score one line of cells for `color`.
///
/// The line is scanned once, left to right. A run may bridge one single
/// empty cell when the next cell continues the run (`X_XXX`). The board edge
/// and opposing stones count as blocked ends; empty cells count as open.
#[must_use]
pub fn evaluate_line(line: &[Stone], color: Stone, is_current: bool) -> i32 {
    let mut score = 0;
    let mut run = 0;
    let mut has_gap = false;
    // The line start behaves like a wall
    let mut left_blocked = true;

    for (i, &cell) in line.iter().enumerate() {
        if cell == color {
            run += 1;
        } else if cell == Stone::Empty {
            if run > 0 {
                if !has_gap && line.get(i + 1) == Some(&color) {
                    has_gap = true;
                    continue;
                }
                score += calc(run, u8::from(left_blocked), is_current, has_gap);
                run = 0;
                has_gap = false;
            }
            left_blocked = false;
        } else {
            if run > 0 {
                score += calc(run, u8::from(left_blocked) + 1, is_current, has_gap);
                run = 0;
                has_gap = false;
            }
            left_blocked = true;
        }
    }

    if run > 0 {
        score += calc(run, u8::from(left_blocked) + 1, is_current, has_gap);
    }
    score
}

/// All lines of the board worth scanning: rows, columns, and every diagonal
/// of length >= 5 in both directions.
pub fn lines(board: &Board) -> Vec<Vec<Stone>> {
    let n = board.size();
    let at = |r: usize, c: usize| board.get(Pos::from_index(r * n + c, n));
    let mut lines = Vec::with_capacity(6 * n);

    for i in 0..n {
        lines.push((0..n).map(|j| at(i, j)).collect());
        lines.push((0..n).map(|j| at(j, i)).collect());
    }

    // Diagonal offset k: cells (r, r + k). Only offsets leaving >= 5 cells.
    let reach = n.saturating_sub(5);
    for k in 0..=reach {
        let len = n - k;
        // Down-right diagonals above and below the main one
        lines.push((0..len).map(|i| at(i, i + k)).collect());
        // Down-left diagonals (mirror image) on either side of the anti-diagonal
        lines.push((0..len).map(|i| at(i, n - 1 - k - i)).collect());
        if k > 0 {
            lines.push((0..len).map(|i| at(i + k, i)).collect());
            lines.push((0..len).map(|i| at(i + k, n - 1 - i)).collect());
        }
    }
    lines
}

/// Total line score for `color`, where runs of `perspective` count as current.
#[must_use]
pub fn evaluate_color(board: &Board, color: Stone, perspective: Stone) -> i32 {
    let is_current = color == perspective;
    lines(board)
        .iter()
        .map(|line| evaluate_line(line, color, is_current))
        .sum()
}

/// Evaluate the board from the perspective of the given color.
///
/// Returns black's line total minus white's line total, negated for white,
/// so that a positive score always favors `perspective`.
#[must_use]
pub fn evaluate_state(board: &Board, perspective: Stone) -> i32 {
    let black_lead = evaluate_color(board, Stone::Black, perspective)
        - evaluate_color(board, Stone::White, perspective);
    if perspective == Stone::White {
        -black_lead
    } else {
        black_lead
    }
}

/// [`evaluate_state`] with [`jitter`] applied, used where repeated play
/// should not be fully deterministic.
pub fn evaluate_noisy<R: Rng>(board: &Board, perspective: Stone, rng: &mut R) -> i32 {
    jitter(evaluate_state(board, perspective), rng)
}

/// Perturb a score by a uniform amount within ±20% of its magnitude,
/// truncating towards zero.
#[allow(clippy::cast_possible_truncation)]
pub fn jitter<R: Rng>(score: i32, rng: &mut R) -> i32 {
    let spread = f64::from(score).abs() * JITTER_RATIO;
    if spread == 0.0 {
        return score;
    }
    (f64::from(score) + rng.random_range(-spread..=spread)) as i32
}
