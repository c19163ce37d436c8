//! Pattern scores for Gomoku evaluation
//!
//! A run of same-color stones is scored from its length, how many of its
//! ends are blocked, whether it belongs to the side to act, and whether it
//! spans a single empty gap.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Base score by run length (index 0..=4), before modifiers
    pub const SEQUENCE: [i32; 5] = [0, 1, 5, 1_000, 10_000];

    /// Five or more in a row
    pub const FIVE: i32 = 100_000;
    /// Five or more stones spanning one gap (one move from a five)
    pub const GAPPED_FIVE: i32 = 10_000;

    /// Multiplier for a length-4 run with one blocked end, applied with [`Self::PENALTY`]
    pub const HALF_OPEN_FOUR: f64 = 0.25;
    /// Multiplier for a length-3 run with one blocked end
    pub const HALF_OPEN_THREE: f64 = 0.01;
    /// Multiplier for a length-4 or length-1..=2 run with one blocked end, and for a gapped four
    pub const PENALTY: f64 = 0.5;
    /// Multiplier for threes and fours that belong to the side not acting
    pub const DEFENSIVE_DISCOUNT: f64 = 0.1;
}

/// Score one run of stones.
///
/// # Arguments
/// * `length` - Number of stones in the run (a credited gap is not counted)
/// * `blocked_ends` - Ends blocked by the board edge or an opposing stone (0..=2)
/// * `is_current` - Whether the run belongs to the color being evaluated for
/// * `has_gap` - Whether the run spans one empty cell
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn calc(length: usize, blocked_ends: u8, is_current: bool, has_gap: bool) -> i32 {
    if length >= 5 {
        return if has_gap {
            PatternScore::GAPPED_FIVE
        } else {
            PatternScore::FIVE
        };
    }
    // Dead pattern: no room to grow on either side
    if blocked_ends >= 2 {
        return 0;
    }

    let mut score = f64::from(PatternScore::SEQUENCE[length]);
    if blocked_ends == 1 {
        // A half-open four takes both its own multiplier and the penalty
        score *= match length {
            4 => PatternScore::HALF_OPEN_FOUR * PatternScore::PENALTY,
            3 => PatternScore::HALF_OPEN_THREE,
            _ => PatternScore::PENALTY,
        };
    }
    if has_gap && length == 4 {
        score *= PatternScore::PENALTY;
    }
    if !is_current && matches!(length, 3 | 4) {
        score *= PatternScore::DEFENSIVE_DISCOUNT;
    }
    score as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FIVE > PatternScore::GAPPED_FIVE);
        for pair in PatternScore::SEQUENCE.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_calc_open_runs() {
        assert_eq!(calc(0, 0, true, false), 0);
        assert_eq!(calc(1, 0, true, false), 1);
        assert_eq!(calc(2, 0, true, false), 5);
        assert_eq!(calc(3, 0, true, false), 1_000);
        assert_eq!(calc(4, 0, true, false), 10_000);
    }

    #[test]
    fn test_calc_five_ignores_blocks() {
        assert_eq!(calc(5, 0, true, false), PatternScore::FIVE);
        assert_eq!(calc(5, 2, true, false), PatternScore::FIVE);
        assert_eq!(calc(6, 2, false, false), PatternScore::FIVE);
        assert_eq!(calc(5, 1, true, true), PatternScore::GAPPED_FIVE);
    }

    #[test]
    fn test_calc_dead_pattern() {
        for length in 1..5 {
            assert_eq!(calc(length, 2, true, false), 0);
        }
    }

    #[test]
    fn test_calc_one_blocked_end() {
        assert_eq!(calc(4, 1, true, false), 1_250);
        assert_eq!(calc(3, 1, true, false), 10);
        assert_eq!(calc(2, 1, true, false), 2);
        assert_eq!(calc(1, 1, true, false), 0);
    }

    #[test]
    fn test_calc_gapped_four() {
        assert_eq!(calc(4, 0, true, true), 5_000);
        assert_eq!(calc(4, 1, true, true), 625);
        // Gap only modifies fours
        assert_eq!(calc(3, 0, true, true), 1_000);
    }

    #[test]
    fn test_calc_defensive_discount() {
        assert_eq!(calc(4, 0, false, false), 1_000);
        assert_eq!(calc(4, 1, false, false), 125);
        assert_eq!(calc(3, 1, false, false), 1);
        assert_eq!(calc(3, 0, false, false), 100);
        // Short runs are not discounted
        assert_eq!(calc(2, 0, false, false), 5);
    }
}
