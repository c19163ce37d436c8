//! Zobrist hashing for position identification
//!
//! Each (cell, color) pair gets a fixed pseudo-random 64-bit key; a
//! position hashes to the XOR of the keys of its stones. Best-first search
//! updates hashes incrementally to recognize positions it has expanded, and
//! the value table uses them as compact keys for canonical board images.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::ZobristTable;
//!
//! let zt = ZobristTable::new(15);
//! let mut board = Board::new(15);
//! let empty = zt.hash(&board);
//!
//! let pos = Pos::new(7, 7);
//! board.place_stone(pos, Stone::Black);
//! assert_eq!(zt.update_place(empty, pos, Stone::Black, 15), zt.hash(&board));
//! ```

use crate::board::{Board, Pos, Stone};

/// Zobrist keys for one board size.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    size: usize,
    black: Vec<u64>,
    white: Vec<u64>,
}

impl ZobristTable {
    /// Table for a `size`×`size` board.
    ///
    /// Keys come from a fixed-seed LCG, so the same size always yields the
    /// same table and hashes stay stable across runs and processes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        // Knuth's MMIX LCG constants
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            seed
        };

        let cells = size * size;
        let mut black = Vec::with_capacity(cells);
        let mut white = Vec::with_capacity(cells);
        for _ in 0..cells {
            black.push(next_rand());
            white.push(next_rand());
        }

        Self { size, black, white }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn key(&self, idx: usize, stone: Stone) -> u64 {
        match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        }
    }

    /// Full hash of `board`. The board must match the table's size.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        debug_assert_eq!(board.size(), self.size);
        let size = board.size();
        let mut h = 0u64;
        for pos in board.stones(Stone::Black) {
            h ^= self.black[pos.to_index(size)];
        }
        for pos in board.stones(Stone::White) {
            h ^= self.white[pos.to_index(size)];
        }
        h
    }

    /// Hash of a row-major cell encoding (0 empty, 1 black, 2 white).
    #[must_use]
    pub fn hash_codes(&self, codes: &[u8]) -> u64 {
        debug_assert_eq!(codes.len(), self.size * self.size);
        codes
            .iter()
            .enumerate()
            .fold(0u64, |h, (idx, &code)| match code {
                1 => h ^ self.black[idx],
                2 => h ^ self.white[idx],
                _ => h,
            })
    }

    /// Hash after placing `stone` at `pos`. XOR is its own inverse, so the
    /// same call also undoes a placement.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, pos: Pos, stone: Stone, size: usize) -> u64 {
        hash ^ self.key(pos.to_index(size), stone)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(crate::board::DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_empty_board() {
        let zt = ZobristTable::new(15);
        assert_eq!(zt.hash(&Board::new(15)), 0);
        assert_eq!(zt.hash_codes(&[0; 225]), 0);
    }

    #[test]
    fn test_zobrist_deterministic() {
        let zt1 = ZobristTable::new(9);
        let zt2 = ZobristTable::new(9);
        let mut board = Board::new(9);
        board.place_stone(Pos::new(4, 4), Stone::White);
        assert_eq!(zt1.hash(&board), zt2.hash(&board));
    }

    #[test]
    fn test_zobrist_incremental() {
        let zt = ZobristTable::new(15);
        let mut board = Board::new(15);
        let pos = Pos::new(9, 9);

        let before = zt.hash(&board);
        board.place_stone(pos, Stone::Black);
        let after = zt.hash(&board);

        assert_eq!(zt.update_place(before, pos, Stone::Black, 15), after);
        // Undo restores the original hash
        assert_eq!(zt.update_place(after, pos, Stone::Black, 15), before);
    }

    #[test]
    fn test_zobrist_color_matters() {
        let zt = ZobristTable::new(15);
        let mut black = Board::new(15);
        let mut white = Board::new(15);
        black.place_stone(Pos::new(3, 4), Stone::Black);
        white.place_stone(Pos::new(3, 4), Stone::White);
        assert_ne!(zt.hash(&black), zt.hash(&white));
    }

    #[test]
    fn test_zobrist_same_position_different_path() {
        let zt = ZobristTable::new(15);
        let mut board1 = Board::new(15);
        let mut board2 = Board::new(15);

        board1.place_stone(Pos::new(9, 9), Stone::Black);
        board1.place_stone(Pos::new(10, 10), Stone::White);

        board2.place_stone(Pos::new(10, 10), Stone::White);
        board2.place_stone(Pos::new(9, 9), Stone::Black);

        assert_eq!(zt.hash(&board1), zt.hash(&board2));
    }

    #[test]
    fn test_zobrist_codes_match_board() {
        let zt = ZobristTable::new(7);
        let mut board = Board::new(7);
        board.place_stone(Pos::new(0, 0), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::White);
        board.place_stone(Pos::new(3, 2), Stone::Black);

        let codes: Vec<u8> = board.cells().iter().map(|s| s.code()).collect();
        assert_eq!(zt.hash_codes(&codes), zt.hash(&board));
    }

    #[test]
    fn test_zobrist_nearby_positions_differ() {
        let zt = ZobristTable::new(15);
        let mut board1 = Board::new(15);
        let mut board2 = Board::new(15);
        board1.place_stone(Pos::new(9, 9), Stone::Black);
        board2.place_stone(Pos::new(9, 10), Stone::Black);
        assert_ne!(zt.hash(&board1), zt.hash(&board2));
    }
}
