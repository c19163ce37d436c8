//! Board structure

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Square game board of `size` x `size` cells.
///
/// Boards are plain values: search code clones them freely, one snapshot per
/// node or branch, and never shares one mutably between branches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
}

impl Board {
    /// Create an empty `size`×`size` board.
    ///
    /// `size` must lie in `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`. Debug builds
    /// panic on anything else; release builds clamp it into that range, so
    /// `Board::new(3)` is a 5×5 board there.
    pub fn new(size: usize) -> Self {
        debug_assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {size} outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
        );
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        let cells = size * size;
        Self {
            size,
            black: Bitboard::new(cells),
            white: Bitboard::new(cells),
        }
    }

    /// Build a board from text rows: `B`/`X` black, `W`/`O` white, anything else empty.
    ///
    /// Returns `None` unless the rows form a square of a supported size.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return None;
        }
        let mut board = Board::new(size);
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != size {
                return None;
            }
            for (c, ch) in cells.into_iter().enumerate() {
                let stone = match ch {
                    'B' | 'X' => Stone::Black,
                    'W' | 'O' => Stone::White,
                    _ => continue,
                };
                board.place_stone(Pos::from_index(r * size + c, size), stone);
            }
        }
        Some(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// Get stone at position (off-board positions read as empty)
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !self.contains(pos) {
            return Stone::Empty;
        }
        let idx = pos.to_index(self.size);
        if self.black.get(idx) {
            Stone::Black
        } else if self.white.get(idx) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is on the board and empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.contains(pos) && self.get(pos) == Stone::Empty
    }

    /// Place a stone.
    ///
    /// Occupied or off-board cells are left untouched and `false` is returned;
    /// a cell is written at most once.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        let idx = pos.to_index(self.size);
        match stone {
            Stone::Black => self.black.set(idx),
            Stone::White => self.white.set(idx),
            Stone::Empty => return false,
        }
        true
    }

    /// Positions of every stone of a color, in row-major order
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        let bits = match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        };
        let size = self.size;
        bits.into_iter()
            .flat_map(Bitboard::iter_ones)
            .map(move |idx| Pos::from_index(idx, size))
    }

    /// Number of stones of a color
    #[inline]
    pub fn count(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black.count(),
            Stone::White => self.white.count(),
            Stone::Empty => {
                u32::try_from(self.total_cells()).unwrap_or(u32::MAX) - self.stone_count()
            }
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.total_cells()
    }

    /// Every empty cell, in row-major order
    pub fn empty_cells(&self) -> Vec<Pos> {
        (0..self.total_cells())
            .filter(|&idx| !self.black.get(idx) && !self.white.get(idx))
            .map(|idx| Pos::from_index(idx, self.size))
            .collect()
    }

    /// Center cell (rounded towards the origin on even sizes)
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = self.size / 2;
        Pos::from_index(mid * self.size + mid, self.size)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> Vec<Stone> {
        (0..self.total_cells())
            .map(|idx| self.get(Pos::from_index(idx, self.size)))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, stone) in self.cells().into_iter().enumerate() {
            let ch = match stone {
                Stone::Black => 'X',
                Stone::White => 'O',
                Stone::Empty => '.',
            };
            write!(f, "{ch}")?;
            if idx % self.size == self.size - 1 {
                writeln!(f)?;
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}
