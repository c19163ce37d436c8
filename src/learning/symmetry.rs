//! Board canonicalization under the square's symmetry group
//!
//! A square board has eight symmetries: four rotations, each optionally
//! mirrored. Positions that differ only by one of them are strategically
//! identical, so the value table stores them once, under the
//! lexicographically smallest of the eight cell encodings.

use crate::board::{Board, Pos};
use crate::search::ZobristTable;

/// One element of the dihedral group of the square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    /// Clockwise quarter turn
    Rot90,
    Rot180,
    Rot270,
    /// Mirror left to right
    FlipHorizontal,
    /// Mirror top to bottom
    FlipVertical,
    /// Mirror across the main diagonal
    Transpose,
    /// Mirror across the anti-diagonal
    AntiTranspose,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::FlipHorizontal,
        Symmetry::Rot90,
        Symmetry::Transpose,
        Symmetry::Rot180,
        Symmetry::FlipVertical,
        Symmetry::Rot270,
        Symmetry::AntiTranspose,
    ];

    /// Where `pos` lands on a `size`×`size` board under this symmetry.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(self, pos: Pos, size: usize) -> Pos {
        let last = (size - 1) as u8;
        let (r, c) = (pos.row, pos.col);
        let (row, col) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::Rot90 => (c, last - r),
            Symmetry::Rot180 => (last - r, last - c),
            Symmetry::Rot270 => (last - c, r),
            Symmetry::FlipHorizontal => (r, last - c),
            Symmetry::FlipVertical => (last - r, c),
            Symmetry::Transpose => (c, r),
            Symmetry::AntiTranspose => (last - c, last - r),
        };
        Pos::new(row, col)
    }

    /// Row-major cell codes of `board` after applying this symmetry
    pub fn image(self, board: &Board) -> Vec<u8> {
        let size = board.size();
        let mut codes = vec![0u8; size * size];
        for (idx, stone) in board.cells().into_iter().enumerate() {
            let target = self.apply(Pos::from_index(idx, size), size);
            codes[target.to_index(size)] = stone.code();
        }
        codes
    }
}

/// Smallest of the eight images of `board` and the symmetry producing it.
/// Ties keep the earliest symmetry in [`Symmetry::ALL`].
pub fn canonical(board: &Board) -> (Vec<u8>, Symmetry) {
    let mut best = (Symmetry::Identity.image(board), Symmetry::Identity);
    for sym in &Symmetry::ALL[1..] {
        let image = sym.image(board);
        if image < best.0 {
            best = (image, *sym);
        }
    }
    best
}

/// Canonical form of a board: its fixed-width key plus the symmetry that
/// maps the board's own coordinates into the canonical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalState {
    pub key: u64,
    pub symmetry: Symmetry,
    pub size: usize,
}

impl CanonicalState {
    pub fn of(board: &Board, zobrist: &ZobristTable) -> Self {
        let (codes, symmetry) = canonical(board);
        Self {
            key: zobrist.hash_codes(&codes),
            symmetry,
            size: board.size(),
        }
    }

    /// Board move expressed in the canonical frame
    pub fn to_canonical(&self, pos: Pos) -> Pos {
        self.symmetry.apply(pos, self.size)
    }
}

/// Key shared by `board` and all of its rotations and reflections
pub fn canonical_key(board: &Board, zobrist: &ZobristTable) -> u64 {
    CanonicalState::of(board, zobrist).key
}
