//! Transposition table and Zobrist-style position fingerprints.
//!
//! A table owns one random constant per board cell. A fingerprint XORs
//! `constant * color_value` over all stones (black = 1, white = 2), so it
//! depends on stone placement only and never on the player to move.
//!
//! Tables are short-lived: the search driver builds a fresh one for every
//! top-level request, so entries are exact results for the rest of the game
//! and are never evicted or invalidated.

use std::collections::HashMap;

use crate::board::{Board, Color};
use crate::position::{Point, Position};

/// A solved node: can the player to move force a win, and with which move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub win: bool,
    pub mv: Option<Point>,
}

impl Entry {
    pub const LOSS: Entry = Entry {
        win: false,
        mv: None,
    };

    pub fn win(mv: Point) -> Self {
        Entry { win: true, mv: Some(mv) }
    }
}

pub struct TranspositionTable {
    size: usize,
    /// Random constant per cell, indexed `row * size + col` (zero-based)
    zobrist: Vec<u64>,
    table: HashMap<u64, Entry>,
}

impl TranspositionTable {
    /// Create a table with fresh random constants for a `size x size` board.
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, &mut fastrand::Rng::new())
    }

    /// Create a table whose constants are drawn from `rng`.
    pub fn with_rng(size: usize, rng: &mut fastrand::Rng) -> Self {
        let zobrist = (0..size * size).map(|_| rng.u64(..)).collect();
        Self {
            size,
            zobrist,
            table: HashMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn term(&self, row: usize, col: usize, color: Color) -> u64 {
        self.zobrist[row * self.size + col].wrapping_mul(color.hash_value())
    }

    /// Fingerprint of a padded position.
    pub fn code(&self, pos: &Position) -> u64 {
        debug_assert_eq!(pos.size, self.size);
        let mut c = 0u64;
        for row in 0..self.size {
            for col in 0..self.size {
                if let Some(color) = Color::from_stone(pos.color_at(row + 1, col + 1)) {
                    c ^= self.term(row, col, color);
                }
            }
        }
        c
    }

    /// Fingerprint of a 2D grid. Agrees with [`code`](Self::code) on
    /// `Board::from(&pos)`.
    pub fn code_2d(&self, board: &Board) -> u64 {
        debug_assert_eq!(board.size, self.size);
        board
            .stones()
            .fold(0u64, |c, ((row, col), color)| c ^ self.term(row, col, color))
    }

    pub fn lookup(&self, code: u64) -> Option<Entry> {
        self.table.get(&code).copied()
    }

    /// Record `entry` for `code` unless one is already present.
    ///
    /// Returns the entry held for `code` afterwards; the first write wins.
    pub fn store(&mut self, code: u64, entry: Entry) -> Entry {
        *self.table.entry(code).or_insert(entry)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
