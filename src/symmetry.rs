//! The 8 dihedral symmetries of a square board.
//!
//! NoGo legality only depends on adjacency, so a position's value is
//! unchanged by rotating or mirroring the board. The transposition table
//! uses this to reuse a result cached for any symmetric image of the
//! current position.
//!
//! Each [`Symmetry`] maps a zero-based cell `(row, col)` of a `size x size`
//! grid. Mirrored variants mirror columns first, then rotate clockwise.

use crate::board::{Board, Cell};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    Rot90,
    Rot180,
    Rot270,
    Mirror,
    MirrorRot90,
    MirrorRot180,
    MirrorRot270,
}

impl Symmetry {
    /// All 8 transforms, identity first.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rot90,
        Symmetry::Rot180,
        Symmetry::Rot270,
        Symmetry::Mirror,
        Symmetry::MirrorRot90,
        Symmetry::MirrorRot180,
        Symmetry::MirrorRot270,
    ];

    /// Image of `(row, col)` under this transform.
    #[inline]
    pub fn map(self, (row, col): Cell, size: usize) -> Cell {
        let last = size - 1;
        match self {
            Symmetry::Identity => (row, col),
            Symmetry::Rot90 => (col, last - row),
            Symmetry::Rot180 => (last - row, last - col),
            Symmetry::Rot270 => (last - col, row),
            Symmetry::Mirror => (row, last - col),
            Symmetry::MirrorRot90 => (last - col, last - row),
            Symmetry::MirrorRot180 => (last - row, col),
            Symmetry::MirrorRot270 => (col, row),
        }
    }

    /// The transform that undoes this one.
    ///
    /// Quarter turns swap; the half turn and all four reflections are involutions.
    pub fn inverse(self) -> Symmetry {
        match self {
            Symmetry::Rot90 => Symmetry::Rot270,
            Symmetry::Rot270 => Symmetry::Rot90,
            other => other,
        }
    }

    /// Transform a whole grid. Pure; the input is not modified.
    pub fn apply(self, board: &Board) -> Board {
        let mut out = Board::new(board.size);
        for (cell, color) in board.stones() {
            let (row, col) = self.map(cell, board.size);
            out.set(row, col, Some(color));
        }
        out
    }
}

/// The 8 symmetric images of `board`, in [`Symmetry::ALL`] order.
pub fn transforms(board: &Board) -> [Board; 8] {
    Symmetry::ALL.map(|sym| sym.apply(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    /// A 3x3 grid with no symmetry of its own.
    fn asymmetric() -> Board {
        let mut board = Board::new(3);
        board.set(0, 0, Some(Color::Black));
        board.set(0, 1, Some(Color::Black));
        board.set(2, 0, Some(Color::White));
        board
    }

    #[test]
    fn test_identity_is_first() {
        let board = asymmetric();
        assert_eq!(transforms(&board)[0], board);
    }

    #[test]
    fn test_eight_distinct_images() {
        let images = transforms(&asymmetric());
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(images[i], images[j], "{:?} == {:?}", Symmetry::ALL[i], Symmetry::ALL[j]);
            }
        }
    }

    #[test]
    fn test_inverse_undoes_map() {
        for size in [2, 3, 4, 7] {
            for sym in Symmetry::ALL {
                for row in 0..size {
                    for col in 0..size {
                        let there = sym.map((row, col), size);
                        assert_eq!(sym.inverse().map(there, size), (row, col), "{sym:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        let board = asymmetric();
        let mut turned = board.clone();
        for _ in 0..4 {
            turned = Symmetry::Rot90.apply(&turned);
        }
        assert_eq!(turned, board);
    }

    #[test]
    fn test_rot90_moves_corner_clockwise() {
        // Bottom-left (0, 0) goes to (0, 2) in row/col space.
        assert_eq!(Symmetry::Rot90.map((0, 0), 3), (0, 2));
        assert_eq!(Symmetry::Rot90.map((0, 2), 3), (2, 2));
    }

    #[test]
    fn test_stone_count_preserved() {
        let board = asymmetric();
        for image in transforms(&board) {
            assert_eq!(image.stones().count(), 3);
        }
    }
}
