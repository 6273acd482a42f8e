//! Player colors and a plain 2D color grid.
//!
//! [`Board`] is the unpadded `size x size` view of a position. The hasher
//! fingerprints it directly and the symmetry generator rotates and mirrors
//! it without touching the live [`Position`](crate::position::Position).

use std::fmt;

use crate::constants::{COLUMN_LETTERS, STONE_BLACK, STONE_WHITE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Cell byte used by the padded position array.
    #[inline]
    pub fn stone(self) -> u8 {
        match self {
            Color::Black => STONE_BLACK,
            Color::White => STONE_WHITE,
        }
    }

    #[inline]
    pub fn from_stone(c: u8) -> Option<Color> {
        match c {
            STONE_BLACK => Some(Color::Black),
            STONE_WHITE => Some(Color::White),
            _ => None,
        }
    }

    /// Multiplier applied to a cell's Zobrist constant.
    #[inline]
    pub fn hash_value(self) -> u64 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }

    /// Parse a GTP color argument (`b`, `w`, `black`, `white`, any case).
    pub fn parse(s: &str) -> Option<Color> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Single-letter form used in `solve` answers.
    pub fn letter(self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D grid coordinate, `(row, col)`, both counted from zero.
pub type Cell = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Empty `size` x `size` grid. Column letters in `Display` run out past
    /// `MAX_BOARD_SIZE`; wider boards are labelled by column number.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[self.idx(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, color: Option<Color>) {
        let i = self.idx(row, col);
        self.cells[i] = color;
    }

    /// Iterate over every stone as `((row, col), color)`.
    pub fn stones(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|color| ((i / self.size, i % self.size), color)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                let ch = match self.get(row, col) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.size {
            match COLUMN_LETTERS.get(col) {
                Some(&letter) => write!(f, "{} ", letter as char)?,
                None => write!(f, "{} ", col + 1)?,
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(Color::parse("b"), Some(Color::Black));
        assert_eq!(Color::parse("WHITE"), Some(Color::White));
        assert_eq!(Color::parse("e"), None);
    }

    #[test]
    fn test_stones_iterates_set_cells() {
        let mut board = Board::new(3);
        board.set(0, 2, Some(Color::Black));
        board.set(2, 1, Some(Color::White));
        let stones: Vec<_> = board.stones().collect();
        assert_eq!(stones, vec![((0, 2), Color::Black), ((2, 1), Color::White)]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let board = Board::new(2);
        assert_eq!(board.get(2, 0), None);
        assert_eq!(board.get(0, 5), None);
    }

    #[test]
    fn test_display_top_row_first() {
        let mut board = Board::new(2);
        board.set(1, 0, Some(Color::Black));
        board.set(0, 1, Some(Color::White));
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0].trim_end(), " 2 X .");
        assert_eq!(lines[1].trim_end(), " 1 . O");
        assert_eq!(lines[2].trim_end(), "   A B");
    }

    #[test]
    fn test_display_past_last_column_letter() {
        let board = Board::new(27);
        let text = board.to_string();
        let footer = text.lines().last().unwrap();
        assert!(footer.trim_end().ends_with("Z 26 27"), "got {footer:?}");
    }
}
