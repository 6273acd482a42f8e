//! NoGo position representation and move execution.
//!
//! This module provides the board model the solver mutates:
//! - Board state as a 1D array with border padding
//! - NoGo legality (no captures, no suicide)
//! - Play / undo pairs that restore the exact prior state
//! - GTP coordinate parsing and formatting
//!
//! Points are indices `row * (size + 1) + col` with rows and columns counted
//! from 1. Row 1 is the bottom row, as in GTP. Colors are absolute (black is
//! always `'X'`), since solve answers name the winning color.

use std::fmt;

use thiserror::Error;

use crate::board::{Board, Color};
use crate::constants::{COLUMN_LETTERS, EMPTY, MAX_BOARD_SIZE, OUT, array_len, stride};

/// A point on the board, represented as an index into the 1D board array.
pub type Point = usize;

/// Reason a move is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Point is padding or outside the array
    #[error("off board")]
    OutOfBounds,
    /// Point is not empty
    #[error("occupied")]
    Occupied,
    /// Move would take the last liberty of an opponent group
    #[error("capture")]
    Capture,
    /// Move would leave its own group without liberties
    #[error("suicide")]
    Suicide,
}

/// A coordinate string that does not name a point on this board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wrong coordinate")]
pub struct CoordError;

/// A NoGo position (board state plus the player to move).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Play area is `size x size`
    pub size: usize,
    /// Board state: 'X' = black, 'O' = white, '.' = empty, ' ' = out of bounds
    pub color: Vec<u8>,
    /// Player to move
    pub to_play: Color,
}

impl Position {
    /// Empty board with black to move.
    ///
    /// GTP vertices only exist for sizes in `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`,
    /// which `boardsize` and `--size` enforce; `parse_point` rejects every
    /// vertex on other sizes.
    pub fn new(size: usize) -> Self {
        let mut p = Position {
            size,
            color: Vec::new(),
            to_play: Color::Black,
        };
        p.reset(size);
        p
    }

    /// Reset to an empty board of the given size with black to move.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.color = vec![OUT; array_len(size)];
        for row in 1..=size {
            for col in 1..=size {
                let pt = self.pt(row, col);
                self.color[pt] = EMPTY;
            }
        }
        self.to_play = Color::Black;
    }

    /// Build a position from a 2D grid. `board.get(r, c)` lands on `(r + 1, c + 1)`.
    pub fn from_board(board: &Board, to_play: Color) -> Self {
        let mut pos = Position::new(board.size);
        for ((row, col), color) in board.stones() {
            let pt = pos.pt(row + 1, col + 1);
            pos.color[pt] = color.stone();
        }
        pos.to_play = to_play;
        pos
    }

    #[inline]
    pub fn pt(&self, row: usize, col: usize) -> Point {
        row * stride(self.size) + col
    }

    #[inline]
    pub fn row_col(&self, pt: Point) -> (usize, usize) {
        (pt / stride(self.size), pt % stride(self.size))
    }

    #[inline]
    pub fn on_board(&self, pt: Point) -> bool {
        pt < self.color.len() && self.color[pt] != OUT
    }

    #[inline]
    pub fn color_at(&self, row: usize, col: usize) -> u8 {
        self.color[self.pt(row, col)]
    }

    /// The 4 orthogonal neighbors (N, E, S, W) of an on-board point.
    #[inline]
    pub fn neighbors(&self, pt: Point) -> [Point; 4] {
        let s = stride(self.size);
        [pt + s, pt + 1, pt - s, pt - 1]
    }

    /// All unoccupied on-board points, bottom row first.
    pub fn empty_points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.size * self.size);
        for row in 1..=self.size {
            for col in 1..=self.size {
                let pt = self.pt(row, col);
                if self.color[pt] == EMPTY {
                    points.push(pt);
                }
            }
        }
        points
    }

    /// Check NoGo legality of `color` playing at `pt` without mutating the board.
    ///
    /// Capture is tested before suicide, so a move that does both reports
    /// [`MoveError::Capture`].
    pub fn check_move(&self, pt: Point, color: Color) -> Result<(), MoveError> {
        if !self.on_board(pt) {
            return Err(MoveError::OutOfBounds);
        }
        if self.color[pt] != EMPTY {
            return Err(MoveError::Occupied);
        }
        let me = color.stone();
        let opp = color.opponent().stone();
        let mut has_liberty = false;
        for n in self.neighbors(pt) {
            match self.color[n] {
                EMPTY => has_liberty = true,
                c if c == opp => {
                    if !self.group_has_liberty_besides(n, pt) {
                        return Err(MoveError::Capture);
                    }
                }
                c if c == me => {
                    if self.group_has_liberty_besides(n, pt) {
                        has_liberty = true;
                    }
                }
                _ => {}
            }
        }
        if !has_liberty {
            return Err(MoveError::Suicide);
        }
        Ok(())
    }

    #[inline]
    pub fn is_legal(&self, pt: Point, color: Color) -> bool {
        self.check_move(pt, color).is_ok()
    }

    /// Play a legal move for `color`. The opponent moves next.
    ///
    /// On error the position is left untouched.
    pub fn play(&mut self, pt: Point, color: Color) -> Result<(), MoveError> {
        self.check_move(pt, color)?;
        self.color[pt] = color.stone();
        self.to_play = color.opponent();
        Ok(())
    }

    /// Place a stone without any legality check.
    ///
    /// Only for scoring hypothetical children; always pair with [`undo`](Self::undo).
    pub fn place(&mut self, pt: Point, color: Color) {
        self.color[pt] = color.stone();
        self.to_play = color.opponent();
    }

    /// Exact inverse of [`play`](Self::play) or [`place`](Self::place).
    pub fn undo(&mut self, pt: Point, color: Color) {
        self.color[pt] = EMPTY;
        self.to_play = color;
    }

    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.empty_points()
            .into_iter()
            .filter(|&pt| self.is_legal(pt, color))
            .collect()
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.empty_points()
            .into_iter()
            .any(|pt| self.is_legal(pt, color))
    }

    /// Does the group containing `start` have an empty neighbor other than `except`?
    ///
    /// Flood-fills the group and stops at the first qualifying liberty.
    fn group_has_liberty_besides(&self, start: Point, except: Point) -> bool {
        let color = self.color[start];
        let mut stack = vec![start];
        let mut visited = vec![false; self.color.len()];

        while let Some(pt) = stack.pop() {
            if visited[pt] {
                continue;
            }
            visited[pt] = true;

            for n in self.neighbors(pt) {
                match self.color[n] {
                    EMPTY if n != except => return true,
                    c if c == color && !visited[n] => stack.push(n),
                    _ => {}
                }
            }
        }
        false
    }

    /// Parse a GTP vertex such as `"c3"`. `pass` is never a NoGo move.
    pub fn parse_point(&self, s: &str) -> Result<Point, CoordError> {
        if !(2..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(CoordError);
        }
        let s = s.to_ascii_lowercase();
        let bytes = s.as_bytes();
        let Some(&col_c) = bytes.first() else {
            return Err(CoordError);
        };
        if !col_c.is_ascii_lowercase() || col_c == b'i' {
            return Err(CoordError);
        }
        let mut col = (col_c - b'a') as usize;
        if col_c < b'i' {
            col += 1;
        }
        let digits = &s[1..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoordError);
        }
        let row: usize = digits.parse().map_err(|_| CoordError)?;
        if row < 1 || row > self.size || col > self.size {
            return Err(CoordError);
        }
        Ok(self.pt(row, col))
    }

    /// Format a point as an upper-case GTP vertex such as `"C3"`.
    pub fn format_point(&self, pt: Point) -> String {
        let (row, col) = self.row_col(pt);
        match COLUMN_LETTERS.get(col - 1) {
            Some(&letter) => format!("{}{row}", letter as char),
            None => format!("{col}-{row}"),
        }
    }
}

impl From<&Position> for Board {
    fn from(pos: &Position) -> Self {
        let mut board = Board::new(pos.size);
        for row in 1..=pos.size {
            for col in 1..=pos.size {
                board.set(row - 1, col - 1, Color::from_stone(pos.color_at(row, col)));
            }
        }
        board
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Board::from(self))
    }
}
