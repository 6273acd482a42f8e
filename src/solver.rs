//! Boolean negamax solver for NoGo.
//!
//! The solver answers one question for the player to move: is there a
//! forced win, and if so, which move starts it. It is a plain depth-first
//! search with no pruning beyond:
//! - memoization in a [`TranspositionTable`], including hits on any of the
//!   8 symmetric images of the current position
//! - returning on the first winning child
//!
//! Children are tried in heuristic order (best eye statistics first) so that
//! wins are found early. The board copy is mutated in place and every frame
//! undoes its own move before returning, on success and on timeout alike.

use std::cmp::Reverse;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Color};
use crate::heuristic::{EvalState, evaluate, evaluate_incremental};
use crate::position::{Point, Position};
use crate::symmetry::Symmetry;
use crate::transposition::{Entry, TranspositionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The deadline passed before the search finished
    #[error("search deadline exceeded")]
    Timeout,
}

/// Search options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Order children by heuristic score instead of board order
    pub heuristic: bool,
    /// Probe the table with all 8 symmetric fingerprints
    pub symmetry: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            heuristic: true,
            symmetry: true,
        }
    }
}

/// Points proven illegal for each color on the current branch.
///
/// NoGo never removes stones, so a point that is illegal for a color stays
/// illegal in every descendant. Each child receives its own copy.
#[derive(Clone, Debug, Default)]
struct Blacklist {
    black: Vec<Point>,
    white: Vec<Point>,
}

impl Blacklist {
    fn get(&self, color: Color) -> &[Point] {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    fn add(&mut self, color: Color, pt: Point) {
        match color {
            Color::Black => self.black.push(pt),
            Color::White => self.white.push(pt),
        }
    }
}

/// A candidate move with the child's heuristic state, if ordering is on.
struct Candidate {
    mv: Point,
    eval: Option<EvalState>,
}

pub struct Solver {
    pos: Position,
    tt: TranspositionTable,
    config: SolverConfig,
    deadline: Option<Instant>,
    nodes: u64,
}

impl Solver {
    /// Create a solver over its own copy of a position, with a fresh table.
    pub fn new(pos: Position, config: SolverConfig) -> Self {
        let tt = TranspositionTable::new(pos.size);
        Self::with_table(pos, config, tt)
    }

    pub fn with_table(pos: Position, config: SolverConfig, tt: TranspositionTable) -> Self {
        debug_assert_eq!(pos.size, tt.size(), "table and position sizes differ");
        Self {
            pos,
            tt,
            config,
            deadline: None,
            nodes: 0,
        }
    }

    /// Abort the search with [`SolveError::Timeout`] once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Solve for the player to move.
    pub fn solve(&mut self) -> Result<Entry, SolveError> {
        let start = Instant::now();
        let result = self.negamax(Blacklist::default(), None);
        debug!(
            nodes = self.nodes,
            entries = self.tt.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            ?result,
            "solve finished"
        );
        result
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Number of nodes entered so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn timed_out(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn negamax(
        &mut self,
        mut blacklist: Blacklist,
        eval: Option<EvalState>,
    ) -> Result<Entry, SolveError> {
        if self.timed_out() {
            return Err(SolveError::Timeout);
        }
        self.nodes += 1;

        let code = self.tt.code(&self.pos);
        if let Some(entry) = self.tt.lookup(code) {
            return Ok(entry);
        }
        if self.config.symmetry {
            if let Some(entry) = self.lookup_symmetric() {
                return Ok(entry);
            }
        }

        let color = self.pos.to_play;
        let mut candidates: Vec<Candidate> = self
            .pos
            .empty_points()
            .into_iter()
            .filter(|pt| !blacklist.get(color).contains(pt))
            .map(|mv| Candidate { mv, eval: None })
            .collect();

        if candidates.is_empty() {
            return Ok(self.tt.store(code, Entry::LOSS));
        }

        if self.config.heuristic {
            let parent = eval.unwrap_or_else(|| evaluate(&self.pos, color));
            for c in &mut candidates {
                self.pos.place(c.mv, color);
                c.eval = Some(evaluate_incremental(&self.pos, color, c.mv, &parent));
                self.pos.undo(c.mv, color);
            }
            // Stable: ties keep board order.
            candidates.sort_by_key(|c| Reverse(c.eval.as_ref().map_or(0, |e| e.score)));
        }

        for Candidate { mv, eval } in candidates {
            if self.pos.play(mv, color).is_err() {
                blacklist.add(color, mv);
                continue;
            }
            let child = self.negamax(blacklist.clone(), eval.map(EvalState::flipped));
            self.pos.undo(mv, color);
            if !child?.win {
                return Ok(self.tt.store(code, Entry::win(mv)));
            }
        }

        Ok(self.tt.store(code, Entry::LOSS))
    }

    /// Probe the table with every non-identity image of the position.
    ///
    /// A cached move belongs to the transformed orientation, so it is mapped
    /// back through the inverse transform before being returned.
    fn lookup_symmetric(&self) -> Option<Entry> {
        let board = Board::from(&self.pos);
        let size = self.pos.size;
        for sym in &Symmetry::ALL[1..] {
            let code = self.tt.code_2d(&sym.apply(&board));
            if let Some(entry) = self.tt.lookup(code) {
                let mv = entry.mv.map(|pt| {
                    let (row, col) = self.pos.row_col(pt);
                    let (row, col) = sym.inverse().map((row - 1, col - 1), size);
                    self.pos.pt(row + 1, col + 1)
                });
                return Some(Entry { win: entry.win, mv });
            }
        }
        None
    }
}
