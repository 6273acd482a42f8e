//! Search driver: runs the solver under a wall-clock budget.
//!
//! Each request copies the live position, builds a fresh transposition
//! table, and solves the copy. The live position is only touched by
//! [`generate_move`], and only to play the move it returns.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::board::Color;
use crate::constants::DEFAULT_TIME_LIMIT_SECS;
use crate::position::{Point, Position};
use crate::solver::{SolveError, Solver, SolverConfig};

/// Budget and search options shared by `solve` and `genmove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Wall-clock budget per request; zero searches without a deadline
    pub time_limit: Duration,
    pub solver: SolverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
            solver: SolverConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn set_time_limit_secs(&mut self, secs: u64) {
        self.time_limit = Duration::from_secs(secs);
    }
}

/// Result of solving a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `winner` wins with perfect play. `mv` is set when the winner is the
    /// player to move and names a winning move.
    Win { winner: Color, mv: Option<Point> },
    /// The deadline passed first.
    Unknown,
}

/// Result of generating a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMove {
    Play(Point),
    Resign,
}

/// Deadline for a search starting now.
///
/// A zero limit means no deadline, as does a limit too large to represent.
fn deadline(time_limit: Duration) -> Option<Instant> {
    if time_limit.is_zero() {
        return None;
    }
    Instant::now().checked_add(time_limit)
}

/// Solve `pos` for its player to move within `config.time_limit`.
pub fn solve(pos: &Position, config: &EngineConfig) -> Outcome {
    let mover = pos.to_play;
    let mut solver = Solver::new(pos.clone(), config.solver);
    if let Some(at) = deadline(config.time_limit) {
        solver = solver.with_deadline(at);
    }
    match solver.solve() {
        Ok(entry) if entry.win => Outcome::Win {
            winner: mover,
            mv: entry.mv,
        },
        Ok(_) => Outcome::Win {
            winner: mover.opponent(),
            mv: None,
        },
        Err(SolveError::Timeout) => {
            info!(
                nodes = solver.nodes(),
                limit_secs = config.time_limit.as_secs(),
                "solve timed out"
            );
            Outcome::Unknown
        }
    }
}

/// Choose a move for `color`, play it on `pos`, and return it.
///
/// Plays a proven winning move when the solver finds one in time, otherwise
/// a uniformly random legal move. Resigns only when `color` has no legal
/// move at all.
pub fn generate_move(
    pos: &mut Position,
    color: Color,
    config: &EngineConfig,
    rng: &mut fastrand::Rng,
) -> GenMove {
    let legal = pos.legal_moves(color);
    if legal.is_empty() {
        info!(%color, "no legal move, resigning");
        return GenMove::Resign;
    }

    let mut search_pos = pos.clone();
    search_pos.to_play = color;
    let mv = match solve(&search_pos, config) {
        Outcome::Win {
            winner,
            mv: Some(mv),
        } if winner == color => {
            debug!(%color, mv = %pos.format_point(mv), "playing proven win");
            mv
        }
        outcome => {
            debug!(%color, ?outcome, "no proven win, playing random move");
            legal[rng.usize(..legal.len())]
        }
    };

    match pos.play(mv, color) {
        Ok(()) => GenMove::Play(mv),
        // Both sources only yield legal moves; fall back to resigning rather
        // than playing an illegal one.
        Err(err) => {
            info!(%color, %err, "generated move rejected");
            GenMove::Resign
        }
    }
}
