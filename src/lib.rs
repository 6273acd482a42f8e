//! NoGo-Solver: an exhaustive solver and GTP player for NoGo.
//!
//! NoGo is played on a Go board, but capturing and suicide are both illegal
//! and a player with no legal move loses. This crate decides whether the
//! player to move can force a win and, if so, names a winning move.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, engine defaults, heuristic weights
//! - [`board`] - Player colors and a plain 2D color grid
//! - [`position`] - Padded board model with NoGo legality and play/undo
//! - [`symmetry`] - The 8 dihedral transforms of the board
//! - [`transposition`] - Zobrist-style fingerprints and the result table
//! - [`heuristic`] - Eye statistics used to order moves
//! - [`solver`] - Memoized boolean negamax
//! - [`engine`] - Deadline-bounded `solve` and `genmove`
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use nogo_solver::board::Color;
//! use nogo_solver::engine::{EngineConfig, Outcome, solve};
//! use nogo_solver::position::Position;
//!
//! let mut pos = Position::new(3);
//! pos.play(pos.parse_point("b2").unwrap(), Color::Black).unwrap();
//!
//! match solve(&pos, &EngineConfig::default()) {
//!     Outcome::Win { winner, mv } => println!("{winner} wins {mv:?}"),
//!     Outcome::Unknown => println!("out of time"),
//! }
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod gtp;
pub mod heuristic;
pub mod position;
pub mod solver;
pub mod symmetry;
pub mod transposition;
