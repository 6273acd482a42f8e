//! Constants for board geometry, engine defaults, and heuristic weights.
//!
//! The board uses a 1D array representation with border padding. Unlike a
//! fixed-size Go engine the NoGo board is resized at runtime through the
//! `boardsize` command, so geometry is expressed as functions of `size`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board (a 2x2 play area).
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board, bounded by the GTP column letters.
pub const MAX_BOARD_SIZE: usize = 25;

/// Board size used at startup.
pub const DEFAULT_BOARD_SIZE: usize = 7;

/// Width of one row in the padded array (one shared border column).
#[inline]
pub const fn stride(size: usize) -> usize {
    size + 1
}

/// Total padded array length for a board of the given size.
///
/// Rows `0` and `size + 1` are border rows, column `0` is the border column
/// shared between consecutive rows.
#[inline]
pub const fn array_len(size: usize) -> usize {
    (size + 1) * (size + 2) + 1
}

/// GTP column letters; `I` is skipped by convention.
pub const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Engine Defaults
// =============================================================================

/// Default wall-clock budget for `solve` and `genmove`, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 1;

/// Name reported by the GTP `name` command.
pub const ENGINE_NAME: &str = "nogo-solver";

/// Game id reported to GoGui.
pub const GAME_ID: &str = "NoGo";

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Weight of a full eye (a point only its owner can ever play).
pub const EYE_WEIGHT: i32 = 10;

/// Weight of a near eye (one stone away from becoming an eye).
pub const NEAR_EYE_WEIGHT: i32 = 3;

// =============================================================================
// Cell Contents (as bytes for direct comparison)
// =============================================================================

/// Black stone.
pub const STONE_BLACK: u8 = b'X';

/// White stone.
pub const STONE_WHITE: u8 = b'O';

/// Empty point.
pub const EMPTY: u8 = b'.';

/// Out of bounds (padding).
pub const OUT: u8 = b' ';
