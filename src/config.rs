//! Match configuration
//!
//! The engine takes these values at match start instead of hardcoding them,
//! so the hosting application can tune board growth and line geometry.

use serde::{Deserialize, Serialize};

use crate::board::Dir;

/// Default side length of the initial active region (15x15).
pub const INITIAL_BOARD_SIZE: i32 = 15;

/// Default distance-to-edge at which the active region grows.
pub const EXPAND_THRESHOLD: i32 = 3;

/// Default number of cells added per expansion.
pub const EXPAND_AMOUNT: i32 = 5;

/// Default direction vectors for line counting:
/// horizontal, vertical, diagonal SE, diagonal SW.
pub const DIRS: [Dir; 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Per-match configuration consumed by the engine at match start.
///
/// Carried inside the state snapshot so a resumed match keeps the
/// settings it started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the initial active region.
    pub initial_board_size: i32,
    /// A landing this close to an edge triggers expansion of that edge.
    pub expand_threshold: i32,
    /// Cells added to an edge per expansion.
    pub expand_amount: i32,
    /// The four direction vectors used for line counting, in check order.
    pub dirs: [Dir; 4],
}

impl GameConfig {
    /// Half-extent of the initial centered bounds.
    #[inline]
    pub fn initial_half_extent(&self) -> i32 {
        self.initial_board_size / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_board_size: INITIAL_BOARD_SIZE,
            expand_threshold: EXPAND_THRESHOLD,
            expand_amount: EXPAND_AMOUNT,
            dirs: DIRS,
        }
    }
}
