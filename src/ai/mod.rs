//! Heuristic opponent for single-player mode
//!
//! Given the engine's cell mapping and active bounds, picks one
//! coordinate for the computer side at one of three strength tiers.
//! Pure and synchronous: the caller owns the RNG, so seeded runs are
//! reproducible.

pub mod heuristic;

pub use heuristic::{candidate_points, extend_score, longest_enemy_run, score_point};

use rand::seq::SliceRandom;
use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Bounds, Player, Point};
use crate::config::GameConfig;

/// Opponent strength tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniformly random candidate.
    Easy,
    /// Greedy heuristic, defense and offense weighted evenly.
    Normal,
    /// Greedy heuristic with extra weight on extending own lines.
    Hard,
}

/// Choose a move for `player`, or `None` when no candidate exists.
///
/// The returned cell is always empty and unlocked: candidates are
/// pre-filtered, so even Easy mode cannot pick an unplayable cell.
pub fn compute_move<R: Rng>(
    board: &Board,
    bounds: &Bounds,
    config: &GameConfig,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Point> {
    let candidates = candidate_points(board, bounds);
    if candidates.is_empty() {
        return None;
    }
    match difficulty {
        Difficulty::Easy => candidates.choose(rng).copied(),
        Difficulty::Normal => {
            heuristic::pick_heuristic(board, config, &candidates, player, false, rng)
        }
        Difficulty::Hard => {
            heuristic::pick_heuristic(board, config, &candidates, player, true, rng)
        }
    }
}
