//! Candidate generation and point scoring
//!
//! A single-ply greedy heuristic: no lookahead, no search tree. Priority
//! order is immediate win > blocking a near-complete opponent line >
//! extending own lines, with the aggressive variant overweighting
//! offense.

use rand::Rng;

use crate::board::{Board, Bounds, Player, Point};
use crate::config::GameConfig;
use crate::rules::{count_run, WIN_LEN};

/// Score for a cell that cannot be played at all.
pub const REJECTED: f64 = -1e6;

/// Score for a move that completes the AI's own five.
pub const IMMEDIATE_WIN: f64 = 2000.0;

/// Bonus for cutting an opponent run of four or more.
const BLOCK_FOUR: f64 = 120.0;

/// Bonus for cutting an opponent run of three.
const BLOCK_THREE: f64 = 40.0;

/// Chebyshev radius around occupied cells searched for candidates.
const NEIGHBORHOOD: i32 = 2;

/// Candidate cells for the next move.
///
/// On a board with no pieces yet this is the free part of the 5x5 block
/// around the bounds midpoint. Otherwise it is every free cell within
/// Chebyshev distance 2 of an occupied cell and inside the active
/// bounds, a locality cut that avoids scanning the whole rectangle.
/// Occupied cells are visited in canonical order, so the list is
/// deterministic for a given position.
pub fn candidate_points(board: &Board, bounds: &Bounds) -> Vec<Point> {
    if board.has_no_stones() {
        let mid = bounds.midpoint();
        let mut out = Vec::new();
        for dy in -NEIGHBORHOOD..=NEIGHBORHOOD {
            for dx in -NEIGHBORHOOD..=NEIGHBORHOOD {
                let p = Point::new(mid.x + dx, mid.y + dy);
                if board.is_free(p) {
                    out.push(p);
                }
            }
        }
        return out;
    }

    let mut occupied: Vec<Point> = board.occupied().map(|(p, _)| p).collect();
    occupied.sort_unstable();

    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for anchor in occupied {
        for dy in -NEIGHBORHOOD..=NEIGHBORHOOD {
            for dx in -NEIGHBORHOOD..=NEIGHBORHOOD {
                let p = Point::new(anchor.x + dx, anchor.y + dy);
                if !bounds.contains(p) || !seen.insert(p) {
                    continue;
                }
                if board.is_free(p) {
                    out.push(p);
                }
            }
        }
    }
    out
}

/// Would playing at `p` complete a five for `owner`?
fn completes_five(board: &Board, config: &GameConfig, p: Point, owner: Player) -> bool {
    for &(dx, dy) in &config.dirs {
        let left = count_run(board, p, (-dx, -dy), owner);
        let right = count_run(board, p, (dx, dy), owner);
        if left + 1 + right >= WIN_LEN {
            return true;
        }
    }
    false
}

/// Longest contiguous opponent run passing through `p`, both sides
/// summed, not counting `p` itself.
pub fn longest_enemy_run(board: &Board, config: &GameConfig, p: Point, enemy: Player) -> i32 {
    let mut best = 0;
    for &(dx, dy) in &config.dirs {
        let left = count_run(board, p, (-dx, -dy), enemy);
        let right = count_run(board, p, (dx, dy), enemy);
        best = best.max(left + right);
    }
    best
}

/// Sum of line-extension bonuses over the four directions for playing
/// `owner` at `p`. A point extending several lines collects a bonus for
/// each.
pub fn extend_score(board: &Board, config: &GameConfig, p: Point, owner: Player) -> f64 {
    let mut score = 0.0;
    for &(dx, dy) in &config.dirs {
        let left = count_run(board, p, (-dx, -dy), owner);
        let right = count_run(board, p, (dx, dy), owner);
        score += match left + 1 + right {
            len if len >= 4 => 60.0,
            3 => 25.0,
            2 => 8.0,
            1 => 2.0,
            _ => 0.0,
        };
    }
    score
}

/// Score a candidate for `player`, higher is better.
///
/// The jitter in `[0, 0.5)` breaks exact ties between equally scored
/// candidates; immediate wins and rejected cells skip it so those
/// scores stay exact.
pub fn score_point<R: Rng>(
    board: &Board,
    config: &GameConfig,
    p: Point,
    player: Player,
    aggressive: bool,
    rng: &mut R,
) -> f64 {
    if !board.is_free(p) {
        return REJECTED;
    }
    if completes_five(board, config, p, player) {
        return IMMEDIATE_WIN;
    }

    let mut score = 0.0;
    let block = longest_enemy_run(board, config, p, player.opponent());
    if block >= 4 {
        score += BLOCK_FOUR;
    } else if block == 3 {
        score += BLOCK_THREE;
    }

    let extend = extend_score(board, config, p, player);
    score += extend;
    if aggressive {
        score += extend * 0.5;
    }

    score + rng.gen::<f64>() * 0.5
}

/// Best-scoring candidate, first seen wins ties.
pub(super) fn pick_heuristic<R: Rng>(
    board: &Board,
    config: &GameConfig,
    candidates: &[Point],
    player: Player,
    aggressive: bool,
    rng: &mut R,
) -> Option<Point> {
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for &p in candidates {
        let score = score_point(board, config, p, player, aggressive, rng);
        if score > best_score {
            best_score = score;
            best = Some(p);
        }
    }
    best
}
