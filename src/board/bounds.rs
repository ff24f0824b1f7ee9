//! Active-region bounds with on-demand expansion
//!
//! The bounds rectangle is the currently "active" part of the lattice,
//! used for display and for AI candidate search. It is not a placement
//! constraint: pieces may land at any coordinate. During a match the
//! rectangle only ever grows; it resets to the initial centered square
//! on explicit restart.

use serde::{Deserialize, Serialize};

use super::Point;

/// Inclusive rectangle of active lattice cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Square bounds of the given half-extent centered on the origin.
    pub fn centered(half_extent: i32) -> Self {
        Self {
            min_x: -half_extent,
            max_x: half_extent,
            min_y: -half_extent,
            max_y: half_extent,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Midpoint of the rectangle, rounded toward negative infinity.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point {
            x: (self.min_x + self.max_x).div_euclid(2),
            y: (self.min_y + self.max_y).div_euclid(2),
        }
    }

    /// Grow any edge the landing point came within `threshold` cells of.
    ///
    /// All four edges are tested independently against the pre-expansion
    /// rectangle, so a landing near a corner grows two edges at once.
    /// Returns true if any edge moved.
    pub fn expand_for(&mut self, p: Point, threshold: i32, amount: i32) -> bool {
        let before = *self;
        if p.x - before.min_x < threshold {
            self.min_x -= amount;
        }
        if before.max_x - p.x < threshold {
            self.max_x += amount;
        }
        if p.y - before.min_y < threshold {
            self.min_y -= amount;
        }
        if before.max_y - p.y < threshold {
            self.max_y += amount;
        }
        *self != before
    }
}
