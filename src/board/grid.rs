//! Sparse cell storage
//!
//! Cells are stored only when non-default: absence of a key means
//! empty-and-unlocked. A cell is either owned or locked, never both,
//! which the `Cell` enum enforces by construction. The map is keyed by
//! lattice coordinates so the playable area can grow without bound.

use std::collections::HashMap;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::{Player, Point};

/// Contents of a non-empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Cell {
    /// Occupied by a player's piece.
    Owned(Player),
    /// Blocked, unowned, permanently unplayable.
    Locked,
}

/// Sparse board over the unbounded lattice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: HashMap<Point, Cell>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Get the cell at a position, `None` when empty-and-unlocked.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Cell> {
        self.cells.get(&p).copied()
    }

    /// Owner of the piece at a position, if occupied.
    #[inline]
    pub fn owner_at(&self, p: Point) -> Option<Player> {
        match self.cells.get(&p) {
            Some(Cell::Owned(player)) => Some(*player),
            _ => None,
        }
    }

    /// Check if a position is locked.
    #[inline]
    pub fn is_locked(&self, p: Point) -> bool {
        matches!(self.cells.get(&p), Some(Cell::Locked))
    }

    /// Check if a position is playable (neither occupied nor locked).
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        !self.cells.contains_key(&p)
    }

    /// Write ownership at a position, replacing any previous contents.
    ///
    /// Legality (free target, correct actor) is the engine's concern;
    /// this is the raw mutation.
    #[inline]
    pub fn set_owner(&mut self, p: Point, player: Player) {
        self.cells.insert(p, Cell::Owned(player));
    }

    /// Mark a position locked.
    #[inline]
    pub fn lock(&mut self, p: Point) {
        self.cells.insert(p, Cell::Locked);
    }

    /// Return a position to empty-and-unlocked.
    #[inline]
    pub fn clear(&mut self, p: Point) {
        self.cells.remove(&p);
    }

    /// Iterate over all occupied positions and their owners.
    pub fn occupied(&self) -> impl Iterator<Item = (Point, Player)> + '_ {
        self.cells.iter().filter_map(|(p, c)| match c {
            Cell::Owned(player) => Some((*p, *player)),
            Cell::Locked => None,
        })
    }

    /// Number of occupied positions.
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.occupied().count()
    }

    /// Check if no piece has been placed (locked cells do not count).
    #[inline]
    pub fn has_no_stones(&self) -> bool {
        self.occupied().next().is_none()
    }

    /// All non-default entries in canonical order.
    pub fn entries(&self) -> Vec<(Point, Cell)> {
        let mut entries: Vec<(Point, Cell)> = self.cells.iter().map(|(p, c)| (*p, *c)).collect();
        entries.sort_unstable_by_key(|(p, _)| *p);
        entries
    }
}

// The cell mapping serializes as an ordered entry list so snapshots are
// canonical regardless of hash-map iteration order.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.entries())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(Point, Cell)>::deserialize(deserializer)?;
        Ok(Self {
            cells: entries.into_iter().collect(),
        })
    }
}
