//! Skill kinds and their board effects
//!
//! Skills bypass normal placement rules. Each kind is usable at most
//! once per player per match; the consumption ledger lives here, while
//! turn sequencing (MOVE's two-step flow, DOUBLE's extra-placement
//! allowance) is orchestrated by the engine.

use std::collections::HashSet;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::board::{Board, Player, Point};
use crate::engine::Reject;

/// The five one-shot skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    /// Remove an opponent piece.
    Erase,
    /// Two placements in one turn.
    Double,
    /// Permanently block an empty cell.
    Lock,
    /// Flip an opponent piece to the acting player.
    Convert,
    /// Relocate one of the acting player's own pieces.
    Move,
}

impl Skill {
    /// All skills, in display order.
    pub const ALL: [Skill; 5] = [
        Skill::Erase,
        Skill::Double,
        Skill::Lock,
        Skill::Convert,
        Skill::Move,
    ];

    /// Stable lowercase name, also the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Skill::Erase => "erase",
            Skill::Double => "double",
            Skill::Lock => "lock",
            Skill::Convert => "convert",
            Skill::Move => "move",
        }
    }
}

/// One player's consumed skills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    used: HashSet<Skill>,
}

impl SkillSet {
    #[inline]
    pub fn contains(&self, skill: Skill) -> bool {
        self.used.contains(&skill)
    }

    #[inline]
    pub fn insert(&mut self, skill: Skill) {
        self.used.insert(skill);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

// Serialized as a name list in display order.
impl Serialize for SkillSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ordered: Vec<Skill> = Skill::ALL
            .iter()
            .copied()
            .filter(|s| self.used.contains(s))
            .collect();
        ordered.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Skill>::deserialize(deserializer)?;
        Ok(Self {
            used: list.into_iter().collect(),
        })
    }
}

/// Both players' consumed skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UsedSkills {
    pub x: SkillSet,
    pub o: SkillSet,
}

impl UsedSkills {
    #[inline]
    pub fn of(&self, player: Player) -> &SkillSet {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    #[inline]
    pub fn of_mut(&mut self, player: Player) -> &mut SkillSet {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

/// ERASE: clear an opponent piece.
pub(crate) fn erase(board: &mut Board, actor: Player, target: Point) -> Result<(), Reject> {
    match board.owner_at(target) {
        Some(owner) if owner != actor => {
            board.clear(target);
            Ok(())
        }
        _ => Err(Reject::WrongOwnership),
    }
}

/// LOCK: block an empty, unlocked cell for the rest of the match.
pub(crate) fn lock(board: &mut Board, target: Point) -> Result<(), Reject> {
    if board.is_free(target) {
        board.lock(target);
        Ok(())
    } else {
        Err(Reject::IllegalTarget)
    }
}

/// CONVERT: reassign an opponent piece to the acting player.
pub(crate) fn convert(board: &mut Board, actor: Player, target: Point) -> Result<(), Reject> {
    match board.owner_at(target) {
        Some(owner) if owner != actor => {
            board.set_owner(target, actor);
            Ok(())
        }
        _ => Err(Reject::WrongOwnership),
    }
}

/// MOVE (second step): vacate `from` and occupy `to` with the same owner.
pub(crate) fn relocate(
    board: &mut Board,
    actor: Player,
    from: Point,
    to: Point,
) -> Result<(), Reject> {
    if board.owner_at(from) != Some(actor) {
        return Err(Reject::WrongOwnership);
    }
    if !board.is_free(to) {
        return Err(Reject::IllegalTarget);
    }
    board.clear(from);
    board.set_owner(to, actor);
    Ok(())
}
