//! Game rules for unbounded five-in-a-row
//!
//! This module implements the rule set:
//! - Win detection (five-in-a-row in four directions)
//! - Skill effects (erase, lock, convert, move, double)

pub mod skills;
pub mod win;

// Re-exports for convenient access
pub use skills::{Skill, SkillSet, UsedSkills};
pub use win::{any_five, count_run, five_line_at, Line, WIN_LEN};
