//! Caro engine: unbounded five-in-a-row with one-shot skills
//!
//! Rules engine and heuristic opponent for a five-in-a-row (Caro) game
//! on an effectively infinite board:
//! - Sparse grid: cells are stored only when occupied or locked, so the
//!   playable area grows without bound over a long match
//! - Active bounds that expand whenever a piece lands near an edge
//! - Win detection in four directions, with a one-turn grace window: a
//!   completed five is provisional until it survives the opponent's
//!   reply, so defensive skills can still negate it
//! - Five one-shot skills per player: erase, double-move, lock, convert
//!   and move
//! - A single-ply heuristic AI at three strength tiers
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: sparse grid, cell model and active bounds
//! - [`rules`]: win detection and skill effects
//! - [`engine`]: turn sequencing, skill flow, verdicts
//! - [`ai`]: candidate generation and move scoring
//! - [`config`]: externally supplied match constants
//!
//! # Quick Start
//!
//! ```
//! use caro::{ai, Difficulty, GameEngine, Player, Point};
//!
//! let mut game = GameEngine::new();
//!
//! // Human plays X
//! game.place(Player::X, Point::new(0, 0)).unwrap();
//!
//! // Computer replies as O
//! let mut rng = rand::thread_rng();
//! let reply = ai::compute_move(
//!     game.board(),
//!     game.bounds(),
//!     game.config(),
//!     Player::O,
//!     Difficulty::Normal,
//!     &mut rng,
//! );
//! if let Some(p) = reply {
//!     game.place(Player::O, p).unwrap();
//! }
//! assert!(game.winner().is_none());
//! ```
//!
//! Rendering, input handling, audio, chat and matchmaking live outside
//! this crate; the engine only consumes validated actions and reports
//! state transitions. The whole aggregate is serde-serializable so a
//! save layer can snapshot and resume a match mid-play.

pub mod ai;
pub mod board;
pub mod config;
pub mod engine;
pub mod rules;

// Re-export commonly used types for convenience
pub use ai::Difficulty;
pub use board::{Board, Bounds, Cell, Player, Point};
pub use config::GameConfig;
pub use engine::{GameEngine, PendingWin, Reject, SkillOutcome, TurnPhase, Verdict, WinReason};
pub use rules::{Line, Skill};
