//! Game engine integrating board, rules and turn flow
//!
//! Single source of truth for board contents, action legality, win
//! detection and skill semantics. The caller (UI, bot driver, demo CLI)
//! submits placements and skill actions; the engine validates, mutates,
//! and reports verdicts.
//!
//! A completed five-in-a-row is provisional: it is held as a pending win
//! and only confirmed after it survives one opponent turn. If the
//! opponent's reply completes a five of their own, the opponent wins
//! instead; if a skill played in the reply breaks the line, nobody wins.
//! This grace window is deliberate game design and is what makes the
//! defensive skills worth holding.
//!
//! # Example
//!
//! ```
//! use caro::{GameEngine, Player, Point};
//!
//! let mut game = GameEngine::new();
//! game.place(Player::X, Point::new(0, 0)).unwrap();
//! game.place(Player::O, Point::new(1, 0)).unwrap();
//! assert_eq!(game.current_player(), Player::X);
//! assert!(game.winner().is_none());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Bounds, Player, Point};
use crate::config::GameConfig;
use crate::rules::{self, skills, Line, Skill, UsedSkills};

/// Why an action was not applied.
///
/// Rejections never mutate state; the engine stays usable for the next
/// valid action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    /// The submitted target is not legal right now (occupied or locked
    /// cell, or a placement while a skill awaits its target).
    IllegalTarget,
    /// The target's ownership does not fit the action (erase/convert
    /// need an opponent piece, a move source must be the actor's own).
    WrongOwnership,
    /// The acting player has already used this skill this match.
    SkillAlreadyConsumed,
    /// The action was submitted by a player who is not the current mover.
    ActorMismatch,
    /// The match already has a winner.
    MatchOver,
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Reject::IllegalTarget => "target cell is not playable",
            Reject::WrongOwnership => "target is not owned by the right player",
            Reject::SkillAlreadyConsumed => "skill already used this match",
            Reject::ActorMismatch => "not this player's turn",
            Reject::MatchOver => "match is already over",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Reject {}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// A confirmed five-in-a-row.
    FiveInRow,
    /// The opponent conceded.
    Concession,
    /// The opponent's clock ran out.
    Timeout,
}

/// Terminal result of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub player: Player,
    /// The winning line, present for five-in-a-row wins.
    pub line: Option<Line>,
    pub reason: WinReason,
}

/// A five-in-a-row awaiting confirmation (see module docs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWin {
    pub player: Player,
    pub line: Line,
}

/// Result of a skill action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillOutcome {
    /// The skill's effect has fully resolved (and is now consumed).
    pub resolved: bool,
    /// The action ended the acting player's turn.
    pub consumes_turn: bool,
}

/// Observable phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current mover may place or arm a skill.
    AwaitingPlacement,
    /// A skill is armed and waiting for its target.
    SkillArmed(Skill),
    /// MOVE has its source picked and waits for a destination.
    SkillAwaitingSecondTarget(Skill),
    /// Terminal; every further action is rejected.
    MatchOver,
}

/// Mid-turn interaction state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum InFlight {
    /// MOVE's picked source cell.
    MoveSource(Point),
    /// DOUBLE's extra-placement allowance for this turn.
    Double { user: Player, placed: u8 },
}

/// The match-scoped aggregate and its operations.
///
/// Created at match start, replaced wholesale on restart. Serializable
/// as one flat record so an external save layer can snapshot and resume
/// a match mid-play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    bounds: Bounds,
    current: Player,
    move_count: u32,
    used_skills: UsedSkills,
    armed_skill: Option<Skill>,
    in_flight: Option<InFlight>,
    pending_win: Option<PendingWin>,
    winner: Option<Verdict>,
}

impl GameEngine {
    /// New match with default configuration. Player X moves first.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// New match with the given configuration.
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            bounds: Bounds::centered(config.initial_half_extent()),
            config,
            board: Board::new(),
            current: Player::X,
            move_count: 0,
            used_skills: UsedSkills::default(),
            armed_skill: None,
            in_flight: None,
            pending_win: None,
            winner: None,
        }
    }

    /// Reset the whole aggregate for a fresh match, keeping the
    /// configuration. Bounds return to the initial centered square.
    pub fn restart(&mut self) {
        *self = Self::with_config(self.config);
    }

    // --- accessors -----------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Completed turns so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn winner(&self) -> Option<&Verdict> {
        self.winner.as_ref()
    }

    pub fn pending_win(&self) -> Option<&PendingWin> {
        self.pending_win.as_ref()
    }

    pub fn skill_used(&self, player: Player, skill: Skill) -> bool {
        self.used_skills.of(player).contains(skill)
    }

    /// MOVE's picked source, while awaiting a destination.
    pub fn pending_move_source(&self) -> Option<Point> {
        match self.in_flight {
            Some(InFlight::MoveSource(p)) => Some(p),
            _ => None,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        if self.winner.is_some() {
            return TurnPhase::MatchOver;
        }
        if let Some(InFlight::MoveSource(_)) = self.in_flight {
            return TurnPhase::SkillAwaitingSecondTarget(Skill::Move);
        }
        match self.armed_skill {
            Some(skill) => TurnPhase::SkillArmed(skill),
            None => TurnPhase::AwaitingPlacement,
        }
    }

    // --- win detection -------------------------------------------------

    /// Five-in-a-row through a point for `owner`, if any.
    pub fn check_five_in_row(&self, p: Point, owner: Player) -> Option<Line> {
        rules::five_line_at(&self.board, p, owner, &self.config.dirs)
    }

    /// Five-in-a-row anywhere on the board for `owner`, if any.
    pub fn any_five_in_row(&self, owner: Player) -> Option<Line> {
        rules::any_five(&self.board, owner, &self.config.dirs)
    }

    // --- actions -------------------------------------------------------

    /// Place a piece for `player` at `target`.
    ///
    /// Ends the turn unless a DOUBLE allowance still has a placement
    /// left. A placement that completes a five-in-a-row records a
    /// pending win; confirmation happens after the opponent's reply.
    pub fn place(&mut self, player: Player, target: Point) -> Result<(), Reject> {
        self.guard_turn(player)?;
        if self.armed_skill.is_some() || self.pending_move_source().is_some() {
            // a skill is waiting for its target
            return Err(Reject::IllegalTarget);
        }
        if !self.board.is_free(target) {
            return Err(Reject::IllegalTarget);
        }

        self.bounds
            .expand_for(target, self.config.expand_threshold, self.config.expand_amount);
        self.board.set_owner(target, player);

        if let Some(line) = self.check_five_in_row(target, player) {
            // an opponent's outstanding pending win is never displaced;
            // the end-of-turn re-check settles who actually won
            let own_record = self
                .pending_win
                .as_ref()
                .map_or(true, |pw| pw.player == player);
            if own_record {
                self.pending_win = Some(PendingWin { player, line });
            }
        }

        if let Some(InFlight::Double { user, placed }) = &mut self.in_flight {
            if *user == player {
                *placed += 1;
                if *placed < 2 {
                    return Ok(());
                }
            }
        }

        self.end_turn();
        Ok(())
    }

    /// Arm a skill for the current mover. The next `apply_skill` call
    /// supplies the target; `cancel_skill` backs out.
    pub fn arm_skill(&mut self, player: Player, skill: Skill) -> Result<(), Reject> {
        self.guard_turn(player)?;
        if self.used_skills.of(player).contains(skill) {
            return Err(Reject::SkillAlreadyConsumed);
        }
        self.armed_skill = Some(skill);
        Ok(())
    }

    /// Disarm any armed skill and abandon a pending MOVE source.
    pub fn cancel_skill(&mut self, player: Player) -> Result<(), Reject> {
        self.guard_turn(player)?;
        self.armed_skill = None;
        if self.pending_move_source().is_some() {
            self.in_flight = None;
        }
        Ok(())
    }

    /// Apply a skill action at `target`.
    ///
    /// ERASE, LOCK and CONVERT resolve in one call and end the turn.
    /// MOVE takes two calls (source, then destination); the first leaves
    /// the turn open, and an invalid destination keeps the source picked.
    /// DOUBLE resolves immediately, ignores `target`, and leaves the
    /// turn open for up to two placements.
    pub fn apply_skill(
        &mut self,
        skill: Skill,
        player: Player,
        target: Point,
    ) -> Result<SkillOutcome, Reject> {
        self.guard_turn(player)?;
        if self.used_skills.of(player).contains(skill) {
            return Err(Reject::SkillAlreadyConsumed);
        }

        let outcome = match skill {
            Skill::Erase => {
                skills::erase(&mut self.board, player, target)?;
                self.consume(player, skill);
                SkillOutcome {
                    resolved: true,
                    consumes_turn: true,
                }
            }
            Skill::Lock => {
                skills::lock(&mut self.board, target)?;
                self.consume(player, skill);
                SkillOutcome {
                    resolved: true,
                    consumes_turn: true,
                }
            }
            Skill::Convert => {
                skills::convert(&mut self.board, player, target)?;
                self.consume(player, skill);
                SkillOutcome {
                    resolved: true,
                    consumes_turn: true,
                }
            }
            Skill::Move => match self.pending_move_source() {
                Some(source) => {
                    skills::relocate(&mut self.board, player, source, target)?;
                    self.bounds.expand_for(
                        target,
                        self.config.expand_threshold,
                        self.config.expand_amount,
                    );
                    self.in_flight = None;
                    self.consume(player, skill);
                    SkillOutcome {
                        resolved: true,
                        consumes_turn: true,
                    }
                }
                None => {
                    if self.board.owner_at(target) != Some(player) {
                        return Err(Reject::WrongOwnership);
                    }
                    self.in_flight = Some(InFlight::MoveSource(target));
                    SkillOutcome {
                        resolved: false,
                        consumes_turn: false,
                    }
                }
            },
            Skill::Double => {
                self.consume(player, skill);
                self.in_flight = Some(InFlight::Double {
                    user: player,
                    placed: 0,
                });
                SkillOutcome {
                    resolved: true,
                    consumes_turn: false,
                }
            }
        };

        if outcome.consumes_turn {
            self.end_turn();
        }
        Ok(outcome)
    }

    /// The acting player gives up; their opponent wins.
    pub fn concede(&mut self, player: Player) -> Result<(), Reject> {
        if self.winner.is_some() {
            return Err(Reject::MatchOver);
        }
        self.declare(player.opponent(), None, WinReason::Concession);
        Ok(())
    }

    /// The given player's clock ran out; their opponent wins.
    pub fn timeout(&mut self, player: Player) -> Result<(), Reject> {
        if self.winner.is_some() {
            return Err(Reject::MatchOver);
        }
        self.declare(player.opponent(), None, WinReason::Timeout);
        Ok(())
    }

    // --- internals -----------------------------------------------------

    fn guard_turn(&self, player: Player) -> Result<(), Reject> {
        if self.winner.is_some() {
            return Err(Reject::MatchOver);
        }
        if player != self.current {
            return Err(Reject::ActorMismatch);
        }
        Ok(())
    }

    fn consume(&mut self, player: Player, skill: Skill) {
        self.used_skills.of_mut(player).insert(skill);
        self.armed_skill = None;
    }

    /// Close the current mover's turn: settle any pending win that has
    /// now survived (or not) its grace window, then hand over.
    fn end_turn(&mut self) {
        let mover = self.current;
        self.armed_skill = None;
        self.in_flight = None;

        if let Some(pending) = self.pending_win.clone() {
            if pending.player != mover {
                // the provisional winner's opponent has replied
                self.pending_win = None;

                // a counter-completion by the replying side takes priority
                if let Some(line) = self.any_five_in_row(mover) {
                    self.declare(mover, Some(line), WinReason::FiveInRow);
                    return;
                }
                // otherwise the original win stands if the line survived
                if let Some(line) = self.any_five_in_row(pending.player) {
                    self.declare(pending.player, Some(line), WinReason::FiveInRow);
                    return;
                }
            }
        }

        self.current = mover.opponent();
        self.move_count += 1;
    }

    fn declare(&mut self, player: Player, line: Option<Line>, reason: WinReason) {
        self.winner = Some(Verdict {
            player,
            line,
            reason,
        });
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn place_row(game: &mut GameEngine, player: Player, y: i32, xs: std::ops::Range<i32>) {
        // interleave far-away filler moves for the other side so turns alternate
        let mut filler_x = 100;
        for x in xs {
            if game.current_player() != player {
                game.place(game.current_player(), Point::new(filler_x, 100))
                    .unwrap();
                filler_x += 1;
            }
            game.place(player, Point::new(x, y)).unwrap();
        }
    }

    #[test]
    fn test_new_match_defaults() {
        let game = GameEngine::new();
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.move_count(), 0);
        assert_eq!(*game.bounds(), Bounds::centered(7));
        assert_eq!(game.phase(), TurnPhase::AwaitingPlacement);
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_place_alternates_turns() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(game.move_count(), 1);

        game.place(Player::O, Point::new(1, 0)).unwrap();
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_place_rejects_wrong_actor() {
        let mut game = GameEngine::new();
        assert_eq!(
            game.place(Player::O, Point::new(0, 0)),
            Err(Reject::ActorMismatch)
        );
        assert!(game.board().is_free(Point::new(0, 0)));
    }

    #[test]
    fn test_place_rejects_occupied_and_locked() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();
        assert_eq!(
            game.place(Player::O, Point::new(0, 0)),
            Err(Reject::IllegalTarget)
        );

        game.arm_skill(Player::O, Skill::Lock).unwrap();
        game.apply_skill(Skill::Lock, Player::O, Point::new(2, 2))
            .unwrap();
        assert_eq!(
            game.place(Player::X, Point::new(2, 2)),
            Err(Reject::IllegalTarget)
        );
    }

    #[test]
    fn test_placement_outside_bounds_is_legal() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(500, -500)).unwrap();
        assert_eq!(game.board().owner_at(Point::new(500, -500)), Some(Player::X));
    }

    #[test]
    fn test_bounds_expand_near_left_edge() {
        // threshold 3, amount 5: landing at min_x + 1 pushes min_x out by 5
        let mut game = GameEngine::new();
        let old_min = game.bounds().min_x;
        game.place(Player::X, Point::new(old_min + 1, 0)).unwrap();
        assert_eq!(game.bounds().min_x, old_min - 5);
    }

    #[test]
    fn test_bounds_never_shrink_during_match() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(6, 6)).unwrap();
        let grown = *game.bounds();
        game.place(Player::O, Point::new(0, 0)).unwrap();
        assert_eq!(*game.bounds(), grown);

        game.restart();
        assert_eq!(*game.bounds(), Bounds::centered(7));
    }

    #[test]
    fn test_five_is_provisional_until_opponent_replies() {
        let mut game = GameEngine::new();
        place_row(&mut game, Player::X, 0, 0..4);

        game.place(game.current_player(), Point::new(100, 101))
            .unwrap(); // O filler
        game.place(Player::X, Point::new(4, 0)).unwrap();

        // five on the board, but not confirmed yet
        assert!(game.any_five_in_row(Player::X).is_some());
        assert!(game.winner().is_none());
        let pending = game.pending_win().unwrap();
        assert_eq!(pending.player, Player::X);

        // O replies somewhere harmless; the win is confirmed
        game.place(Player::O, Point::new(50, 50)).unwrap();
        let verdict = game.winner().unwrap();
        assert_eq!(verdict.player, Player::X);
        assert_eq!(verdict.reason, WinReason::FiveInRow);
        let line = verdict.line.unwrap();
        assert_eq!(line[0], Point::new(0, 0));
        assert_eq!(line[4], Point::new(4, 0));
    }

    #[test]
    fn test_counter_completion_overrides_pending_win() {
        let mut game = GameEngine::new();
        // O builds four at y = 1 while X builds four at y = 0
        for x in 0..4 {
            game.place(Player::X, Point::new(x, 0)).unwrap();
            game.place(Player::O, Point::new(x, 1)).unwrap();
        }
        game.place(Player::X, Point::new(4, 0)).unwrap();
        assert!(game.winner().is_none());

        // O completes its own five on the reply: O wins, not X
        game.place(Player::O, Point::new(4, 1)).unwrap();
        let verdict = game.winner().unwrap();
        assert_eq!(verdict.player, Player::O);
    }

    #[test]
    fn test_erase_negates_pending_win() {
        let mut game = GameEngine::new();
        for x in 0..4 {
            game.place(Player::X, Point::new(x, 0)).unwrap();
            game.place(Player::O, Point::new(x, 5)).unwrap();
        }
        game.place(Player::X, Point::new(4, 0)).unwrap();
        assert!(game.pending_win().is_some());

        // O erases a stone out of the provisional line
        game.apply_skill(Skill::Erase, Player::O, Point::new(2, 0))
            .unwrap();

        assert!(game.winner().is_none());
        assert!(game.pending_win().is_none());
        assert!(game.board().is_free(Point::new(2, 0)));
        assert_eq!(game.current_player(), Player::X);
    }

    #[test]
    fn test_convert_negates_pending_win() {
        let mut game = GameEngine::new();
        for x in 0..4 {
            game.place(Player::X, Point::new(x, 0)).unwrap();
            game.place(Player::O, Point::new(x, 5)).unwrap();
        }
        game.place(Player::X, Point::new(4, 0)).unwrap();

        game.apply_skill(Skill::Convert, Player::O, Point::new(2, 0))
            .unwrap();

        assert!(game.winner().is_none());
        assert_eq!(game.board().owner_at(Point::new(2, 0)), Some(Player::O));
    }

    #[test]
    fn test_convert_completing_a_five_wins_on_resolution() {
        let mut game = GameEngine::new();
        // O has four at y = 1 with a gap at x = 2 held by X
        for x in 0..4 {
            game.place(Player::X, Point::new(x, 0)).unwrap();
            game.place(Player::O, Point::new(x, 1)).unwrap();
        }
        game.place(Player::X, Point::new(4, 1)).unwrap(); // X blocks O's row end
        game.place(Player::O, Point::new(5, 1)).unwrap();
        game.place(Player::X, Point::new(4, 0)).unwrap(); // X completes its five

        // O converts X's blocker at (4, 1): O now owns x = 0..=5 at y = 1
        game.apply_skill(Skill::Convert, Player::O, Point::new(4, 1))
            .unwrap();

        let verdict = game.winner().unwrap();
        assert_eq!(verdict.player, Player::O);
        assert_eq!(verdict.reason, WinReason::FiveInRow);
    }

    #[test]
    fn test_skill_single_use_per_player() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();

        game.apply_skill(Skill::Erase, Player::O, Point::new(0, 0))
            .unwrap();
        game.place(Player::X, Point::new(0, 0)).unwrap();

        // O's erase is spent; a second use rejects without mutating
        assert_eq!(
            game.apply_skill(Skill::Erase, Player::O, Point::new(0, 0)),
            Err(Reject::SkillAlreadyConsumed)
        );
        assert_eq!(game.board().owner_at(Point::new(0, 0)), Some(Player::X));

        // X still has its own erase
        game.place(Player::O, Point::new(9, 9)).unwrap();
        game.apply_skill(Skill::Erase, Player::X, Point::new(9, 9))
            .unwrap();
        assert!(game.board().is_free(Point::new(9, 9)));
    }

    #[test]
    fn test_erase_rejects_own_piece_and_empty_cell() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();
        game.place(Player::O, Point::new(1, 1)).unwrap();

        assert_eq!(
            game.apply_skill(Skill::Erase, Player::X, Point::new(0, 0)),
            Err(Reject::WrongOwnership)
        );
        assert_eq!(
            game.apply_skill(Skill::Erase, Player::X, Point::new(5, 5)),
            Err(Reject::WrongOwnership)
        );
        // failed attempts did not consume the skill
        assert!(!game.skill_used(Player::X, Skill::Erase));
    }

    #[test]
    fn test_move_skill_two_step_flow() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(2, 2)).unwrap();
        game.place(Player::O, Point::new(0, 0)).unwrap();

        // first click: pick the source; turn stays open
        game.arm_skill(Player::X, Skill::Move).unwrap();
        let outcome = game
            .apply_skill(Skill::Move, Player::X, Point::new(2, 2))
            .unwrap();
        assert!(!outcome.resolved);
        assert!(!outcome.consumes_turn);
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(
            game.phase(),
            TurnPhase::SkillAwaitingSecondTarget(Skill::Move)
        );
        assert!(!game.skill_used(Player::X, Skill::Move));

        // invalid destination: source stays picked
        assert_eq!(
            game.apply_skill(Skill::Move, Player::X, Point::new(0, 0)),
            Err(Reject::IllegalTarget)
        );
        assert_eq!(game.pending_move_source(), Some(Point::new(2, 2)));

        // valid destination: relocation, consumption, turn passes
        let outcome = game
            .apply_skill(Skill::Move, Player::X, Point::new(5, 5))
            .unwrap();
        assert!(outcome.resolved);
        assert!(outcome.consumes_turn);
        assert!(game.board().is_free(Point::new(2, 2)));
        assert_eq!(game.board().owner_at(Point::new(5, 5)), Some(Player::X));
        assert!(game.skill_used(Player::X, Skill::Move));
        assert_eq!(game.current_player(), Player::O);
    }

    #[test]
    fn test_move_source_must_be_own_piece() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();

        assert_eq!(
            game.apply_skill(Skill::Move, Player::O, Point::new(0, 0)),
            Err(Reject::WrongOwnership)
        );
    }

    #[test]
    fn test_move_destination_expands_bounds() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();
        game.place(Player::O, Point::new(1, 1)).unwrap();

        let old_max = game.bounds().max_x;
        game.apply_skill(Skill::Move, Player::X, Point::new(0, 0))
            .unwrap();
        game.apply_skill(Skill::Move, Player::X, Point::new(old_max + 1, 0))
            .unwrap();
        assert!(game.bounds().max_x > old_max);
    }

    #[test]
    fn test_double_allows_two_placements() {
        let mut game = GameEngine::new();

        let outcome = game
            .apply_skill(Skill::Double, Player::X, Point::new(0, 0))
            .unwrap();
        assert!(outcome.resolved);
        assert!(!outcome.consumes_turn);
        assert!(game.skill_used(Player::X, Skill::Double));

        game.place(Player::X, Point::new(0, 0)).unwrap();
        assert_eq!(game.current_player(), Player::X, "first of two placements");

        game.place(Player::X, Point::new(1, 0)).unwrap();
        assert_eq!(game.current_player(), Player::O, "second placement ends turn");
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_double_completing_five_still_waits_for_reply() {
        let mut game = GameEngine::new();
        place_row(&mut game, Player::X, 0, 0..3);
        game.place(game.current_player(), Point::new(100, 101))
            .unwrap(); // O filler

        game.apply_skill(Skill::Double, Player::X, Point::new(0, 0))
            .unwrap();
        game.place(Player::X, Point::new(3, 0)).unwrap();
        game.place(Player::X, Point::new(4, 0)).unwrap();

        assert!(game.winner().is_none());
        assert_eq!(game.pending_win().unwrap().player, Player::X);

        game.place(Player::O, Point::new(60, 60)).unwrap();
        assert_eq!(game.winner().unwrap().player, Player::X);
    }

    #[test]
    fn test_armed_skill_blocks_plain_placement() {
        let mut game = GameEngine::new();
        game.arm_skill(Player::X, Skill::Lock).unwrap();
        assert_eq!(game.phase(), TurnPhase::SkillArmed(Skill::Lock));
        assert_eq!(
            game.place(Player::X, Point::new(0, 0)),
            Err(Reject::IllegalTarget)
        );

        game.cancel_skill(Player::X).unwrap();
        assert_eq!(game.phase(), TurnPhase::AwaitingPlacement);
        game.place(Player::X, Point::new(0, 0)).unwrap();
    }

    #[test]
    fn test_cancel_skill_drops_move_source() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(2, 2)).unwrap();
        game.place(Player::O, Point::new(0, 0)).unwrap();

        game.arm_skill(Player::X, Skill::Move).unwrap();
        game.apply_skill(Skill::Move, Player::X, Point::new(2, 2))
            .unwrap();
        game.cancel_skill(Player::X).unwrap();

        assert_eq!(game.pending_move_source(), None);
        assert_eq!(game.phase(), TurnPhase::AwaitingPlacement);
        // the piece never moved and the skill was not consumed
        assert_eq!(game.board().owner_at(Point::new(2, 2)), Some(Player::X));
        assert!(!game.skill_used(Player::X, Skill::Move));
    }

    #[test]
    fn test_arm_rejects_consumed_skill() {
        let mut game = GameEngine::new();
        game.apply_skill(Skill::Lock, Player::X, Point::new(3, 3))
            .unwrap();
        game.place(Player::O, Point::new(0, 0)).unwrap();

        assert_eq!(
            game.arm_skill(Player::X, Skill::Lock),
            Err(Reject::SkillAlreadyConsumed)
        );
    }

    #[test]
    fn test_no_cell_is_both_owned_and_locked() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();
        game.apply_skill(Skill::Lock, Player::O, Point::new(1, 1))
            .unwrap();
        game.place(Player::X, Point::new(2, 2)).unwrap();
        game.apply_skill(Skill::Erase, Player::O, Point::new(0, 0))
            .unwrap();

        for (p, cell) in game.board().entries() {
            match cell {
                Cell::Owned(_) => assert!(!game.board().is_locked(p)),
                Cell::Locked => assert_eq!(game.board().owner_at(p), None),
            }
        }
    }

    #[test]
    fn test_actions_rejected_after_match_over() {
        let mut game = GameEngine::new();
        game.concede(Player::X).unwrap();
        assert_eq!(game.winner().unwrap().player, Player::O);
        assert_eq!(game.winner().unwrap().reason, WinReason::Concession);
        assert_eq!(game.phase(), TurnPhase::MatchOver);

        assert_eq!(
            game.place(Player::X, Point::new(0, 0)),
            Err(Reject::MatchOver)
        );
        assert_eq!(
            game.apply_skill(Skill::Erase, Player::X, Point::new(0, 0)),
            Err(Reject::MatchOver)
        );
        assert_eq!(game.concede(Player::O), Err(Reject::MatchOver));
    }

    #[test]
    fn test_timeout_verdict() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(0, 0)).unwrap();
        game.timeout(Player::O).unwrap();

        let verdict = game.winner().unwrap();
        assert_eq!(verdict.player, Player::X);
        assert_eq!(verdict.reason, WinReason::Timeout);
        assert_eq!(verdict.line, None);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(6, 6)).unwrap();
        game.apply_skill(Skill::Lock, Player::O, Point::new(1, 1))
            .unwrap();
        game.restart();

        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.move_count(), 0);
        assert!(game.board().is_free(Point::new(6, 6)));
        assert!(game.board().is_free(Point::new(1, 1)));
        assert!(!game.skill_used(Player::O, Skill::Lock));
        assert_eq!(*game.bounds(), Bounds::centered(7));
    }

    #[test]
    fn test_snapshot_round_trip_mid_match() {
        let mut game = GameEngine::new();
        for x in 0..4 {
            game.place(Player::X, Point::new(x, 0)).unwrap();
            game.place(Player::O, Point::new(x, 5)).unwrap();
        }
        game.apply_skill(Skill::Double, Player::X, Point::new(0, 0))
            .unwrap();
        game.place(Player::X, Point::new(4, 0)).unwrap(); // pending win, turn open

        let json = serde_json::to_string(&game).unwrap();
        let mut restored: GameEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(game, restored);

        // the resumed match plays on exactly like the original
        restored.place(Player::X, Point::new(10, 10)).unwrap();
        restored.place(Player::O, Point::new(11, 11)).unwrap();
        assert_eq!(restored.winner().unwrap().player, Player::X);
    }

    #[test]
    fn test_snapshot_round_trip_with_move_source() {
        let mut game = GameEngine::new();
        game.place(Player::X, Point::new(2, 2)).unwrap();
        game.place(Player::O, Point::new(3, 3)).unwrap();
        game.arm_skill(Player::X, Skill::Move).unwrap();
        game.apply_skill(Skill::Move, Player::X, Point::new(2, 2))
            .unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.pending_move_source(), Some(Point::new(2, 2)));
        assert_eq!(
            restored.phase(),
            TurnPhase::SkillAwaitingSecondTarget(Skill::Move)
        );
    }
}
