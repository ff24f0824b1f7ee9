//! Caro Engine CLI
//!
//! A command-line walkthrough of the engine: placements, skills, the
//! delayed-win grace window, board expansion and the heuristic AI.

use rand::rngs::ThreadRng;

use caro::{ai, Difficulty, GameEngine, Player, Point, Skill};

fn main() {
    println!("===========================================");
    println!("        Caro Engine v0.1.0");
    println!("===========================================\n");

    let mut rng = rand::thread_rng();

    println!("--- Demo 1: Opening Move ---");
    demo_opening(&mut rng);

    println!("\n--- Demo 2: Blocking a Four ---");
    demo_block(&mut rng);

    println!("\n--- Demo 3: Erase Negates a Provisional Win ---");
    demo_erase_negation();

    println!("\n--- Demo 4: Board Expansion ---");
    demo_expansion();

    println!("\n--- Demo 5: AI vs AI Match ---");
    demo_ai_match(&mut rng);

    println!("\n===========================================");
    println!("           All Demos Completed!");
    println!("===========================================");
}

fn demo_opening(rng: &mut ThreadRng) {
    let game = GameEngine::new();
    match ai::compute_move(
        game.board(),
        game.bounds(),
        game.config(),
        Player::O,
        Difficulty::Normal,
        rng,
    ) {
        Some(p) => {
            println!("  Empty board, O to move");
            println!("  O plays: ({}, {})", p.x, p.y);
            println!("  Expected: within the 5x5 center block");
            if p.x.abs() <= 2 && p.y.abs() <= 2 {
                println!("  Result: PASS");
            } else {
                println!("  Result: FAIL - outside center block");
            }
        }
        None => println!("  Result: FAIL - no move found"),
    }
}

fn demo_block(rng: &mut ThreadRng) {
    let mut game = GameEngine::new();
    // X builds an open four while O plays far away
    for x in 0..4 {
        game.place(Player::X, Point::new(x, 0)).unwrap();
        game.place(Player::O, Point::new(x, 5)).unwrap();
    }

    println!("  Position: X has four at y=0, cols 0-3");
    match ai::compute_move(
        game.board(),
        game.bounds(),
        game.config(),
        Player::O,
        Difficulty::Normal,
        rng,
    ) {
        Some(p) => {
            println!("  O plays: ({}, {})", p.x, p.y);
            println!("  Expected: (-1, 0) or (4, 0)");
            if p == Point::new(-1, 0) || p == Point::new(4, 0) {
                println!("  Result: PASS");
            } else {
                println!("  Result: FAIL - did not block");
            }
        }
        None => println!("  Result: FAIL - no move found"),
    }
}

fn demo_erase_negation() {
    let mut game = GameEngine::new();
    for x in 0..4 {
        game.place(Player::X, Point::new(x, 0)).unwrap();
        game.place(Player::O, Point::new(x, 5)).unwrap();
    }
    game.place(Player::X, Point::new(4, 0)).unwrap();

    println!("  X completes five at y=0; win is provisional");
    println!("  Pending win recorded: {}", game.pending_win().is_some());

    game.apply_skill(Skill::Erase, Player::O, Point::new(2, 0))
        .unwrap();
    println!("  O erases (2, 0) on the reply");

    if game.winner().is_none() && game.pending_win().is_none() {
        println!("  Result: PASS - the five never stood");
    } else {
        println!("  Result: FAIL - win was finalized anyway");
    }
}

fn demo_expansion() {
    let mut game = GameEngine::new();
    let before = *game.bounds();
    println!("  Initial bounds: {}x{}", before.width(), before.height());

    // land next to the left edge
    game.place(Player::X, Point::new(before.min_x + 1, 0)).unwrap();
    let after = *game.bounds();
    println!(
        "  After placing at ({}, 0): {}x{}",
        before.min_x + 1,
        after.width(),
        after.height()
    );
    if after.min_x == before.min_x - game.config().expand_amount {
        println!("  Result: PASS - left edge moved out");
    } else {
        println!("  Result: FAIL - expected expansion");
    }
}

fn demo_ai_match(rng: &mut ThreadRng) {
    let mut game = GameEngine::new();
    let styles = [(Player::X, Difficulty::Hard), (Player::O, Difficulty::Normal)];

    let mut plies = 0;
    while game.winner().is_none() && plies < 200 {
        let mover = game.current_player();
        let difficulty = styles
            .iter()
            .find(|(p, _)| *p == mover)
            .map(|(_, d)| *d)
            .unwrap_or(Difficulty::Normal);

        let Some(p) = ai::compute_move(
            game.board(),
            game.bounds(),
            game.config(),
            mover,
            difficulty,
            rng,
        ) else {
            println!("  No candidates left for {}", mover.label());
            break;
        };
        if game.place(mover, p).is_err() {
            break;
        }
        plies += 1;
    }

    println!("  Plies played: {}", plies);
    print_board(&game);
    match game.winner() {
        Some(v) => println!("  Winner: {} ({:?})", v.player.label(), v.reason),
        None => println!("  No winner within the ply cap"),
    }
}

/// Print the active region of the board.
fn print_board(game: &GameEngine) {
    let bounds = game.bounds();
    for y in bounds.min_y..=bounds.max_y {
        print!("  ");
        for x in bounds.min_x..=bounds.max_x {
            let p = Point::new(x, y);
            let ch = match game.board().owner_at(p) {
                Some(player) => player.label(),
                None if game.board().is_locked(p) => '#',
                None => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}
