//! Five-in-a-row detection on the sparse board
//!
//! Lines are counted along the four configured directions. The probe
//! point is always counted as the queried owner's, so the same routines
//! serve confirmed placements and hypothetical ones (the AI's
//! immediate-win check).

use crate::board::{Board, Dir, Player, Point};

/// Run length needed to win.
pub const WIN_LEN: i32 = 5;

/// The matched run: exactly five points, ordered along its direction.
pub type Line = [Point; 5];

/// Count contiguous same-owner cells starting one step from `from`
/// along `dir`. The cell at `from` itself is not counted.
pub fn count_run(board: &Board, from: Point, dir: Dir, owner: Player) -> i32 {
    let mut count = 0;
    let mut step = 1;
    while board.owner_at(from.offset(dir, step)) == Some(owner) {
        count += 1;
        step += 1;
    }
    count
}

/// Find a five-in-a-row through `p` for `owner`, if one exists.
///
/// Directions are checked in the configured order and the first match
/// wins. When the run is longer than five, the reported window starts as
/// far in the negative direction as possible, capped at four steps back,
/// which pins a deterministic window and always includes `p`.
pub fn five_line_at(board: &Board, p: Point, owner: Player, dirs: &[Dir; 4]) -> Option<Line> {
    for &(dx, dy) in dirs {
        let left = count_run(board, p, (-dx, -dy), owner);
        let right = count_run(board, p, (dx, dy), owner);
        if left + 1 + right >= WIN_LEN {
            let start = p.offset((-dx, -dy), left.min(WIN_LEN - 1));
            let mut line = [start; 5];
            for (i, cell) in line.iter_mut().enumerate() {
                *cell = start.offset((dx, dy), i as i32);
            }
            return Some(line);
        }
    }
    None
}

/// Scan every occupied cell of `owner` for a five-in-a-row.
///
/// O(occupied cells) probes; fine because the sparse map only holds
/// played cells. Cells are visited in canonical order so the reported
/// line does not depend on hash-map iteration.
pub fn any_five(board: &Board, owner: Player, dirs: &[Dir; 4]) -> Option<Line> {
    let mut points: Vec<Point> = board
        .occupied()
        .filter(|&(_, p)| p == owner)
        .map(|(point, _)| point)
        .collect();
    points.sort_unstable();

    points
        .into_iter()
        .find_map(|p| five_line_at(board, p, owner, dirs))
}
