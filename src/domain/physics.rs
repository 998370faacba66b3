/// Movement resolution: one directional step, then wall-climb, then gravity.
///
/// ## Algorithm
///
///   1. Target = position + direction delta (`None` → stay put).
///   2. Wall-climb: if the target is a wall, scan straight up until the
///      tile is air. Non-air tiles on the way (coins, monsters, ...) are
///      climbed through, not stopped on.
///   3. Gravity: while the tile below the target is air, drop one row.
///
/// ## Boundary policy
///
/// The scans are bounded by the grid, so resolution always terminates
/// on an in-range position:
///
/// ┌────────────────────────────────────┬──────────────────────────────┐
/// │ Situation                           │ Outcome                      │
/// ├────────────────────────────────────┼──────────────────────────────┤
/// │ Start position outside the grid     │ Err(OutOfBounds)             │
/// │ Step target outside the grid        │ blocked, resolve from start  │
/// │ Climb hits the top without air      │ blocked, resolve from start  │
/// │ Fall reaches row 0                  │ stop (edge = solid ground)   │
/// └────────────────────────────────────┴──────────────────────────────┘
///
/// "Blocked" resolves exactly like a non-moving action: the start
/// position itself goes through the climb and gravity.

use super::error::LevelError;
use super::grid::{Direction, Position};
use super::level::Level;

pub fn resolve_move(
    level: &Level,
    pos: Position,
    dir: Option<Direction>,
) -> Result<Position, LevelError> {
    level.tile_at(pos)?;

    let target = climb(level, pos.step(dir))
        .or_else(|| climb(level, pos))
        .unwrap_or(pos);
    Ok(fall(level, target))
}

/// Wall-climb from a raw step target.
/// `None` = the step is blocked (off the grid, or no air above the wall).
fn climb(level: &Level, target: Position) -> Option<Position> {
    let tile = level.get(target)?;
    if !tile.is_wall() {
        return Some(target);
    }
    let mut p = target;
    loop {
        p = p.above();
        if level.get(p)?.is_air() {
            return Some(p);
        }
    }
}

/// Drop while the tile below is air. The bottom row is solid ground.
/// `pos` must be inside the grid.
fn fall(level: &Level, pos: Position) -> Position {
    let mut p = pos;
    while level.get(p.below()).map_or(false, |t| t.is_air()) {
        p = p.below();
    }
    p
}

/// Is the player at `pos` at rest (nothing to fall into)?
pub fn is_resting(level: &Level, pos: Position) -> bool {
    fall(level, pos) == pos
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
