/// Interaction rules: combat and tile status — truth-table driven.
///
/// Pure functions: they take a level and return a new one, never
/// touching the argument. Messages and scoring are left to the caller.
///
/// ## Attack
/// ┌──────────────────────────────┬──────────────────────────┐
/// │ Condition (checked in order)  │ Result                   │
/// ├──────────────────────────────┼──────────────────────────┤
/// │ left neighbour is a monster   │ remove it, outcome Left  │
/// │ right neighbour is a monster  │ remove it, outcome Right │
/// │ otherwise                     │ unchanged, Nothing       │
/// └──────────────────────────────┴──────────────────────────┘
/// A neighbour outside the grid is never a monster. At most one
/// monster is removed per call.
///
/// ## Status (tile under the player)
/// ┌──────────────────┬───────────────┬──────────────────┐
/// │ Tile              │ Level change  │ Caller reaction  │
/// ├──────────────────┼───────────────┼──────────────────┤
/// │ Coin              │ → Air         │ (score sampled   │
/// │                   │               │  before this)    │
/// │ Checkpoint        │ → Air         │ —                │
/// │ Goal              │ unchanged     │ session won      │
/// │ Monster           │ unchanged     │ session lost     │
/// │ anything else     │ unchanged     │ —                │
/// └──────────────────┴───────────────┴──────────────────┘

use super::error::LevelError;
use super::grid::Position;
use super::level::Level;
use super::tile::TileKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttackOutcome {
    Left,
    Right,
    Nothing,
}

impl AttackOutcome {
    pub fn hit(self) -> bool {
        self != AttackOutcome::Nothing
    }
}

pub fn attack(level: &Level, pos: Position) -> Result<(Level, AttackOutcome), LevelError> {
    level.tile_at(pos)?;

    let sides = [(pos.left(), AttackOutcome::Left), (pos.right(), AttackOutcome::Right)];
    for (target, outcome) in sides {
        if level.get(target) == Some(TileKind::Monster) {
            let next = level.with_tile_replaced(target, TileKind::Air)?;
            return Ok((next, outcome));
        }
    }
    Ok((level.clone(), AttackOutcome::Nothing))
}

/// Report the tile under the player, collecting it if it is a pickup.
pub fn resolve_status(level: &Level, pos: Position) -> Result<(TileKind, Level), LevelError> {
    let tile = level.tile_at(pos)?;
    if tile.is_collectible() {
        return Ok((tile, level.with_tile_replaced(pos, TileKind::Air)?));
    }
    Ok((tile, level.clone()))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::level::tests::level_from;

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    // ── attack ──

    #[test]
    fn attack_left_monster() {
        let l = level_from(&[
            "@ $",
            "###",
        ]);
        let (next, outcome) = attack(&l, p(1, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Left);
        assert_eq!(next.tile_at(p(0, 1)), Ok(TileKind::Air));
        // Right side untouched
        assert_eq!(next.tile_at(p(2, 1)), Ok(TileKind::Coin));
    }

    #[test]
    fn attack_right_monster() {
        let l = level_from(&[
            "  @",
            "###",
        ]);
        let (next, outcome) = attack(&l, p(1, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Right);
        assert_eq!(next.tile_at(p(2, 1)), Ok(TileKind::Air));
    }

    #[test]
    fn attack_prefers_left_and_removes_one() {
        let l = level_from(&[
            "@ @",
            "###",
        ]);
        let (next, outcome) = attack(&l, p(1, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Left);
        assert_eq!(next.count(TileKind::Monster), 1);
        assert_eq!(next.tile_at(p(2, 1)), Ok(TileKind::Monster));

        let (last, outcome) = attack(&next, p(1, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Right);
        assert_eq!(last.count(TileKind::Monster), 0);
    }

    #[test]
    fn attack_with_nothing_adjacent() {
        let l = level_from(&[
            "$ @ ",
            "####",
        ]);
        // Monster two tiles away on the right, coin on the left: no hit.
        let (next, outcome) = attack(&l, p(0, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Nothing);
        assert!(!outcome.hit());
        assert_eq!(next, l);
    }

    #[test]
    fn attack_ignores_vertical_neighbours() {
        let l = level_from(&[
            " @ ",
            "   ",
            "#@#",
        ]);
        let (next, outcome) = attack(&l, p(1, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Nothing);
        assert_eq!(next.count(TileKind::Monster), 2);
    }

    #[test]
    fn attack_at_map_edge() {
        let l = level_from(&[
            " @",
            "##",
        ]);
        let (_, outcome) = attack(&l, p(0, 1)).unwrap();
        assert_eq!(outcome, AttackOutcome::Right);
        let (_, outcome) = attack(&l, p(1, 0)).unwrap();
        assert_eq!(outcome, AttackOutcome::Nothing);
    }

    #[test]
    fn attack_from_outside_is_an_error() {
        let l = level_from(&["@ "]);
        assert!(attack(&l, p(-1, 0)).is_err());
    }

    // ── resolve_status ──

    #[test]
    fn coin_is_collected_once() {
        let l = level_from(&[
            " $ ",
            "###",
        ]);
        let (tile, next) = resolve_status(&l, p(1, 1)).unwrap();
        assert_eq!(tile, TileKind::Coin);
        assert_eq!(next.tile_at(p(1, 1)), Ok(TileKind::Air));

        let (again, after) = resolve_status(&next, p(1, 1)).unwrap();
        assert_eq!(again, TileKind::Air);
        assert_eq!(after, next);
    }

    #[test]
    fn checkpoint_is_collected_once() {
        let l = level_from(&[
            "^",
            "#",
        ]);
        let (tile, next) = resolve_status(&l, p(0, 1)).unwrap();
        assert_eq!(tile, TileKind::Checkpoint);
        let (again, _) = resolve_status(&next, p(0, 1)).unwrap();
        assert_eq!(again, TileKind::Air);
    }

    #[test]
    fn goal_and_monster_stay_in_place() {
        let l = level_from(&[
            "I@",
            "##",
        ]);
        let (tile, next) = resolve_status(&l, p(0, 1)).unwrap();
        assert_eq!(tile, TileKind::Goal);
        assert_eq!(next, l);

        let (tile, next) = resolve_status(&l, p(1, 1)).unwrap();
        assert_eq!(tile, TileKind::Monster);
        assert_eq!(next, l);
    }

    #[test]
    fn status_on_air_changes_nothing() {
        let l = level_from(&[" ", "#"]);
        let (tile, next) = resolve_status(&l, p(0, 1)).unwrap();
        assert_eq!(tile, TileKind::Air);
        assert_eq!(next, l);
    }
}
