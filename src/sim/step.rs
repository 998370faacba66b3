/// The step function: advances a session by one action.
///
/// Processing order:
///   1. Terminal phase → unchanged, no events
///   2. Quit → Quit phase
///   3. Attack resolution (attack only)
///   4. Movement resolution (climb + gravity; non-moves still fall)
///   5. Coin sampling → score
///   6. Status resolution (pickups removed, goal / monster check)
///
/// Step 5 must run before step 6: status resolution turns the coin into
/// air, so the score only sees the coin on the turn the player arrives.

use log::debug;

use crate::domain::error::LevelError;
use crate::domain::grid::Direction;
use crate::domain::physics;
use crate::domain::rules;
use crate::domain::tile::TileKind;

use super::event::GameEvent;
use super::session::{Action, Phase, Session};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(session: Session, action: Action) -> Result<(Session, Vec<GameEvent>), LevelError> {
    if session.phase.is_terminal() {
        return Ok((session, vec![]));
    }

    let mut events = Vec::new();
    let mut s = session;

    match action {
        Action::Quit => {
            s.phase = Phase::Quit;
            events.push(GameEvent::Quit);
            debug!("turn {}: quit with score {}", s.turns, s.score);
            return Ok((s, events));
        }
        Action::Attack => resolve_attack(&mut s, &mut events)?,
        Action::Help => events.push(GameEvent::HelpRequested),
        Action::Move(_) | Action::Wait => {}
    }

    s.turns += 1;
    let s = resolve_turn(s, action.direction(), &mut events)?;
    debug!(
        "turn {}: {:?} -> {} score={} phase={:?}",
        s.turns, action, s.position, s.score, s.phase
    );
    Ok((s, events))
}

// ══════════════════════════════════════════════════════════════
// Phases
// ══════════════════════════════════════════════════════════════

fn resolve_attack(s: &mut Session, events: &mut Vec<GameEvent>) -> Result<(), LevelError> {
    let (level, outcome) = rules::attack(&s.level, s.position)?;
    s.level = level;
    events.push(GameEvent::Attacked(outcome));
    Ok(())
}

/// Move, sample the coin, resolve the tile status.
/// Shared with `Session::start`, which settles the spawn with no direction.
pub(super) fn resolve_turn(
    mut s: Session,
    dir: Option<Direction>,
    events: &mut Vec<GameEvent>,
) -> Result<Session, LevelError> {
    let from = s.position;
    s.position = physics::resolve_move(&s.level, from, dir)?;
    if s.position != from {
        events.push(GameEvent::Moved { from, to: s.position });
    }

    if s.level.tile_at(s.position)? == TileKind::Coin {
        s.score += 1;
        events.push(GameEvent::CoinCollected { at: s.position });
    }

    let (tile, level) = rules::resolve_status(&s.level, s.position)?;
    s.level = level;
    debug!("standing on {} at {}", tile.name(), s.position);
    match tile {
        TileKind::Goal => {
            s.phase = Phase::Won;
            events.push(GameEvent::GoalReached);
        }
        TileKind::Monster => {
            s.phase = Phase::Lost;
            events.push(GameEvent::HitMonster);
        }
        TileKind::Checkpoint => {
            events.push(GameEvent::CheckpointReached { at: s.position });
        }
        _ => {}
    }
    Ok(s)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Position;
    use crate::domain::level::tests::level_from;
    use crate::domain::rules::AttackOutcome;

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    fn start(rows: &[&str], at: Position) -> Session {
        Session::start(level_from(rows), at).unwrap().0
    }

    fn run(s: Session, actions: &[Action]) -> (Session, Vec<GameEvent>) {
        let mut s = s;
        let mut all = vec![];
        for &a in actions {
            let (next, events) = step(s, a).unwrap();
            s = next;
            all.extend(events);
        }
        (s, all)
    }

    const RIGHT: Action = Action::Move(Direction::Right);
    const LEFT: Action = Action::Move(Direction::Left);

    // ── Scenarios ──

    #[test]
    fn walk_right_twice_collects_coin() {
        let s = start(&[
            "      ",
            "  $  I",
            "######",
        ], p(0, 1));
        assert_eq!(s.score, 0);

        let (s, _) = step(s, RIGHT).unwrap();
        assert_eq!(s.position, p(1, 1));
        assert_eq!(s.score, 0);

        let (s, events) = step(s, RIGHT).unwrap();
        assert_eq!(s.position, p(2, 1));
        assert_eq!(s.score, 1);
        assert!(events.contains(&GameEvent::CoinCollected { at: p(2, 1) }));
        assert_eq!(s.level.tile_at(p(2, 1)), Ok(TileKind::Air));
        assert_eq!(s.phase, Phase::Playing);
    }

    #[test]
    fn standing_on_collected_coin_scores_once() {
        let s = start(&[
            "   ",
            " $ ",
            "###",
        ], p(0, 1));
        let (s, _) = run(s, &[RIGHT, Action::Wait, Action::Wait, LEFT, RIGHT]);
        assert_eq!(s.score, 1);
        assert_eq!(s.turns, 5);
    }

    #[test]
    fn reaching_goal_wins() {
        let s = start(&[
            "   ",
            "  I",
            "###",
        ], p(0, 1));
        let (s, events) = run(s, &[RIGHT, RIGHT]);
        assert_eq!(s.phase, Phase::Won);
        assert_eq!(events.last(), Some(&GameEvent::GoalReached));
        // Goal tile stays in place
        assert_eq!(s.level.tile_at(p(2, 1)), Ok(TileKind::Goal));
    }

    #[test]
    fn walking_into_monster_loses() {
        let s = start(&[
            "   ",
            " @ ",
            "###",
        ], p(0, 1));
        let (s, events) = step(s, RIGHT).unwrap();
        assert_eq!(s.phase, Phase::Lost);
        assert_eq!(events.last(), Some(&GameEvent::HitMonster));
    }

    #[test]
    fn attack_then_walk_through() {
        let s = start(&[
            "   ",
            " @ ",
            "###",
        ], p(0, 1));
        let (s, events) = step(s, Action::Attack).unwrap();
        assert_eq!(events, vec![GameEvent::Attacked(AttackOutcome::Right)]);
        assert_eq!(s.phase, Phase::Playing);
        let (s, _) = step(s, RIGHT).unwrap();
        assert_eq!(s.position, p(1, 1));
        assert_eq!(s.phase, Phase::Playing);
    }

    #[test]
    fn attack_with_no_monster_reports_nothing() {
        let s = start(&[
            "   ",
            "###",
        ], p(1, 1));
        let (s, events) = step(s, Action::Attack).unwrap();
        assert_eq!(events, vec![GameEvent::Attacked(AttackOutcome::Nothing)]);
        assert_eq!(s.position, p(1, 1));
    }

    #[test]
    fn checkpoint_is_reported_and_removed() {
        let s = start(&[
            "   ",
            " ^ ",
            "###",
        ], p(0, 1));
        let (s, events) = step(s, RIGHT).unwrap();
        assert!(events.contains(&GameEvent::CheckpointReached { at: p(1, 1) }));
        assert_eq!(s.level.tile_at(p(1, 1)), Ok(TileKind::Air));
        assert_eq!(s.score, 0);
    }

    #[test]
    fn climb_passes_coin_without_collecting() {
        let s = start(&[
            "    ",
            "  $ ",
            "  # ",
            "####",
        ], p(1, 1));
        // Climb passes through the coin, lands on air above it.
        let (s, _) = step(s, RIGHT).unwrap();
        assert_eq!(s.position, p(2, 3));
        assert_eq!(s.score, 0);
    }

    // ── State machine ──

    #[test]
    fn quit_is_terminal() {
        let s = start(&[
            "  ",
            "##",
        ], p(0, 1));
        let (s, events) = step(s, Action::Quit).unwrap();
        assert_eq!(s.phase, Phase::Quit);
        assert_eq!(events, vec![GameEvent::Quit]);

        let (s, events) = step(s, RIGHT).unwrap();
        assert_eq!(s.phase, Phase::Quit);
        assert_eq!(s.position, p(0, 1));
        assert!(events.is_empty());
    }

    #[test]
    fn won_session_ignores_further_actions() {
        let s = start(&[
            " I ",
            "###",
        ], p(0, 1));
        let (s, _) = step(s, RIGHT).unwrap();
        assert_eq!(s.phase, Phase::Won);
        let turns = s.turns;
        let (s, events) = step(s, Action::Quit).unwrap();
        assert_eq!(s.phase, Phase::Won);
        assert_eq!(s.turns, turns);
        assert!(events.is_empty());
    }

    #[test]
    fn help_and_wait_keep_playing() {
        let s = start(&[
            "  ",
            "##",
        ], p(0, 1));
        let (s, events) = step(s, Action::Help).unwrap();
        assert_eq!(events, vec![GameEvent::HelpRequested]);
        let (s, events) = step(s, Action::Wait).unwrap();
        assert!(events.is_empty());
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.position, p(0, 1));
    }
}
