/// Events emitted during a session step.
/// The presentation layer consumes these for messages and sound.

use crate::domain::grid::Position;
use crate::domain::rules::AttackOutcome;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Moved { from: Position, to: Position },
    Attacked(AttackOutcome),
    CoinCollected { at: Position },
    CheckpointReached { at: Position },
    GoalReached,
    HitMonster,
    HelpRequested,
    Quit,
}
