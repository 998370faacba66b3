/// Session: the complete state of one game in progress.
///
/// ## State layout
///
/// The session is a plain value `(level, position, score, phase)`:
///   - `level`    — authoritative tiles. Never holds the player glyph;
///                  the renderer overlays it on a throwaway copy.
///   - `position` — where the player rests, tracked outside the buffer.
///   - `score`    — coins collected this session.
///   - `phase`    — the 4-state machine below.
///
/// `step()` consumes a session and returns the next one, so there is
/// no shared mutable state between turns.
///
/// ## Phases
///
/// ```text
///             attack / move / help / wait
///            ┌────────┐
///            ▼        │
///   start ─▶ Playing ─┴─▶ Won   (landed on goal)
///               │    └──▶ Lost  (landed on monster)
///               └───────▶ Quit  (quit action)
/// ```
/// Won, Lost and Quit are terminal: further actions are ignored.

use crate::domain::error::LevelError;
use crate::domain::grid::{Direction, Position};
use crate::domain::level::Level;
use crate::domain::tile::TileKind;

use super::event::GameEvent;
use super::step;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Won,
    Lost,
    Quit,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self != Phase::Playing
    }
}

/// One discrete player command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Move(Direction),
    Attack,
    Help,
    /// Empty or unrecognised input: no movement, gravity still applies.
    Wait,
    Quit,
}

impl Action {
    /// Movement component of the action, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Move(dir) => Some(dir),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub level: Level,
    pub position: Position,
    pub score: u32,
    pub phase: Phase,
    /// Non-quit actions processed so far.
    pub turns: u32,
    /// Coins present when the level was loaded.
    pub coins_total: usize,
}

impl Session {
    /// Begin a session at `start`.
    ///
    /// The player is settled before the first prompt: gravity pulls them
    /// down and the tile they land on is resolved, so a level may be won,
    /// lost or score a coin before any input is read.
    pub fn start(level: Level, start: Position) -> Result<(Session, Vec<GameEvent>), LevelError> {
        level.tile_at(start)?;
        let coins_total = level.count(TileKind::Coin);
        let session = Session {
            level,
            position: start,
            score: 0,
            phase: Phase::Playing,
            turns: 0,
            coins_total,
        };
        let mut events = Vec::new();
        let session = step::resolve_turn(session, None, &mut events)?;
        Ok((session, events))
    }

    pub fn coins_remaining(&self) -> usize {
        self.level.count(TileKind::Coin)
    }

    /// Display copy of the level with the player drawn in.
    pub fn display_level(&self) -> Result<Level, LevelError> {
        self.level.with_player_at(self.position)
    }
}
