/// Presentation layer: prints the level and turn messages.
///
/// Output is line-oriented (one frame per turn, scrolling like a
/// normal terminal session). All tile drawing is batched with `queue!`
/// and flushed once per frame.
///
/// The player glyph is drawn onto a display copy from
/// `Session::display_level`; the session's own level never sees it.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::config::Glyphs;
use crate::domain::level::Level;
use crate::domain::rules::AttackOutcome;
use crate::domain::tile::TileKind;
use crate::sim::event::GameEvent;
use crate::sim::session::{Phase, Session};

pub struct Renderer {
    glyphs: Glyphs,
    color: bool,
}

impl Renderer {
    pub fn new(glyphs: Glyphs, color: bool) -> Self {
        Renderer { glyphs, color }
    }

    /// Score line followed by the map, top row first.
    pub fn render<W: Write>(&self, out: &mut W, session: &Session) -> io::Result<()> {
        let shown = session
            .display_level()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(out, "Score: {}", session.score)?;
        self.render_level(out, &shown)?;
        out.flush()
    }

    pub fn render_level<W: Write>(&self, out: &mut W, level: &Level) -> io::Result<()> {
        for row in level.rows_top_down() {
            for &tile in row {
                self.draw_tile(out, tile)?;
            }
            queue!(out, Print('\n'))?;
        }
        Ok(())
    }

    fn draw_tile<W: Write>(&self, out: &mut W, tile: TileKind) -> io::Result<()> {
        let ch = self.glyphs.glyph(tile);
        if !self.color {
            return queue!(out, Print(ch));
        }
        match tile_color(tile) {
            Some((fg, bold)) => {
                if bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                queue!(out, SetForegroundColor(fg), Print(ch), ResetColor)?;
                if bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
                Ok(())
            }
            None => queue!(out, Print(ch)),
        }
    }

    /// Print the messages for one step's events, in order.
    pub fn report<W: Write>(&self, out: &mut W, events: &[GameEvent], help: &str) -> io::Result<()> {
        for event in events {
            if *event == GameEvent::HelpRequested {
                writeln!(out, "{help}")?;
            } else if let Some(msg) = describe(event) {
                writeln!(out, "{msg}")?;
            }
        }
        out.flush()
    }

    /// Closing line once the session has ended.
    pub fn farewell<W: Write>(&self, out: &mut W, session: &Session) -> io::Result<()> {
        match session.phase {
            Phase::Playing => Ok(()),
            Phase::Won | Phase::Lost | Phase::Quit => {
                writeln!(
                    out,
                    "Final score: {} ({} of {} coins, {} turns)",
                    session.score,
                    session.coins_total - session.coins_remaining(),
                    session.coins_total,
                    session.turns,
                )?;
                out.flush()
            }
        }
    }
}

fn tile_color(tile: TileKind) -> Option<(Color, bool)> {
    match tile {
        TileKind::Air => None,
        TileKind::Wall => Some((Color::Grey, false)),
        TileKind::Player => Some((Color::Cyan, true)),
        TileKind::Monster => Some((Color::Red, true)),
        TileKind::Coin => Some((Color::Yellow, true)),
        TileKind::Checkpoint => Some((Color::Blue, false)),
        TileKind::Goal => Some((Color::Green, true)),
    }
}

/// Human-readable message for an event, if it has one.
pub fn describe(event: &GameEvent) -> Option<&'static str> {
    match event {
        GameEvent::Attacked(AttackOutcome::Left) => Some("Attacking the monster on your left!"),
        GameEvent::Attacked(AttackOutcome::Right) => Some("Attacking the monster on your right!"),
        GameEvent::Attacked(AttackOutcome::Nothing) => Some("No monsters to attack!"),
        GameEvent::GoalReached => Some("Congratulations! You finished the level"),
        GameEvent::HitMonster => Some("Hit a monster!"),
        GameEvent::CheckpointReached { .. } => Some("Checkpoint reached."),
        GameEvent::Moved { .. }
        | GameEvent::CoinCollected { .. }
        | GameEvent::HelpRequested
        | GameEvent::Quit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Position;
    use crate::domain::level::tests::level_from;

    fn plain() -> Renderer {
        Renderer::new(Glyphs::default(), false)
    }

    fn render_to_string(r: &Renderer, s: &Session) -> String {
        let mut out = Vec::new();
        r.render(&mut out, s).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_render_overlays_player() {
        let l = level_from(&[
            "   $",
            "#  I",
            "####",
        ]);
        let (s, _) = Session::start(l, Position::new(1, 1)).unwrap();
        let text = render_to_string(&plain(), &s);
        assert_eq!(text, "Score: 0\n   $\n#* I\n####\n");
        // Session level is untouched by rendering
        assert_eq!(s.level.count(TileKind::Player), 0);
    }

    #[test]
    fn color_render_still_contains_glyphs() {
        let l = level_from(&[
            " $",
            "##",
        ]);
        let (s, _) = Session::start(l, Position::new(0, 1)).unwrap();
        let text = render_to_string(&Renderer::new(Glyphs::default(), true), &s);
        assert!(text.starts_with("Score: 0\n"));
        assert!(text.contains('*'));
        assert!(text.contains('$'));
        assert!(text.contains("\u{1b}["));
    }

    #[test]
    fn report_prints_only_described_events() {
        let mut out = Vec::new();
        plain()
            .report(
                &mut out,
                &[
                    GameEvent::Moved { from: Position::new(0, 0), to: Position::new(1, 0) },
                    GameEvent::Attacked(AttackOutcome::Left),
                    GameEvent::HitMonster,
                ],
                "help",
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Attacking the monster on your left!\nHit a monster!\n"
        );
    }

    #[test]
    fn report_prints_help_in_place() {
        let mut out = Vec::new();
        plain()
            .report(&mut out, &[GameEvent::HelpRequested, GameEvent::Quit], "HELP")
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "HELP\n");
    }

    #[test]
    fn farewell_summarises_coins() {
        let l = level_from(&[
            " $I",
            "###",
        ]);
        let (s, _) = Session::start(l, Position::new(0, 1)).unwrap();
        let (s, _) = crate::sim::step::step(s, crate::sim::session::Action::Quit).unwrap();
        let mut out = Vec::new();
        plain().farewell(&mut out, &s).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Final score: 0 (0 of 1 coins, 0 turns)\n"
        );
    }
}
