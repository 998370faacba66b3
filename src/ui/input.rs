/// Action input: turns one line of text into one `Action`.
///
/// Tokens come from `[keys]` in config.toml and are matched
/// case-insensitively after trimming. Anything unrecognised, including
/// an empty line, becomes `Action::Wait` so the session keeps going.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::config::KeyConfig;
use crate::domain::grid::Direction;
use crate::sim::session::Action;

pub const ACTION_PROMPT: &str = "Please enter an action (enter '?' for help): ";
pub const LEVEL_PROMPT: &str = "Please enter the name of the level file (e.g. level1.txt): ";

pub struct ActionParser {
    bindings: HashMap<String, Action>,
    keys: KeyConfig,
}

impl ActionParser {
    pub fn new(keys: &KeyConfig) -> Self {
        let groups: [(&[String], Action); 7] = [
            (keys.up.as_slice(), Action::Move(Direction::Up)),
            (keys.down.as_slice(), Action::Move(Direction::Down)),
            (keys.left.as_slice(), Action::Move(Direction::Left)),
            (keys.right.as_slice(), Action::Move(Direction::Right)),
            (keys.attack.as_slice(), Action::Attack),
            (keys.help.as_slice(), Action::Help),
            (keys.quit.as_slice(), Action::Quit),
        ];
        let mut bindings = HashMap::with_capacity(16);
        for (tokens, action) in groups {
            for token in tokens {
                // First binding wins when a token is listed twice.
                bindings.entry(token.trim().to_lowercase()).or_insert(action);
            }
        }
        ActionParser { bindings, keys: keys.clone() }
    }

    pub fn parse(&self, line: &str) -> Action {
        self.bindings
            .get(&line.trim().to_lowercase())
            .copied()
            .unwrap_or(Action::Wait)
    }

    /// Help screen listing the configured tokens.
    pub fn help_text(&self) -> String {
        let k = &self.keys;
        let rows: [(&str, &[String]); 7] = [
            ("move up", k.up.as_slice()),
            ("move down", k.down.as_slice()),
            ("move left", k.left.as_slice()),
            ("move right", k.right.as_slice()),
            ("attack", k.attack.as_slice()),
            ("help", k.help.as_slice()),
            ("quit", k.quit.as_slice()),
        ];
        let mut out = String::from("Actions:\n");
        for (what, tokens) in rows {
            out.push_str(&format!("  {:<12}{}\n", what, tokens.join(", ")));
        }
        out.push_str("Walls are climbed automatically; you fall until you land on something.\n");
        out.push_str("Collect coins, attack monsters beside you, and reach the goal.");
        out
    }
}

/// Print `prompt`, read one line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
