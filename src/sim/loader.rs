/// Level file loader.
///
/// ## Format
///
/// Plain text, one map row per line, written top row first as it
/// appears on screen:
///
/// ```text
///   ######          glyphs come from [glyphs] in config.toml
///   #*  $ #         '*' marks the player start
///   ##  # I#
///   ########
/// ```
///
/// - Every row must be the same width, the top row included (an
///   all-air top row has to keep its trailing air glyphs).
/// - Trailing `\r` and trailing blank lines are ignored.
/// - Exactly one player glyph; it is stored as air.
///
/// The rows are flipped while reading, so the resulting buffer has the
/// bottom row first (row 0 = bottom).

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::config::Glyphs;
use crate::domain::error::LevelError;
use crate::domain::grid::Position;
use crate::domain::level::Level;
use crate::domain::tile::TileKind;

/// A parsed level ready to start a session.
#[derive(Clone, Debug)]
pub struct LevelDef {
    pub name: String,
    pub level: Level,
    pub start: Position,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read level {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level file is empty")]
    Empty,
    #[error("line 1 is blank; the top row must be padded to full width with air glyphs")]
    BlankTopRow,
    #[error("line {line}: row is {found} tiles wide, expected {expected}")]
    Ragged { line: usize, expected: usize, found: usize },
    #[error("line {line}, column {column}: unknown tile '{glyph}'")]
    UnknownGlyph { line: usize, column: usize, glyph: char },
    #[error("no player start marker in level")]
    MissingStart,
    #[error("more than one player start marker (lines {first} and {second})")]
    MultipleStarts { first: usize, second: usize },
    #[error(transparent)]
    Level(#[from] LevelError),
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Read and parse a level file. The level name is the file stem.
pub fn load_level(path: &Path, glyphs: &Glyphs) -> Result<LevelDef, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let def = parse_level(&name, &text, glyphs)?;
    let dims = def.level.dimensions();
    info!(
        "loaded level '{}' ({}x{}, {} coins) from {}",
        def.name,
        dims.width,
        dims.height,
        def.level.count(TileKind::Coin),
        path.display()
    );
    Ok(def)
}

/// Parse level text (see module docs for the format).
pub fn parse_level(name: &str, text: &str, glyphs: &Glyphs) -> Result<LevelDef, LoadError> {
    let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    while rows.last().map_or(false, |r| r.is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(LoadError::Empty);
    }

    let width = rows[0].chars().count();
    if width == 0 {
        return Err(LoadError::BlankTopRow);
    }
    let height = rows.len();
    let mut tiles = Vec::with_capacity(width * height);
    // (line, position) of the first start marker seen
    let mut start: Option<(usize, Position)> = None;

    // Bottom line first so the buffer is bottom-row-first.
    for (from_top, row) in rows.iter().enumerate().rev() {
        let line = from_top + 1;
        let found = row.chars().count();
        if found != width {
            return Err(LoadError::Ragged { line, expected: width, found });
        }
        let row_idx = (height - 1 - from_top) as i32;
        for (col, ch) in row.chars().enumerate() {
            let kind = glyphs.kind(ch).ok_or(LoadError::UnknownGlyph {
                line,
                column: col + 1,
                glyph: ch,
            })?;
            if kind == TileKind::Player {
                if let Some((first, _)) = start {
                    // Report in top-down line order.
                    return Err(LoadError::MultipleStarts {
                        first: first.min(line),
                        second: first.max(line),
                    });
                }
                start = Some((line, Position::new(col as i32, row_idx)));
                tiles.push(TileKind::Air);
            } else {
                tiles.push(kind);
            }
        }
    }

    let (_, start) = start.ok_or(LoadError::MissingStart)?;
    let level = Level::new(tiles, width)?;
    Ok(LevelDef { name: name.to_string(), level, start })
}
