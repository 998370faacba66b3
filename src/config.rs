/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from
/// an explicit `--config` path. Falls back to defaults if the searched
/// file is missing or incomplete; an explicit path must exist and parse.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::tile::TileKind;

// ── Public Config Struct ──

#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    pub glyphs: Glyphs,
    pub keys: KeyConfig,
    pub display: DisplayConfig,
}

/// One character per tile kind, used by the level loader and renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub air: char,
    pub wall: char,
    pub player: char,
    pub monster: char,
    pub coin: char,
    pub checkpoint: char,
    pub goal: char,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyConfig {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub attack: Vec<String>,
    pub help: Vec<String>,
    pub quit: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    pub color: bool,
    pub sound: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("glyph '{0}' is assigned to more than one tile kind")]
    DuplicateGlyph(char),
}

impl Glyphs {
    pub fn glyph(&self, kind: TileKind) -> char {
        match kind {
            TileKind::Air => self.air,
            TileKind::Wall => self.wall,
            TileKind::Player => self.player,
            TileKind::Monster => self.monster,
            TileKind::Coin => self.coin,
            TileKind::Checkpoint => self.checkpoint,
            TileKind::Goal => self.goal,
        }
    }

    pub fn kind(&self, ch: char) -> Option<TileKind> {
        TileKind::ALL.into_iter().find(|&k| self.glyph(k) == ch)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for kind in TileKind::ALL {
            let ch = self.glyph(kind);
            if !seen.insert(ch) {
                return Err(ConfigError::DuplicateGlyph(ch));
            }
        }
        Ok(())
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        TomlGlyphs::default().into()
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        TomlKeys::default().into()
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        TomlDisplay::default().into()
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    glyphs: TomlGlyphs,
    #[serde(default)]
    keys: TomlKeys,
    #[serde(default)]
    display: TomlDisplay,
}

#[derive(Deserialize, Debug)]
struct TomlGlyphs {
    #[serde(default = "default_air")]
    air: char,
    #[serde(default = "default_wall")]
    wall: char,
    #[serde(default = "default_player")]
    player: char,
    #[serde(default = "default_monster")]
    monster: char,
    #[serde(default = "default_coin")]
    coin: char,
    #[serde(default = "default_checkpoint")]
    checkpoint: char,
    #[serde(default = "default_goal")]
    goal: char,
}

#[derive(Deserialize, Debug)]
struct TomlKeys {
    #[serde(default = "default_up")]
    up: Vec<String>,
    #[serde(default = "default_down")]
    down: Vec<String>,
    #[serde(default = "default_left")]
    left: Vec<String>,
    #[serde(default = "default_right")]
    right: Vec<String>,
    #[serde(default = "default_attack")]
    attack: Vec<String>,
    #[serde(default = "default_help")]
    help: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_true")]
    color: bool,
    #[serde(default = "default_true")]
    sound: bool,
}

// ── Defaults ──

fn default_air() -> char { ' ' }
fn default_wall() -> char { '#' }
fn default_player() -> char { '*' }
fn default_monster() -> char { '@' }
fn default_coin() -> char { '$' }
fn default_checkpoint() -> char { '^' }
fn default_goal() -> char { 'I' }

fn default_up() -> Vec<String> { vec!["w".into(), "up".into()] }
fn default_down() -> Vec<String> { vec!["s".into(), "down".into()] }
fn default_left() -> Vec<String> { vec!["l".into(), "left".into()] }
fn default_right() -> Vec<String> { vec!["d".into(), "right".into()] }
fn default_attack() -> Vec<String> { vec!["a".into(), "attack".into()] }
fn default_help() -> Vec<String> { vec!["?".into(), "help".into()] }
fn default_quit() -> Vec<String> { vec!["q".into(), "quit".into()] }

fn default_true() -> bool { true }

impl Default for TomlGlyphs {
    fn default() -> Self {
        TomlGlyphs {
            air: default_air(),
            wall: default_wall(),
            player: default_player(),
            monster: default_monster(),
            coin: default_coin(),
            checkpoint: default_checkpoint(),
            goal: default_goal(),
        }
    }
}

impl Default for TomlKeys {
    fn default() -> Self {
        TomlKeys {
            up: default_up(),
            down: default_down(),
            left: default_left(),
            right: default_right(),
            attack: default_attack(),
            help: default_help(),
            quit: default_quit(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { color: true, sound: true }
    }
}

impl From<TomlGlyphs> for Glyphs {
    fn from(t: TomlGlyphs) -> Self {
        Glyphs {
            air: t.air,
            wall: t.wall,
            player: t.player,
            monster: t.monster,
            coin: t.coin,
            checkpoint: t.checkpoint,
            goal: t.goal,
        }
    }
}

impl From<TomlKeys> for KeyConfig {
    fn from(t: TomlKeys) -> Self {
        KeyConfig {
            up: t.up,
            down: t.down,
            left: t.left,
            right: t.right,
            attack: t.attack,
            help: t.help,
            quit: t.quit,
        }
    }
}

impl From<TomlDisplay> for DisplayConfig {
    fn from(t: TomlDisplay) -> Self {
        DisplayConfig { color: t.color, sound: t.sound }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        GameConfig {
            glyphs: t.glyphs.into(),
            keys: t.keys.into(),
            display: t.display.into(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config.
    ///
    /// With `explicit`, that file must exist and parse. Otherwise search
    /// order is (1) exe directory, (2) current working directory; a
    /// missing or broken file there falls back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let cfg = match explicit {
            Some(path) => read_toml(path)?,
            None => search_toml(&candidate_dirs()),
        };
        let cfg = GameConfig::from(cfg);
        cfg.glyphs.validate()?;
        Ok(cfg)
    }

    /// Parse config text directly (no file lookup).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: TomlConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        let cfg = GameConfig::from(cfg);
        cfg.glyphs.validate()?;
        Ok(cfg)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn read_toml(path: &Path) -> Result<TomlConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = toml::from_str::<TomlConfig>(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded config from {}", path.display());
    Ok(cfg)
}

/// Search for config.toml in candidate directories.
fn search_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match read_toml(&path) {
            Ok(cfg) => return cfg,
            Err(e @ ConfigError::Parse { .. }) => {
                warn!("{e}; using default settings");
                return TomlConfig::default();
            }
            Err(e) => warn!("{e}"),
        }
    }
    TomlConfig::default()
}
