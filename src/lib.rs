//! Coin Climber: a turn-based tile platformer.
//!
//! * `domain` — pure level core: grid addressing, tile buffer, movement
//!   (wall-climb + gravity) and interaction rules.
//! * `sim` — session state machine, step function and level loader.
//! * `ui` — text input, terminal rendering and sound.
//! * `config` — `config.toml` loading.

pub mod config;
pub mod domain;
pub mod sim;
pub mod ui;
