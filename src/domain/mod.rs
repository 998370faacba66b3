pub mod error;
pub mod grid;
pub mod level;
pub mod physics;
pub mod rules;
pub mod tile;

pub use error::LevelError;
pub use grid::{dimensions, position_to_index, Dimensions, Direction, Position};
pub use level::{tile_at, with_tile_replaced, Level};
pub use physics::resolve_move;
pub use rules::{attack, resolve_status, AttackOutcome};
pub use tile::TileKind;
