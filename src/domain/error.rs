/// Errors raised by the level core.

use thiserror::Error;

use super::grid::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("position {position} is outside the {width}x{height} level")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
    #[error("level has no tiles")]
    Empty,
    #[error("level width must be non-zero")]
    ZeroWidth,
    #[error("buffer of {len} tiles is not a whole number of rows of width {width}")]
    Ragged { len: usize, width: usize },
}
