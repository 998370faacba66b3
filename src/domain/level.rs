/// Tile buffer: the level as an immutable value.
///
/// A `Level` is never mutated in place. Every change (coin pickup,
/// monster removal, player overlay) builds a new `Level` by copying
/// the whole buffer and patching one cell, so each replacement costs
/// O(width × height). Levels are small terminal maps, which keeps this
/// cheap enough to do on every turn.

use super::error::LevelError;
use super::grid::{dimensions, index_to_position, position_to_index, Dimensions, Position};
use super::tile::TileKind;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Level {
    tiles: Vec<TileKind>,
    width: usize,
}

impl Level {
    /// Wrap a bottom-row-first buffer. The buffer must hold a whole
    /// number of rows of `width` tiles.
    pub fn new(tiles: Vec<TileKind>, width: usize) -> Result<Self, LevelError> {
        if width == 0 {
            return Err(LevelError::ZeroWidth);
        }
        if tiles.is_empty() {
            return Err(LevelError::Empty);
        }
        if tiles.len() % width != 0 {
            return Err(LevelError::Ragged { len: tiles.len(), width });
        }
        Ok(Level { tiles, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a `Level` built through `new`.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn dimensions(&self) -> Dimensions {
        dimensions(self)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.dimensions().contains(pos)
    }

    /// Checked lookup: `None` outside the grid.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<TileKind> {
        position_to_index(pos, self.dimensions()).map(|i| self.tiles[i])
    }

    pub fn tile_at(&self, pos: Position) -> Result<TileKind, LevelError> {
        self.get(pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    /// New level identical to `self` except at `pos`.
    pub fn with_tile_replaced(&self, pos: Position, tile: TileKind) -> Result<Level, LevelError> {
        let idx = position_to_index(pos, self.dimensions())
            .ok_or_else(|| self.out_of_bounds(pos))?;
        let mut tiles = self.tiles.clone();
        tiles[idx] = tile;
        Ok(Level { tiles, width: self.width })
    }

    /// Display copy with the player glyph drawn at `pos`.
    /// Only for rendering; never store the result as game state.
    pub fn with_player_at(&self, pos: Position) -> Result<Level, LevelError> {
        self.with_tile_replaced(pos, TileKind::Player)
    }

    /// Rows from the top of the map down, as they appear on screen.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[TileKind]> + '_ {
        self.tiles.chunks(self.width).rev()
    }

    /// Positions holding `kind`, in buffer order.
    pub fn positions_of(&self, kind: TileKind) -> impl Iterator<Item = Position> + '_ {
        let dims = self.dimensions();
        self.tiles
            .iter()
            .enumerate()
            .filter(move |&(_, &t)| t == kind)
            .map(move |(i, _)| index_to_position(i, dims))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    fn out_of_bounds(&self, position: Position) -> LevelError {
        let dims = self.dimensions();
        LevelError::OutOfBounds { position, width: dims.width, height: dims.height }
    }
}

/// Free-function form of `Level::tile_at`.
pub fn tile_at(level: &Level, pos: Position) -> Result<TileKind, LevelError> {
    level.tile_at(pos)
}

/// Free-function form of `Level::with_tile_replaced`.
pub fn with_tile_replaced(level: &Level, pos: Position, tile: TileKind) -> Result<Level, LevelError> {
    level.with_tile_replaced(pos, tile)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
