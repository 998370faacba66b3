/// Grid addressing: 2D positions ↔ flat buffer offsets.
///
/// ## Coordinate convention
///
/// Positions are `(column, row)`. Column grows rightward, row grows
/// UPWARD, so row 0 is the bottom of the level.
///
/// The tile buffer is row-major with the bottom row first:
///
/// ```text
///   index = row * width + column
///
///   row 2 │ 12 13 14 15 16 17
///   row 1 │  6  7  8  9 10 11
///   row 0 │  0  1  2  3  4  5
///         └──────────────────
///            0  1  2  3  4  5   column
/// ```
///
/// Every call site goes through `position_to_index` so the convention
/// lives in exactly one place.

use super::level::Level;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Position { col, row }
    }

    /// Apply one direction delta. `None` = no movement.
    pub fn step(self, dir: Option<Direction>) -> Position {
        match dir {
            Some(Direction::Right) => Position::new(self.col + 1, self.row),
            Some(Direction::Left) => Position::new(self.col - 1, self.row),
            Some(Direction::Up) => self.above(),
            Some(Direction::Down) => self.below(),
            None => self,
        }
    }

    pub fn above(self) -> Position {
        Position::new(self.col, self.row + 1)
    }

    pub fn below(self) -> Position {
        Position::new(self.col, self.row - 1)
    }

    pub fn left(self) -> Position {
        Position::new(self.col - 1, self.row)
    }

    pub fn right(self) -> Position {
        Position::new(self.col + 1, self.row)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Grid shape in tiles.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn contains(self, pos: Position) -> bool {
        pos.col >= 0
            && pos.row >= 0
            && (pos.col as usize) < self.width
            && (pos.row as usize) < self.height
    }

    pub fn len(self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Row index of the top row.
    pub fn top_row(self) -> i32 {
        self.height as i32 - 1
    }
}

/// Flat buffer offset of `pos`, or `None` when it lies outside the grid.
#[inline]
pub fn position_to_index(pos: Position, dims: Dimensions) -> Option<usize> {
    if !dims.contains(pos) {
        return None;
    }
    Some(pos.row as usize * dims.width + pos.col as usize)
}

/// Inverse of `position_to_index`. `index` must be `< dims.len()`.
#[inline]
pub fn index_to_position(index: usize, dims: Dimensions) -> Position {
    Position::new((index % dims.width) as i32, (index / dims.width) as i32)
}

/// Grid shape of a level, derived from its buffer length and width.
pub fn dimensions(level: &Level) -> Dimensions {
    let width = level.width();
    Dimensions { width, height: level.len() / width }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: Dimensions = Dimensions { width: 6, height: 3 };

    #[test]
    fn bottom_left_is_index_zero() {
        assert_eq!(position_to_index(Position::new(0, 0), DIMS), Some(0));
    }

    #[test]
    fn row_major_bottom_first() {
        assert_eq!(position_to_index(Position::new(5, 0), DIMS), Some(5));
        assert_eq!(position_to_index(Position::new(0, 1), DIMS), Some(6));
        assert_eq!(position_to_index(Position::new(5, 2), DIMS), Some(17));
    }

    #[test]
    fn out_of_range_has_no_index() {
        assert_eq!(position_to_index(Position::new(-1, 0), DIMS), None);
        assert_eq!(position_to_index(Position::new(0, -1), DIMS), None);
        assert_eq!(position_to_index(Position::new(6, 0), DIMS), None);
        assert_eq!(position_to_index(Position::new(0, 3), DIMS), None);
    }

    #[test]
    fn index_round_trips_over_whole_grid() {
        for i in 0..DIMS.len() {
            let pos = index_to_position(i, DIMS);
            assert_eq!(position_to_index(pos, DIMS), Some(i));
        }
    }

    #[test]
    fn up_increases_row() {
        let p = Position::new(2, 1);
        assert_eq!(p.step(Some(Direction::Up)), Position::new(2, 2));
        assert_eq!(p.step(Some(Direction::Down)), Position::new(2, 0));
        assert_eq!(p.step(Some(Direction::Left)), Position::new(1, 1));
        assert_eq!(p.step(Some(Direction::Right)), Position::new(3, 1));
        assert_eq!(p.step(None), p);
    }

    #[test]
    fn dimensions_from_level() {
        use crate::domain::tile::TileKind;
        let level = Level::new(vec![TileKind::Air; 18], 6).unwrap();
        assert_eq!(dimensions(&level), DIMS);
        assert_eq!(DIMS.top_row(), 2);
        assert!(!DIMS.is_empty());
        assert!(Dimensions { width: 4, height: 0 }.is_empty());
    }
}
