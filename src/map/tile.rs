//! Discrete grid coordinates.

use std::fmt;

use glam::Vec2;

use crate::map::direction::Direction;

/// A (row, column) position on the maze grid.
///
/// Coordinates are signed so that targeting formulas can point outside the board;
/// such targets are still compared by raw distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TileIndex {
    pub row: i32,
    pub col: i32,
}

impl TileIndex {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the tile `n` steps away in `direction`, without any wrapping.
    pub fn step(self, direction: Direction, n: i32) -> Self {
        let v = direction.as_ivec2();
        Self {
            row: self.row + v.y as i32 * n,
            col: self.col + v.x as i32 * n,
        }
    }

    /// Euclidean distance between two tiles.
    pub fn distance(self, other: TileIndex) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    /// The tile as a vector, `x` being the column and `y` the row.
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.col as f32, self.row as f32)
    }
}

impl std::ops::Add for TileIndex {
    type Output = TileIndex;

    fn add(self, rhs: TileIndex) -> TileIndex {
        TileIndex::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl std::ops::Sub for TileIndex {
    type Output = TileIndex;

    fn sub(self, rhs: TileIndex) -> TileIndex {
        TileIndex::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let tile = TileIndex::new(10, 10);
        assert_eq!(tile.step(Direction::Up, 4), TileIndex::new(6, 10));
        assert_eq!(tile.step(Direction::Down, 1), TileIndex::new(11, 10));
        assert_eq!(tile.step(Direction::Left, 2), TileIndex::new(10, 8));
        assert_eq!(tile.step(Direction::Right, 4), TileIndex::new(10, 14));
    }

    #[test]
    fn test_distance() {
        assert_eq!(TileIndex::new(0, 0).distance(TileIndex::new(3, 4)), 5.0);
        assert_eq!(TileIndex::new(-3, 0).distance(TileIndex::new(0, -4)), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(TileIndex::new(-1, 27).to_string(), "(-1, 27)");
    }
}
