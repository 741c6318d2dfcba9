//! Point and heading types for the maze grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid cell coordinates (integer column/row indices).
///
/// Out-of-bounds values are legal; mutating operations on the grid simply
/// ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbor cell one step in the given absolute direction.
    ///
    /// Row indices grow southward, so north is `y - 1`.
    #[inline]
    pub fn step(&self, dir: Heading) -> Point {
        let (dx, dy) = dir.delta();
        Point::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another point
    #[inline]
    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Absolute orientation on the grid, also used to address wall sides.
///
/// The numeric values 0..=3 match the wire encoding used by `.maze` files
/// and the firmware console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Heading {
    /// Toward decreasing y
    North = 0,
    /// Toward increasing x
    East = 1,
    /// Toward increasing y
    South = 2,
    /// Toward decreasing x
    West = 3,
}

impl Heading {
    /// All four directions in the fixed N, E, S, W expansion order.
    pub const CARDINAL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Decode from the 0..=3 wire value; values wrap modulo 4.
    #[inline]
    pub fn from_u8(value: u8) -> Heading {
        match value & 3 {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }

    /// Heading after a 90-degree left turn
    #[inline]
    pub fn left(self) -> Heading {
        Heading::from_u8(self as u8 + 3)
    }

    /// Heading after a 90-degree right turn
    #[inline]
    pub fn right(self) -> Heading {
        Heading::from_u8(self as u8 + 1)
    }

    /// Opposite heading (180-degree turn)
    #[inline]
    pub fn reverse(self) -> Heading {
        Heading::from_u8(self as u8 + 2)
    }

    /// Unit step (dx, dy) for one cell of travel in this direction
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    /// Absolute direction that is north-relative `offset` quarter turns
    /// clockwise from this heading, as seen from the robot.
    ///
    /// `from_relative(0)` is straight ahead, `1` is right, `2` is behind,
    /// `3` is left.
    #[inline]
    pub fn from_relative(self, offset: u8) -> Heading {
        Heading::from_u8(self as u8 + offset)
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::North
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations() {
        assert_eq!(Heading::North.left(), Heading::West);
        assert_eq!(Heading::North.right(), Heading::East);
        assert_eq!(Heading::North.reverse(), Heading::South);
        assert_eq!(Heading::West.right(), Heading::North);
        assert_eq!(Heading::West.left(), Heading::South);
    }

    #[test]
    fn test_step_follows_row_major_convention() {
        let p = Point::new(3, 3);
        assert_eq!(p.step(Heading::North), Point::new(3, 2));
        assert_eq!(p.step(Heading::East), Point::new(4, 3));
        assert_eq!(p.step(Heading::South), Point::new(3, 4));
        assert_eq!(p.step(Heading::West), Point::new(2, 3));
    }

    #[test]
    fn test_from_u8_wraps() {
        assert_eq!(Heading::from_u8(4), Heading::North);
        assert_eq!(Heading::from_u8(7), Heading::West);
    }
}
