//! A single maze cell and its wall flags.

use super::Heading;
use serde::{Deserialize, Serialize};

/// One unit of the grid with a wall flag on each of the four sides.
///
/// Walls pack into the low 4 bits of a byte for snapshots:
/// N = 1, E = 2, S = 4, W = 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Wall to the north
    pub north: bool,
    /// Wall to the east
    pub east: bool,
    /// Wall to the south
    pub south: bool,
    /// Wall to the west
    pub west: bool,
}

impl Cell {
    /// Read the wall flag on the given side
    #[inline]
    pub fn wall(&self, dir: Heading) -> bool {
        match dir {
            Heading::North => self.north,
            Heading::East => self.east,
            Heading::South => self.south,
            Heading::West => self.west,
        }
    }

    /// Set the wall flag on the given side
    #[inline]
    pub fn set_wall(&mut self, dir: Heading, present: bool) {
        match dir {
            Heading::North => self.north = present,
            Heading::East => self.east = present,
            Heading::South => self.south = present,
            Heading::West => self.west = present,
        }
    }

    /// Pack the four wall flags into the low 4 bits of a byte
    #[inline]
    pub fn pack(&self) -> u8 {
        let mut b = 0u8;
        if self.north {
            b |= 1;
        }
        if self.east {
            b |= 2;
        }
        if self.south {
            b |= 4;
        }
        if self.west {
            b |= 8;
        }
        b
    }

    /// Rebuild a cell from a packed byte; high bits are ignored
    #[inline]
    pub fn unpack(byte: u8) -> Cell {
        Cell {
            north: byte & 1 != 0,
            east: byte & 2 != 0,
            south: byte & 4 != 0,
            west: byte & 8 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        for bits in 0u8..16 {
            let cell = Cell::unpack(bits);
            assert_eq!(cell.pack(), bits);
        }
    }

    #[test]
    fn test_high_bits_ignored() {
        let cell = Cell::unpack(0xF0 | 0b0101);
        assert!(cell.north);
        assert!(!cell.east);
        assert!(cell.south);
        assert!(!cell.west);
        assert_eq!(cell.pack(), 0b0101);
    }

    #[test]
    fn test_wall_accessors() {
        let mut cell = Cell::default();
        cell.set_wall(Heading::East, true);
        assert!(cell.wall(Heading::East));
        assert!(!cell.wall(Heading::North));
        cell.set_wall(Heading::East, false);
        assert!(!cell.wall(Heading::East));
    }
}
