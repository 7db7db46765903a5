use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::terrain::ChunkPosition;

/// Compass heading on the chunk grid. +Z is north, +X is east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Clockwise order starting at north; index `i` is `i * 45` degrees from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unnormalized grid step for this heading.
    pub fn to_vector(self) -> Vec3 {
        match self {
            Direction::North => Vec3::Z,
            Direction::NorthEast => Vec3::new(1.0, 0.0, 1.0),
            Direction::East => Vec3::X,
            Direction::SouthEast => Vec3::new(1.0, 0.0, -1.0),
            Direction::South => Vec3::NEG_Z,
            Direction::SouthWest => Vec3::new(-1.0, 0.0, -1.0),
            Direction::West => Vec3::NEG_X,
            Direction::NorthWest => Vec3::new(-1.0, 0.0, 1.0),
        }
    }

    /// Border a cell lies on, `None` for interior cells. Corners map to diagonals.
    pub fn from_border(x: u32, z: u32, chunk_size: u32) -> Option<Direction> {
        let east = x == chunk_size;
        let west = x == 0;
        if z == chunk_size {
            Some(match (east, west) {
                (true, _) => Direction::NorthEast,
                (_, true) => Direction::NorthWest,
                _ => Direction::North,
            })
        } else if z == 0 {
            Some(match (east, west) {
                (true, _) => Direction::SouthEast,
                (_, true) => Direction::SouthWest,
                _ => Direction::South,
            })
        } else if east {
            Some(Direction::East)
        } else if west {
            Some(Direction::West)
        } else {
            None
        }
    }

    /// Nearest of the eight headings to a planar vector. Zero vectors map to north.
    pub fn from_heading(heading: Vec3) -> Direction {
        if heading.x == 0.0 && heading.z == 0.0 {
            return Direction::North;
        }
        let degrees = heading.x.atan2(heading.z).to_degrees().rem_euclid(360.0);
        let sector = ((degrees / 45.0).round() as usize) % 8;
        Self::ALL[sector]
    }

    /// Neighbouring chunk reached by leaving through this border, and the
    /// entry cell in that chunk that continues from `exit`.
    pub fn next_chunk(
        self,
        current: ChunkPosition,
        exit: (u32, u32),
        chunk_size: u32,
    ) -> (ChunkPosition, (u32, u32)) {
        let (x, z) = exit;
        let n = chunk_size;
        match self {
            Direction::North => (current.offset(0, 1), (x, 0)),
            Direction::NorthEast => (current.offset(1, 1), (0, 0)),
            Direction::East => (current.offset(1, 0), (0, z)),
            Direction::SouthEast => (current.offset(1, -1), (0, n)),
            Direction::South => (current.offset(0, -1), (x, n)),
            Direction::SouthWest => (current.offset(-1, -1), (n, n)),
            Direction::West => (current.offset(-1, 0), (n, z)),
            Direction::NorthWest => (current.offset(-1, 1), (n, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_directions() {
        let n = 10;
        assert_eq!(Direction::from_border(5, 10, n), Some(Direction::North));
        assert_eq!(Direction::from_border(10, 10, n), Some(Direction::NorthEast));
        assert_eq!(Direction::from_border(0, 10, n), Some(Direction::NorthWest));
        assert_eq!(Direction::from_border(10, 4, n), Some(Direction::East));
        assert_eq!(Direction::from_border(0, 4, n), Some(Direction::West));
        assert_eq!(Direction::from_border(4, 0, n), Some(Direction::South));
        assert_eq!(Direction::from_border(10, 0, n), Some(Direction::SouthEast));
        assert_eq!(Direction::from_border(0, 0, n), Some(Direction::SouthWest));
        assert_eq!(Direction::from_border(4, 4, n), None);
    }

    #[test]
    fn test_heading_quantizes_to_nearest_sector() {
        assert_eq!(Direction::from_heading(Vec3::new(0.1, 0.0, 1.0)), Direction::North);
        assert_eq!(Direction::from_heading(Vec3::new(1.0, 3.0, 1.1)), Direction::NorthEast);
        assert_eq!(Direction::from_heading(Vec3::new(-5.0, 0.0, 0.2)), Direction::West);
        assert_eq!(Direction::from_heading(Vec3::new(0.0, 0.0, -2.0)), Direction::South);
        assert_eq!(Direction::from_heading(Vec3::ZERO), Direction::North);
        for direction in Direction::ALL {
            assert_eq!(Direction::from_heading(direction.to_vector()), direction);
        }
    }

    #[test]
    fn test_next_chunk_continues_across_the_border() {
        let here = ChunkPosition::new(2, 3);
        let next = |direction: Direction, exit: (u32, u32)| direction.next_chunk(here, exit, 10);
        assert_eq!(next(Direction::North, (7, 10)), (ChunkPosition::new(2, 4), (7, 0)));
        assert_eq!(next(Direction::East, (10, 6)), (ChunkPosition::new(3, 3), (0, 6)));
        assert_eq!(next(Direction::West, (0, 6)), (ChunkPosition::new(1, 3), (10, 6)));
        assert_eq!(next(Direction::NorthEast, (10, 10)), (ChunkPosition::new(3, 4), (0, 0)));
        assert_eq!(next(Direction::NorthWest, (0, 10)), (ChunkPosition::new(1, 4), (10, 0)));
        assert_eq!(next(Direction::South, (3, 0)), (ChunkPosition::new(2, 2), (3, 10)));
    }
}
