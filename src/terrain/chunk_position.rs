use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

/// Integer coordinate of a chunk in the infinite chunk grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    pub const ORIGIN: ChunkPosition = ChunkPosition { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing a world position. `scaled_chunk_size` is the chunk edge in world units.
    pub fn from_world(position: Vec3, scaled_chunk_size: i32) -> Self {
        let size = scaled_chunk_size.max(1) as f32;
        Self {
            x: (position.x / size).floor() as i32,
            z: (position.z / size).floor() as i32,
        }
    }

    /// World-space (x, z) of the chunk's (0, 0) vertex.
    pub fn world_origin(&self, scaled_chunk_size: i32) -> IVec2 {
        IVec2::new(self.x * scaled_chunk_size, self.z * scaled_chunk_size)
    }

    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self { x: self.x + dx, z: self.z + dz }
    }

    pub fn chebyshev_distance(&self, other: &ChunkPosition) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Every position within `radius` chunks (Chebyshev), row by row from the south-west corner.
    pub fn neighborhood(&self, radius: i32) -> Vec<ChunkPosition> {
        let radius = radius.max(0);
        let side = (2 * radius + 1) as usize;
        let mut positions = Vec::with_capacity(side * side);
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                positions.push(self.offset(dx, dz));
            }
        }
        positions
    }
}

impl std::fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
