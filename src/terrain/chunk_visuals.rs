// src/terrain/chunk_visuals.rs
use glam::{IVec2, Vec3};

use crate::path::PathProximity;
use crate::terrain::{ChunkPosition, Heightmap};

/// Read-only view of a finished chunk handed to mesh and decoration builders.
#[derive(Debug, Clone, Copy)]
pub struct ChunkSurface<'a> {
    pub position: ChunkPosition,
    pub origin: IVec2,
    pub heightmap: &'a Heightmap,
    pub proximity: &'a PathProximity,
    pub scale: f32,
    pub height_multiplier: f32,
}

impl ChunkSurface<'_> {
    /// Vertex position relative to the chunk origin, in world units.
    pub fn local_vertex(&self, x: u32, z: u32) -> Vec3 {
        let height = self.heightmap.get_clamped(x as i32, z as i32) * self.height_multiplier;
        Vec3::new(x as f32 * self.scale, height, z as f32 * self.scale)
    }

    pub fn world_vertex(&self, x: u32, z: u32) -> Vec3 {
        self.local_vertex(x, z) + Vec3::new(self.origin.x as f32, 0.0, self.origin.y as f32)
    }

    /// Central-difference normal, clamped at the chunk edge.
    pub fn surface_normal(&self, x: u32, z: u32) -> Vec3 {
        let (x, z) = (x as i32, z as i32);
        let h = |dx: i32, dz: i32| {
            self.heightmap.get_clamped(x + dx, z + dz) * self.height_multiplier
        };
        let dx = h(-1, 0) - h(1, 0);
        let dz = h(0, -1) - h(0, 1);
        let normal = Vec3::new(dx, 2.0 * self.scale, dz).normalize_or_zero();
        if normal == Vec3::ZERO { Vec3::Y } else { normal }
    }
}

/// External collaborator turning a chunk surface into something renderable.
pub trait ChunkVisualBuilder {
    type Handle;

    fn build(&mut self, surface: &ChunkSurface<'_>) -> Self::Handle;

    /// Free whatever `build` produced for `position`.
    fn release(&mut self, position: ChunkPosition, handle: Self::Handle);
}

/// Headless builder for servers and tools that only need heightmaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVisuals;

impl ChunkVisualBuilder for NoVisuals {
    type Handle = ();

    fn build(&mut self, _surface: &ChunkSurface<'_>) -> Self::Handle {}

    fn release(&mut self, _position: ChunkPosition, _handle: Self::Handle) {}
}
