// src/terrain/heightmap_generator.rs
use crate::config::WorldGenerationParameters;
use crate::terrain::chunk_position::ChunkPosition;
use crate::terrain::height_curve::HeightCurve;
use crate::terrain::heightmap::Heightmap;
use crate::terrain::noise::{NoiseField, NoiseParameters};

/// Builds per-chunk heightmaps from the shared [`NoiseField`] and terrain curve.
#[derive(Debug, Clone)]
pub struct HeightmapGenerator {
    field: NoiseField,
    curve: HeightCurve,
    chunk_size: u32,
    scale: i32,
}

impl HeightmapGenerator {
    pub fn new(params: &WorldGenerationParameters) -> Self {
        Self {
            field: NoiseField::new(NoiseParameters::from_world(params)),
            curve: params.terrain_curve.clone(),
            chunk_size: params.chunk_size,
            scale: params.scale as i32,
        }
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn noise_field(&self) -> &NoiseField {
        &self.field
    }

    /// Curve-mapped height at an integer world coordinate.
    pub fn height_at(&self, world_x: i32, world_z: i32) -> f32 {
        self.curve.evaluate(self.field.sample(world_x as f64, world_z as f64))
    }

    /// Heightmap of the chunk at `position`.
    ///
    /// World coordinates are computed in integers before sampling, so the
    /// shared edge rows of two neighbouring chunks are bit-identical.
    pub fn generate(&self, position: ChunkPosition) -> Heightmap {
        let origin = position.world_origin((self.chunk_size as i32).saturating_mul(self.scale));
        let mut heightmap = Heightmap::new(self.chunk_size);
        let side = heightmap.side();
        let values = heightmap.values_mut();

        for z in 0..side {
            let world_z = origin.y + z as i32 * self.scale;
            for x in 0..side {
                let world_x = origin.x + x as i32 * self.scale;
                values[z * side + x] = self.height_at(world_x, world_z);
            }
        }
        heightmap
    }
}
