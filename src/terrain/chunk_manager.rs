use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;

use crate::config::WorldGenerationParameters;
use crate::path::{PathBlender, PathProximity, WorldPath};
use crate::terrain::chunk_visuals::{ChunkSurface, ChunkVisualBuilder};
use crate::terrain::{ChunkPosition, Heightmap, HeightmapGenerator};

const MAX_RENDER_DISTANCE: i32 = 32;

// A chunk kept alive around the reference point
pub struct ResidentChunk<H> {
    pub position: ChunkPosition,
    pub heightmap: Heightmap,
    pub proximity: PathProximity,
    pub created_at: Instant,
    visual: Option<H>,
}

impl<H> ResidentChunk<H> {
    pub fn visual(&self) -> Option<&H> {
        self.visual.as_ref()
    }
}

/// What one reconcile pass changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingUpdate {
    pub centre: ChunkPosition,
    pub created: Vec<ChunkPosition>,
    pub evicted: Vec<ChunkPosition>,
}

impl StreamingUpdate {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty()
    }
}

/// Keeps exactly the chunks within `render_distance` (Chebyshev) of the
/// reference chunk resident, blending each new chunk with the world path.
pub struct ChunkManager<B: ChunkVisualBuilder> {
    chunks: HashMap<ChunkPosition, ResidentChunk<B::Handle>>,
    generator: HeightmapGenerator,
    blender: PathBlender,
    path: Arc<WorldPath>,
    builder: B,
    render_distance: i32,
    centre: Option<ChunkPosition>,
    scaled_chunk_size: i32,
    scale: f32,
    height_multiplier: f32,
}

impl<B: ChunkVisualBuilder> ChunkManager<B> {
    pub fn new(params: &WorldGenerationParameters, path: Arc<WorldPath>, builder: B) -> Self {
        Self {
            chunks: HashMap::new(),
            generator: HeightmapGenerator::new(params),
            blender: PathBlender::new(params),
            path,
            builder,
            render_distance: params.render_distance.clamp(0, MAX_RENDER_DISTANCE),
            centre: None,
            scaled_chunk_size: params.scaled_chunk_size(),
            scale: params.scale as f32,
            height_multiplier: params.mesh_height_multiplier,
        }
    }

    /// Stream around a world position. Returns `None` while the reference
    /// point stays inside the chunk of the previous pass.
    pub fn update(&mut self, reference: Vec3) -> Option<StreamingUpdate> {
        let centre = ChunkPosition::from_world(reference, self.scaled_chunk_size);
        if self.centre == Some(centre) {
            return None;
        }
        Some(self.reconcile(centre))
    }

    /// Evict everything outside the neighbourhood of `centre`, then create what is missing.
    pub fn reconcile(&mut self, centre: ChunkPosition) -> StreamingUpdate {
        let wanted: HashSet<ChunkPosition> =
            centre.neighborhood(self.render_distance).into_iter().collect();

        let mut evicted: Vec<ChunkPosition> =
            self.chunks.keys().filter(|position| !wanted.contains(position)).copied().collect();
        evicted.sort();
        for &position in &evicted {
            self.unload_chunk(position);
        }

        let mut created: Vec<ChunkPosition> =
            wanted.iter().filter(|position| !self.chunks.contains_key(position)).copied().collect();
        created.sort();
        for &position in &created {
            self.load_chunk(position);
        }

        self.centre = Some(centre);
        log::debug!(
            "ChunkManager: centre {} created {} evicted {} resident {}",
            centre,
            created.len(),
            evicted.len(),
            self.chunks.len()
        );
        StreamingUpdate { centre, created, evicted }
    }

    fn load_chunk(&mut self, position: ChunkPosition) {
        let mut heightmap = self.generator.generate(position);
        let runs = self.path.neighborhood_runs(position);
        let proximity = self.blender.blend(&mut heightmap, position, &runs);

        let surface = ChunkSurface {
            position,
            origin: position.world_origin(self.scaled_chunk_size),
            heightmap: &heightmap,
            proximity: &proximity,
            scale: self.scale,
            height_multiplier: self.height_multiplier,
        };
        let visual = self.builder.build(&surface);

        self.chunks.insert(
            position,
            ResidentChunk {
                position,
                heightmap,
                proximity,
                created_at: Instant::now(),
                visual: Some(visual),
            },
        );
    }

    /// Drop a chunk and release its visual. Unknown positions are ignored.
    pub fn unload_chunk(&mut self, position: ChunkPosition) -> bool {
        let Some(mut chunk) = self.chunks.remove(&position) else {
            return false;
        };
        if let Some(visual) = chunk.visual.take() {
            self.builder.release(position, visual);
        }
        true
    }

    /// Clamped to `0..=32`; the next `update` reconciles even if the centre did not move.
    pub fn set_render_distance(&mut self, distance: i32) {
        self.render_distance = distance.clamp(0, MAX_RENDER_DISTANCE);
        self.centre = None;
    }

    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    pub fn centre(&self) -> Option<ChunkPosition> {
        self.centre
    }

    /// Release every resident chunk.
    pub fn clear(&mut self) {
        let positions: Vec<ChunkPosition> = self.chunks.keys().copied().collect();
        for position in positions {
            self.unload_chunk(position);
        }
        self.centre = None;
    }

    pub fn is_chunk_loaded(&self, position: ChunkPosition) -> bool {
        self.chunks.contains_key(&position)
    }

    pub fn get_chunk(&self, position: ChunkPosition) -> Option<&ResidentChunk<B::Handle>> {
        self.chunks.get(&position)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn loaded_positions(&self) -> Vec<ChunkPosition> {
        let mut positions: Vec<ChunkPosition> = self.chunks.keys().copied().collect();
        positions.sort();
        positions
    }

    pub fn path(&self) -> &WorldPath {
        &self.path
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }
}

impl<B: ChunkVisualBuilder> Drop for ChunkManager<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::chunk_visuals::NoVisuals;

    fn params(render_distance: i32) -> WorldGenerationParameters {
        WorldGenerationParameters { chunk_size: 8, scale: 2, render_distance, ..Default::default() }
    }

    fn manager(render_distance: i32) -> ChunkManager<NoVisuals> {
        ChunkManager::new(&params(render_distance), Arc::new(WorldPath::default()), NoVisuals)
    }

    #[test]
    fn test_resident_set_matches_neighbourhood() {
        let mut chunks = manager(2);
        let update = chunks.update(Vec3::new(5.0, 0.0, 5.0)).unwrap();
        assert_eq!(update.centre, ChunkPosition::ORIGIN);
        assert_eq!(update.created.len(), 25);
        assert!(update.evicted.is_empty());
        assert_eq!(chunks.chunk_count(), 25);
        for position in ChunkPosition::ORIGIN.neighborhood(2) {
            assert!(chunks.is_chunk_loaded(position));
        }
    }

    #[test]
    fn test_staying_in_the_same_chunk_is_a_no_op() {
        let mut chunks = manager(1);
        assert!(chunks.update(Vec3::new(1.0, 0.0, 1.0)).is_some());
        assert!(chunks.update(Vec3::new(15.0, 3.0, 15.0)).is_none());
        assert!(chunks.update(Vec3::new(16.0, 0.0, 1.0)).is_some());
    }

    #[test]
    fn test_unloading_a_missing_chunk_is_ignored() {
        let mut chunks = manager(0);
        chunks.update(Vec3::ZERO);
        assert!(!chunks.unload_chunk(ChunkPosition::new(40, 40)));
        assert_eq!(chunks.chunk_count(), 1);
    }

    #[test]
    fn test_render_distance_change_forces_reconcile() {
        let mut chunks = manager(1);
        chunks.update(Vec3::ZERO);
        assert_eq!(chunks.chunk_count(), 9);

        chunks.set_render_distance(0);
        let update = chunks.update(Vec3::ZERO).unwrap();
        assert_eq!(update.evicted.len(), 8);
        assert_eq!(chunks.loaded_positions(), vec![ChunkPosition::ORIGIN]);

        chunks.set_render_distance(100);
        assert_eq!(chunks.render_distance(), 32);
    }

    #[test]
    fn test_resident_heightmaps_match_the_generator_without_a_path() {
        let params = params(0);
        let mut chunks = manager(0);
        chunks.update(Vec3::new(-1.0, 0.0, -1.0));
        let position = ChunkPosition::new(-1, -1);
        let resident = chunks.get_chunk(position).unwrap();
        assert_eq!(resident.heightmap, HeightmapGenerator::new(&params).generate(position));
        assert!(resident.proximity.distances().iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn test_streaming_update_reports_whether_anything_changed() {
        let mut chunks = manager(1);
        let first = chunks.reconcile(ChunkPosition::ORIGIN);
        assert!(!first.is_empty());

        let again = chunks.reconcile(ChunkPosition::ORIGIN);
        let unchanged = StreamingUpdate {
            centre: ChunkPosition::ORIGIN,
            created: Vec::new(),
            evicted: Vec::new(),
        };
        assert_eq!(again, unchanged);
        assert!(again.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut chunks = manager(1);
        chunks.update(Vec3::ZERO);
        chunks.clear();
        assert_eq!(chunks.chunk_count(), 0);
        assert_eq!(chunks.centre(), None);
    }
}
