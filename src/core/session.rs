// src/core/session.rs
use std::sync::Arc;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WorldGenerationParameters;
use crate::core::timing::{GenerationState, GenerationTiming};
use crate::error::{Result, WorldGenError};
use crate::path::{WorldPath, WorldPathBuilder};
use crate::spline::{LaneDeriver, LaneSet};
use crate::terrain::{ChunkManager, ChunkPosition, ChunkVisualBuilder, StreamingUpdate};

/// One generated world: parameters, path, lanes and the streamed chunks around the player.
pub struct GenerationSession<B: ChunkVisualBuilder> {
    params: WorldGenerationParameters,
    path: Arc<WorldPath>,
    lanes: LaneSet,
    chunks: ChunkManager<B>,
    timing: GenerationTiming,
}

impl<B: ChunkVisualBuilder> GenerationSession<B> {
    /// Run every generation stage once. A path that needs too many chunks is fatal.
    pub fn start(mut params: WorldGenerationParameters, builder: B) -> Result<Self> {
        let mut timing = GenerationTiming::new();

        for correction in params.validate_and_fix() {
            log::warn!("GenerationSession: {}", correction);
        }
        params.revalidate();
        timing.update_state(GenerationState::ConfigValidated);

        let path = match WorldPathBuilder::new(&params).build() {
            Ok(path) => Arc::new(path),
            Err(err) => {
                timing.update_state(GenerationState::Error);
                return Err(err);
            }
        };
        timing.update_state(GenerationState::PathBuilt);

        let lanes = match LaneDeriver::new(&params).derive(path.control_points()) {
            Ok(lanes) => lanes,
            Err(err) => {
                timing.update_state(GenerationState::Error);
                return Err(err);
            }
        };
        timing.update_state(GenerationState::LanesDerived);

        let mut chunks = ChunkManager::new(&params, Arc::clone(&path), builder);
        chunks.reconcile(ChunkPosition::ORIGIN);
        timing.update_state(GenerationState::ChunksStreamed);

        timing.update_state(GenerationState::Ready);
        Ok(Self { params, path, lanes, chunks, timing })
    }

    /// Start, restarting with a fresh seed whenever the path hits its chunk cap.
    pub fn start_with_restarts(
        params: WorldGenerationParameters,
        attempts: u32,
        mut make_builder: impl FnMut() -> B,
    ) -> Result<Self> {
        let attempts = attempts.max(1);
        let mut params = params;
        let mut attempt = 1;

        loop {
            match Self::start(params.clone(), make_builder()) {
                Ok(session) => return Ok(session),
                Err(err @ WorldGenError::TooManyChunks { .. }) => {
                    if attempt >= attempts {
                        log::error!(
                            "GenerationSession: giving up after {} attempts: {}",
                            attempts,
                            err
                        );
                        return Err(WorldGenError::RestartsExhausted {
                            attempts,
                            last: Box::new(err),
                        });
                    }
                    let seed = next_seed(params.seed);
                    log::error!(
                        "GenerationSession: attempt {}/{} with seed {} failed: {}; restarting with seed {}",
                        attempt,
                        attempts,
                        params.seed,
                        err,
                        seed
                    );
                    params.seed = seed;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Per-frame hook. Streams chunks once the reference point changes chunk.
    pub fn tick(&mut self, reference: Vec3) -> Option<StreamingUpdate> {
        self.chunks.update(reference)
    }

    pub fn params(&self) -> &WorldGenerationParameters {
        &self.params
    }

    pub fn path(&self) -> &WorldPath {
        &self.path
    }

    pub fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    pub fn chunks(&self) -> &ChunkManager<B> {
        &self.chunks
    }

    pub fn chunks_mut(&mut self) -> &mut ChunkManager<B> {
        &mut self.chunks
    }

    pub fn timing(&self) -> &GenerationTiming {
        &self.timing
    }
}

/// Deterministic follow-up seed for a restart.
pub fn next_seed(seed: i32) -> i32 {
    ChaCha8Rng::seed_from_u64(seed as u64).random::<i32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::NoVisuals;

    fn small_world() -> WorldGenerationParameters {
        WorldGenerationParameters {
            chunk_size: 16,
            walk_duration: 60,
            render_distance: 1,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_runs_every_stage() {
        let session = GenerationSession::start(small_world(), NoVisuals).unwrap();
        assert_eq!(session.timing().current_state, GenerationState::Ready);
        assert!(session.timing().breakdown().is_some());
        assert_eq!(session.chunks().chunk_count(), 9);
        assert_eq!(session.chunks().centre(), Some(ChunkPosition::ORIGIN));
        assert!(session.lanes().sample_count() >= 2);
    }

    #[test]
    fn test_start_applies_world_type_presets() {
        let session = GenerationSession::start(small_world(), NoVisuals).unwrap();
        assert_eq!(session.params().sea_level, 2);
    }

    #[test]
    fn test_tick_only_streams_on_chunk_change() {
        let mut session = GenerationSession::start(small_world(), NoVisuals).unwrap();
        assert!(session.tick(Vec3::new(3.0, 0.0, 3.0)).is_none());
        let update = session.tick(Vec3::new(3.0, 0.0, 20.0)).unwrap();
        assert_eq!(update.centre, ChunkPosition::new(0, 1));
        assert_eq!(update.created.len(), 3);
        assert_eq!(update.evicted.len(), 3);
    }

    #[test]
    fn test_restarts_exhausted_keeps_last_failure() {
        let params =
            WorldGenerationParameters { max_path_chunks: 1, walk_duration: 5000, ..small_world() };
        let mut built = 0;
        let result = GenerationSession::start_with_restarts(params, 3, || {
            built += 1;
            NoVisuals
        });

        match result {
            Err(WorldGenError::RestartsExhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, WorldGenError::TooManyChunks { limit: 1, .. }));
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("a single chunk cannot hold a 5000 unit path"),
        }
        assert_eq!(built, 3);
    }

    #[test]
    fn test_next_seed_is_deterministic() {
        assert_eq!(next_seed(42), next_seed(42));
        assert_ne!(next_seed(42), next_seed(43));
    }
}
