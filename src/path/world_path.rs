// src/path/world_path.rs
use std::collections::HashMap;
use std::time::{Duration, Instant};

use glam::Vec3;

use super::carver::{CarveRequest, PathCarver};
use super::direction::Direction;
use super::geometry::{path_length, simplify_path, trim_path_end};
use crate::config::WorldGenerationParameters;
use crate::error::{Result, WorldGenError};
use crate::terrain::{ChunkPosition, HeightmapGenerator};

/// The finished path of one world.
#[derive(Debug, Clone, Default)]
pub struct WorldPath {
    control_points: Vec<Vec3>,
    carved_length: f32,
    /// Path runs crossing each chunk. A chunk visited twice holds two runs.
    chunk_runs: HashMap<ChunkPosition, Vec<Vec<Vec3>>>,
    visited: Vec<ChunkPosition>,
    partial_chunks: usize,
    build_time: Duration,
}

impl WorldPath {
    /// Simplified master points handed to lane derivation.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Length of the simplified master points.
    pub fn length(&self) -> f32 {
        path_length(&self.control_points)
    }

    /// Length of the carved path before simplification.
    pub fn carved_length(&self) -> f32 {
        self.carved_length
    }

    /// Chunks in the order the path visited them.
    pub fn visited_chunks(&self) -> &[ChunkPosition] {
        &self.visited
    }

    pub fn contains_chunk(&self, chunk: ChunkPosition) -> bool {
        self.chunk_runs.contains_key(&chunk)
    }

    /// Number of chunks whose carve hit the step ceiling instead of a border.
    pub fn partial_chunks(&self) -> usize {
        self.partial_chunks
    }

    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    pub fn runs_in(&self, chunk: ChunkPosition) -> &[Vec<Vec3>] {
        self.chunk_runs.get(&chunk).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every run in the 3×3 block of chunks centred on `chunk`.
    pub fn neighborhood_runs(&self, chunk: ChunkPosition) -> Vec<&[Vec3]> {
        chunk
            .neighborhood(1)
            .into_iter()
            .flat_map(|position| self.runs_in(position).iter().map(Vec::as_slice))
            .collect()
    }
}

/// Carves the world path chunk by chunk until it is long enough.
#[derive(Debug, Clone)]
pub struct WorldPathBuilder {
    params: WorldGenerationParameters,
    generator: HeightmapGenerator,
    carver: PathCarver,
}

impl WorldPathBuilder {
    pub fn new(params: &WorldGenerationParameters) -> Self {
        Self {
            params: params.clone(),
            generator: HeightmapGenerator::new(params),
            carver: PathCarver::new(params),
        }
    }

    pub fn build(&self) -> Result<WorldPath> {
        let started = Instant::now();
        let params = &self.params;
        let chunk_size = params.chunk_size;
        let target = params.target_path_length();

        let mut chunk = ChunkPosition::ORIGIN;
        let mut entry = (chunk_size / 2, 0);
        let mut tangent = Vec3::Z;
        let mut direction = Direction::North;

        let mut points: Vec<Vec3> = Vec::new();
        let mut path = WorldPath::default();
        let mut length = 0.0;
        let mut carved_chunks = 0;

        while length < target {
            if carved_chunks >= params.max_path_chunks {
                log::error!(
                    "WorldPathBuilder: gave up after {} chunks with {:.1} of {:.1} units",
                    carved_chunks,
                    length,
                    target
                );
                return Err(WorldGenError::TooManyChunks {
                    limit: params.max_path_chunks,
                    length,
                    target,
                });
            }
            carved_chunks += 1;

            // throwaway heightmap, only used to steer the carve
            let heightmap = self.generator.generate(chunk);
            let previous_point = points.last().copied();
            let outcome = self.carver.carve(&CarveRequest {
                heightmap: &heightmap,
                chunk,
                entry,
                tangent,
                direction,
                previous_point,
            });

            let first_new = points.len();
            points.extend_from_slice(&outcome.points);
            length = path_length(&points);
            if length > target {
                trim_path_end(&mut points, target);
                length = path_length(&points);
            }

            let mut run = Vec::with_capacity(points.len() - first_new + 1);
            run.extend(previous_point);
            run.extend_from_slice(&points[first_new..]);
            path.chunk_runs.entry(chunk).or_default().push(run);
            path.visited.push(chunk);

            if !outcome.reached_border {
                path.partial_chunks += 1;
            }
            direction = match Direction::from_border(outcome.exit.0, outcome.exit.1, chunk_size) {
                Some(border) => border,
                None => {
                    let heading = Direction::from_heading(outcome.tangent);
                    log::warn!(
                        "WorldPathBuilder: path stopped inside chunk {} at {:?}, continuing {:?}",
                        chunk,
                        outcome.exit,
                        heading
                    );
                    heading
                }
            };
            tangent = outcome.tangent;
            (chunk, entry) = direction.next_chunk(chunk, outcome.exit, chunk_size);
        }

        path.carved_length = length;
        path.control_points = simplify_path(&points, params.min_segment_world_length());
        path.build_time = started.elapsed();

        log::info!(
            "WorldPathBuilder: path of {:.1} units across {} chunks ({} control points) built in {} ms",
            path.carved_length,
            path.visited.len(),
            path.control_points.len(),
            path.build_time.as_millis()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HeightCurve;

    fn params() -> WorldGenerationParameters {
        WorldGenerationParameters {
            chunk_size: 32,
            scale: 2,
            seed: 11,
            noise_factor: 500.0,
            mesh_height_multiplier: 200.0,
            sea_level: -80,
            walk_duration: 300,
            ..Default::default()
        }
    }

    #[test]
    fn test_path_stops_at_target_length() {
        let params = params();
        let path = WorldPathBuilder::new(&params).build().unwrap();
        assert!((path.carved_length() - 300.0).abs() < 1e-2);
        assert!(path.length() <= path.carved_length() + 1e-3);
        assert_eq!(path.visited_chunks()[0], ChunkPosition::ORIGIN);
    }

    #[test]
    fn test_runs_share_their_entry_point_with_the_previous_chunk() {
        let path = WorldPathBuilder::new(&params()).build().unwrap();
        let visited = path.visited_chunks();
        assert!(visited.len() >= 2);
        let first = &path.runs_in(visited[0])[0];
        let second = &path.runs_in(visited[1])[0];
        assert_eq!(first.last(), second.first());
    }

    #[test]
    fn test_control_points_respect_minimum_spacing() {
        let params = params();
        let path = WorldPathBuilder::new(&params).build().unwrap();
        let min = params.min_segment_world_length();
        let points = path.control_points();
        // the final pair may be shorter only when the path is two points long
        for pair in points.windows(2) {
            assert!(pair[0].distance(pair[1]) >= min - 1e-4 || points.len() == 2);
        }
    }

    #[test]
    fn test_chunk_cap_is_fatal() {
        let params =
            WorldGenerationParameters { walk_duration: 100_000, max_path_chunks: 3, ..params() };
        match WorldPathBuilder::new(&params).build() {
            Err(WorldGenError::TooManyChunks { limit, target, .. }) => {
                assert_eq!(limit, 3);
                assert_eq!(target, 100_000.0);
            }
            other => panic!("expected TooManyChunks, got {other:?}"),
        }
    }

    #[test]
    fn test_neighborhood_collects_runs_around_a_chunk() {
        let params =
            WorldGenerationParameters { terrain_curve: HeightCurve::constant(0.2), ..params() };
        let path = WorldPathBuilder::new(&params).build().unwrap();
        let first = path.visited_chunks()[0];
        let around = path.neighborhood_runs(first);
        assert!(!around.is_empty());
        assert!(path.neighborhood_runs(ChunkPosition::new(500, 500)).is_empty());
    }

    #[test]
    fn test_zero_target_builds_an_empty_path() {
        let params = WorldGenerationParameters { walk_duration: 0, ..params() };
        let path = WorldPathBuilder::new(&params).build().unwrap();
        assert!(path.control_points().is_empty());
        assert!(path.visited_chunks().is_empty());
    }
}
