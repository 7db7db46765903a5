use std::sync::Arc;

use glam::Vec3;

use crate::config::WorldGenerationParameters;
use crate::path::{CarveRequest, Direction, PathCarver, WorldPathBuilder};
use crate::path::geometry::path_length;
use crate::terrain::{
    ChunkManager, ChunkPosition, ChunkSurface, ChunkVisualBuilder, HeightCurve, HeightmapGenerator,
};
use crate::utils::error_logger;

/// Builder double remembering every build and release call.
#[derive(Default)]
struct RecordingBuilder {
    built: Vec<ChunkPosition>,
    released: Vec<ChunkPosition>,
}

impl ChunkVisualBuilder for RecordingBuilder {
    type Handle = ChunkPosition;

    fn build(&mut self, surface: &ChunkSurface<'_>) -> Self::Handle {
        self.built.push(surface.position);
        surface.position
    }

    fn release(&mut self, position: ChunkPosition, handle: Self::Handle) {
        assert_eq!(position, handle);
        self.released.push(position);
    }
}

fn seeded_world() -> WorldGenerationParameters {
    WorldGenerationParameters {
        seed: 42,
        walk_duration: 200,
        chunk_size: 80,
        scale: 1,
        ..Default::default()
    }
}

// Flat world with a needle-thin ray fan: the path runs straight north through three chunks
#[test]
fn test_straight_world_spans_three_chunks() {
    let params = WorldGenerationParameters {
        walk_duration: 160,
        terrain_curve: HeightCurve::constant(0.1),
        maximum_path_tilt: 1e-6,
        ..seeded_world()
    };
    let path = WorldPathBuilder::new(&params).build().unwrap();

    assert_eq!(
        path.visited_chunks(),
        [ChunkPosition::new(0, 0), ChunkPosition::new(0, 1), ChunkPosition::new(0, 2)]
    );
    // starts on the chunk centre, one point every segment length
    let points = path.control_points();
    assert_eq!(points.len(), 21);
    assert_eq!(points[0], Vec3::new(40.0, points[0].y, 40.0));
    assert!(points.iter().all(|p| p.x == 40.0));
    assert_eq!(points[20].z, 200.0);

    let target = params.target_path_length();
    assert!((path.carved_length() - target).abs() < 1e-3);
    assert!((path_length(points) - target).abs() <= params.min_segment_world_length());
}

// Noise terrain, same length guarantee
#[test]
fn test_noisy_path_length_matches_target() {
    let params = WorldGenerationParameters { walk_duration: 220, ..seeded_world() };
    let path = WorldPathBuilder::new(&params).build().unwrap();

    let target = params.target_path_length();
    assert!((path.carved_length() - target).abs() < 1e-2);
    let simplified = path_length(path.control_points());
    assert!((simplified - target).abs() <= params.min_segment_world_length());
}

// Same seed, same path
#[test]
fn test_path_is_reproducible() {
    let params = seeded_world();
    let first = WorldPathBuilder::new(&params).build().unwrap();
    let second = WorldPathBuilder::new(&params).build().unwrap();
    assert_eq!(first.control_points(), second.control_points());
    assert_eq!(first.visited_chunks(), second.visited_chunks());
}

// A chunk lying entirely below sea level
#[test]
fn test_underwater_chunk_stops_at_iteration_ceiling() {
    error_logger::init();
    let params = WorldGenerationParameters {
        terrain_curve: HeightCurve::constant(-0.9),
        max_carve_steps: 3,
        ..seeded_world()
    };
    let generator = HeightmapGenerator::new(&params);
    let chunk = ChunkPosition::new(0, 1);
    let heightmap = generator.generate(chunk);
    let sea_level = params.sea_level as f32;
    assert!(heightmap.values().iter().all(|&h| h * params.mesh_height_multiplier < sea_level));

    let carver = PathCarver::new(&params);
    let previous = carver.vertex_coordinate(&heightmap, chunk.world_origin(80), 40, 0);
    let outcome = carver.carve(&CarveRequest {
        heightmap: &heightmap,
        chunk,
        entry: (40, 0),
        tangent: Vec3::Z,
        direction: Direction::North,
        previous_point: Some(previous),
    });

    assert!(!outcome.reached_border);
    assert_eq!(outcome.steps, 3);
    assert_eq!(outcome.points.len(), 3);
    // bridged above the water
    assert!(outcome.points.iter().all(|p| p.y >= params.sea_level as f32 + 5.0 - 1e-3));
    assert!(
        error_logger::warning_history()
            .iter()
            .any(|entry| entry.contains("PathCarver: reached iteration limit (3) in chunk (0, 1)"))
    );
}

// The whole path still completes when every chunk is cut short
#[test]
fn test_underwater_world_path_terminates() {
    let params = WorldGenerationParameters {
        terrain_curve: HeightCurve::constant(-0.9),
        max_carve_steps: 3,
        walk_duration: 100,
        ..seeded_world()
    };
    let path = WorldPathBuilder::new(&params).build().unwrap();
    assert!((path.carved_length() - 100.0).abs() < 1e-2);
    assert!(path.partial_chunks() >= 1);
}

// Moving one chunk east with renderDistance 1
#[test]
fn test_streaming_follows_reference_point() {
    let params = WorldGenerationParameters { render_distance: 1, ..seeded_world() };
    let path = Arc::new(WorldPathBuilder::new(&params).build().unwrap());
    let mut chunks = ChunkManager::new(&params, path, RecordingBuilder::default());

    chunks.update(Vec3::new(40.0, 0.0, 40.0)).unwrap();
    assert_eq!(chunks.chunk_count(), 9);
    assert!(chunks.is_chunk_loaded(ChunkPosition::new(-1, -1)));

    let update = chunks.update(Vec3::new(120.0, 0.0, 40.0)).unwrap();
    assert_eq!(update.centre, ChunkPosition::new(1, 0));
    assert!(update.evicted.contains(&ChunkPosition::new(-1, -1)));
    assert!(update.created.contains(&ChunkPosition::new(2, 1)));
    assert_eq!(update.evicted.len(), 3);
    assert_eq!(update.created.len(), 3);
    assert_eq!(chunks.chunk_count(), 9);
    assert!(!chunks.is_chunk_loaded(ChunkPosition::new(-1, -1)));
    assert!(chunks.is_chunk_loaded(ChunkPosition::new(2, 1)));

    let builder = chunks.builder();
    assert_eq!(builder.built.len(), 12);
    assert_eq!(builder.released, update.evicted);

    // the path starts in chunk (0, 0), so that chunk is blended
    let origin = chunks.get_chunk(ChunkPosition::ORIGIN).unwrap();
    assert!(origin.proximity.distances().iter().any(|&d| d <= params.on_path_distance));
    assert_eq!(origin.visual(), Some(&ChunkPosition::ORIGIN));
}
