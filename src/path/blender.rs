// src/path/blender.rs
use glam::{Vec2, Vec3};

use super::geometry::distance_to_segment;
use crate::config::WorldGenerationParameters;
use crate::terrain::{ChunkPosition, Heightmap};

/// Closest planar distance from every heightmap vertex to the path.
///
/// Vertices with no path segment nearby hold `f32::MAX`. Decorators use this
/// to keep props off the walkable corridor.
#[derive(Debug, Clone, PartialEq)]
pub struct PathProximity {
    chunk_size: u32,
    distances: Vec<f32>,
}

impl PathProximity {
    pub fn unreachable(chunk_size: u32) -> Self {
        let side = chunk_size as usize + 1;
        Self { chunk_size, distances: vec![f32::MAX; side * side] }
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        if x > self.chunk_size || z > self.chunk_size {
            return None;
        }
        self.distances.get(z as usize * (self.chunk_size as usize + 1) + x as usize).copied()
    }

    /// True when vertex `index` (row-major) lies closer than `distance` to the path.
    pub fn within(&self, index: usize, distance: f32) -> bool {
        self.distances.get(index).is_some_and(|&d| d < distance)
    }
}

/// Reshapes a chunk heightmap around the path segments of its 3×3 neighbourhood.
#[derive(Debug, Clone)]
pub struct PathBlender {
    on_path: f32,
    near_path: f32,
    scale: i32,
    height_multiplier: f32,
}

impl PathBlender {
    pub fn new(params: &WorldGenerationParameters) -> Self {
        Self {
            on_path: params.on_path_distance,
            near_path: params.near_path_distance.max(params.on_path_distance),
            scale: params.scale.max(1) as i32,
            height_multiplier: params.mesh_height_multiplier,
        }
    }

    /// Pull every vertex towards its closest path segment.
    ///
    /// Inside `onPathDistance` the vertex takes the path height; up to
    /// `nearPathDistance` it fades linearly back to its noise height. The
    /// fade always starts from the unblended heights, not from earlier writes.
    pub fn blend(
        &self,
        heightmap: &mut Heightmap,
        chunk: ChunkPosition,
        segments: &[&[Vec3]],
    ) -> PathProximity {
        let chunk_size = heightmap.chunk_size();
        let origin = chunk.world_origin((chunk_size as i32).saturating_mul(self.scale));
        let side = heightmap.side();
        let original = heightmap.values().to_vec();
        let mut proximity = PathProximity::unreachable(chunk_size);

        let values = heightmap.values_mut();
        for z in 0..side {
            let world_z = (origin.y + z as i32 * self.scale) as f32;
            for x in 0..side {
                let world_x = (origin.x + x as i32 * self.scale) as f32;
                let index = z * side + x;

                let cell = Vec2::new(world_x, world_z);
                let Some((distance, path_height)) = self.closest_path_height(cell, segments) else {
                    continue;
                };
                proximity.distances[index] = distance;

                if distance < self.on_path {
                    values[index] = path_height;
                } else if distance < self.near_path {
                    let weight = 1.0 - inverse_lerp(self.on_path, self.near_path, distance);
                    values[index] = lerp(original[index], path_height, weight);
                }
            }
        }

        let shaped = proximity.distances.iter().filter(|&&d| d < self.near_path).count();
        log::debug!(
            "PathBlender: chunk {} blended {} of {} vertices",
            chunk,
            shaped,
            proximity.distances.len()
        );
        proximity
    }

    /// Distance to the closest segment and the path height there, in heightmap units.
    fn closest_path_height(&self, cell: Vec2, segments: &[&[Vec3]]) -> Option<(f32, f32)> {
        let mut closest: Option<(f32, f32, Vec3, Vec3)> = None;
        for points in segments {
            for pair in points.windows(2) {
                let (p0, p1) = (pair[0], pair[1]);
                let (distance, t) =
                    distance_to_segment(Vec2::new(p0.x, p0.z), Vec2::new(p1.x, p1.z), cell);
                if closest.is_none_or(|(best, ..)| distance < best) {
                    closest = Some((distance, t, p0, p1));
                }
            }
        }
        closest.map(|(distance, t, p0, p1)| {
            (distance, lerp(p0.y, p1.y, t) / self.height_multiplier)
        })
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> WorldGenerationParameters {
        WorldGenerationParameters {
            chunk_size: 20,
            scale: 1,
            mesh_height_multiplier: 100.0,
            on_path_distance: 3.0,
            near_path_distance: 8.0,
            ..Default::default()
        }
    }

    // straight path along world z = 10 at world height 50 (0.5 normalized)
    fn straight_path() -> Vec<Vec3> {
        vec![Vec3::new(-5.0, 50.0, 10.0), Vec3::new(25.0, 50.0, 10.0)]
    }

    #[test]
    fn test_two_zone_falloff() {
        let blender = PathBlender::new(&params());
        let mut map = Heightmap::filled(20, 0.0);
        let path = straight_path();
        let proximity = blender.blend(&mut map, ChunkPosition::ORIGIN, &[path.as_slice()]);

        // on the corridor
        assert_eq!(map.get(4, 10), Some(0.5));
        assert_eq!(map.get(4, 12), Some(0.5));
        // distance 5 inside the 3..8 fade keeps 60% of the path height
        assert!((map.get(4, 15).unwrap() - 0.3).abs() < 1e-5);
        // outside the near zone
        assert_eq!(map.get(4, 19), Some(0.0));
        assert_eq!(proximity.get(4, 19), Some(9.0));
        assert!(proximity.within(12 * 21 + 4, 3.0));
    }

    #[test]
    fn test_no_segments_leave_heights_untouched() {
        let blender = PathBlender::new(&params());
        let mut map = Heightmap::filled(20, 0.3);
        let proximity = blender.blend(&mut map, ChunkPosition::ORIGIN, &[]);
        assert!(map.values().iter().all(|&v| v == 0.3));
        assert!(proximity.distances().iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn test_reblending_the_corridor_is_idempotent() {
        let blender = PathBlender::new(&params());
        let path = straight_path();
        let mut map = Heightmap::filled(20, 0.1);
        blender.blend(&mut map, ChunkPosition::ORIGIN, &[path.as_slice()]);
        let once = map.clone();
        blender.blend(&mut map, ChunkPosition::ORIGIN, &[path.as_slice()]);
        for z in 8..=12 {
            for x in 0..=20 {
                assert_eq!(map.get(x, z), once.get(x, z));
            }
        }
    }

    #[test]
    fn test_closest_segment_wins_across_neighbour_paths() {
        let blender = PathBlender::new(&params());
        let mut map = Heightmap::filled(20, 0.0);
        let low = vec![Vec3::new(0.0, 10.0, 2.0), Vec3::new(20.0, 10.0, 2.0)];
        let high = vec![Vec3::new(0.0, 90.0, 18.0), Vec3::new(20.0, 90.0, 18.0)];
        blender.blend(&mut map, ChunkPosition::ORIGIN, &[low.as_slice(), high.as_slice()]);
        assert_eq!(map.get(10, 2), Some(0.1));
        assert_eq!(map.get(10, 18), Some(0.9));
    }

    #[test]
    fn test_world_offset_of_the_chunk_is_respected() {
        let blender = PathBlender::new(&params());
        let mut map = Heightmap::filled(20, 0.0);
        // path lies in chunk (1, 0); vertex x = 0 of that chunk is world x = 20
        let path = vec![Vec3::new(20.0, 70.0, -10.0), Vec3::new(20.0, 70.0, 30.0)];
        blender.blend(&mut map, ChunkPosition::new(1, 0), &[path.as_slice()]);
        assert!((map.get(0, 5).unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(map.get(20, 5), Some(0.0));
    }
}
