// src/path/carver.rs
use glam::{IVec2, Vec3};

use super::angle_budget::AngleBudget;
use super::direction::Direction;
use super::geometry::{clamp_incline, rotate_about_up, signed_angle};
use crate::config::WorldGenerationParameters;
use crate::terrain::{ChunkPosition, Heightmap};

/// Where and how the path enters a chunk.
#[derive(Debug, Clone, Copy)]
pub struct CarveRequest<'a> {
    pub heightmap: &'a Heightmap,
    pub chunk: ChunkPosition,
    /// Entry cell, usually on the border shared with the previous chunk.
    pub entry: (u32, u32),
    pub tangent: Vec3,
    /// Heading the path entered with.
    pub direction: Direction,
    /// Last point of the path so far, `None` for the very first chunk of a world.
    pub previous_point: Option<Vec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarveOutcome {
    /// Cell the carve stopped on.
    pub exit: (u32, u32),
    pub tangent: Vec3,
    /// New points in traversal order. Excludes the entry point unless this was the first chunk.
    pub points: Vec<Vec3>,
    pub reached_border: bool,
    pub steps: u32,
}

/// Greedy cone search growing a path across one chunk's heightmap.
#[derive(Debug, Clone)]
pub struct PathCarver {
    scale: i32,
    height_multiplier: f32,
    sea_level: f32,
    max_tilt: f32,
    ray_length: f32,
    rays: u32,
    max_incline: f32,
    water_penalty: f32,
    max_steps: u32,
}

impl PathCarver {
    pub fn new(params: &WorldGenerationParameters) -> Self {
        Self {
            scale: params.scale.max(1) as i32,
            height_multiplier: params.mesh_height_multiplier,
            sea_level: params.sea_level as f32,
            max_tilt: params.maximum_path_tilt,
            ray_length: params.path_segment_length as f32,
            rays: params.path_rays.max(1),
            max_incline: params.maximum_incline,
            water_penalty: params.water_avoidance_penalty,
            max_steps: params.max_carve_steps.max(1),
        }
    }

    pub fn carve(&self, request: &CarveRequest<'_>) -> CarveOutcome {
        let heightmap = request.heightmap;
        let chunk_size = heightmap.chunk_size();
        let origin = request.chunk.world_origin((chunk_size as i32).saturating_mul(self.scale));

        let mut points = Vec::new();
        let (mut x, mut z) = (request.entry.0.min(chunk_size), request.entry.1.min(chunk_size));
        let mut previous = match request.previous_point {
            Some(point) => point,
            None => {
                (x, z) = heightmap.closest_to_mean();
                let start = self.vertex_coordinate(heightmap, origin, x, z);
                points.push(start);
                start
            }
        };

        let mut tangent = Vec3::new(request.tangent.x, 0.0, request.tangent.z);
        if tangent == Vec3::ZERO {
            tangent = request.direction.to_vector();
        }
        let mut budget =
            AngleBudget::for_entry(request.direction)
                .turned(signed_angle(tangent, request.direction.to_vector()));

        let mut steps = 0;
        let reached_border = loop {
            let limits = budget.clamped(self.max_tilt);
            let (next_x, next_z) = self.next_cell(heightmap, tangent, (x, z), previous.y, limits);
            let (next_x, next_z) =
                keep_off_entry_border(request.direction, next_x, next_z, chunk_size);

            let coordinate = clamp_incline(
                previous,
                self.vertex_coordinate(heightmap, origin, next_x, next_z),
                self.max_incline,
            );
            points.push(coordinate);

            let new_tangent = Vec3::new(next_x as f32 - x as f32, 0.0, next_z as f32 - z as f32);
            if new_tangent != Vec3::ZERO {
                budget = budget.turned(signed_angle(new_tangent, tangent));
                tangent = new_tangent;
            }
            (x, z) = (next_x, next_z);
            previous = coordinate;
            steps += 1;

            if heightmap.is_border(x, z) {
                break true;
            }
            if steps >= self.max_steps {
                log::warn!(
                    "PathCarver: reached iteration limit ({}) in chunk {}, falling back to partial path",
                    self.max_steps,
                    request.chunk
                );
                break false;
            }
        };

        CarveOutcome { exit: (x, z), tangent, points, reached_border, steps }
    }

    /// World position of a heightmap vertex, lifted to stay clear of the sea.
    pub fn vertex_coordinate(&self, heightmap: &Heightmap, origin: IVec2, x: u32, z: u32) -> Vec3 {
        let height = heightmap.get_clamped(x as i32, z as i32) * self.height_multiplier;
        Vec3::new(
            (x as i32 * self.scale + origin.x) as f32,
            height.max(self.sea_level + 5.0),
            (z as i32 * self.scale + origin.y) as f32,
        )
    }

    /// Cheapest cell among the fan of rays allowed by `limits`.
    fn next_cell(
        &self,
        heightmap: &Heightmap,
        tangent: Vec3,
        from: (u32, u32),
        current_height: f32,
        limits: AngleBudget,
    ) -> (u32, u32) {
        let chunk_size = heightmap.chunk_size() as f32;
        let cone = limits.span().min(self.max_tilt * 2.0);
        let left = limits.left.max(-self.max_tilt);
        let between_rays = cone / self.rays as f32;
        let current = current_height / self.height_multiplier;

        let mut ray = rotate_about_up(tangent, left).normalize_or_zero() * self.ray_length;
        let mut best: Option<(f32, (u32, u32))> = None;
        for _ in 0..self.rays {
            let cell = (
                (from.0 as f32 + ray.x).clamp(0.0, chunk_size) as u32,
                (from.1 as f32 + ray.z).clamp(0.0, chunk_size) as u32,
            );
            let candidate = heightmap.get_clamped(cell.0 as i32, cell.1 as i32);
            let penalty = if candidate * self.height_multiplier < self.sea_level + 1.0 {
                self.water_penalty
            } else {
                0.0
            };
            let cost = (current - candidate).abs() + penalty;
            if best.is_none_or(|(lowest, _)| cost < lowest) {
                best = Some((cost, cell));
            }
            ray = rotate_about_up(ray, between_rays);
        }
        best.map_or(from, |(_, cell)| cell)
    }
}

/// Nudge a step off the border it would otherwise immediately exit through.
/// The south border is never an exit; east/westbound paths cannot fall back
/// onto the border they entered from.
fn keep_off_entry_border(
    direction: Direction,
    mut x: u32,
    mut z: u32,
    chunk_size: u32,
) -> (u32, u32) {
    if direction == Direction::East && x == 0 {
        x += 1;
    }
    if direction == Direction::West && x == chunk_size {
        x -= 1;
    }
    if z == 0 {
        z += 1;
    }
    (x, z)
}
