use serde::{Deserialize, Serialize};

use crate::terrain::height_curve::HeightCurve;

const MAX_CHUNK_SIZE: u32 = 1024;
const MAX_SCALE: u32 = 64;

/// Preset family the parameters are revalidated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorldType {
    #[default]
    Island,
    Ocean,
}

/// Every knob the world generator reads.
///
/// Stored as a flat JSON document keyed by field name. Missing fields fall
/// back to [`Default`], unknown fields (render-only settings written by other
/// tools) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldGenerationParameters {
    pub world_type: WorldType,
    pub world_name: String,
    /// Target length of the walkable path in world units.
    pub walk_duration: u32,

    // Terrain grid
    /// Vertices per chunk edge minus one; a heightmap is `chunk_size + 1` wide.
    pub chunk_size: u32,
    /// World units between two neighbouring vertices.
    pub scale: u32,

    // Noise
    #[serde(rename = "noisefactor")]
    pub noise_factor: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub seed: i32,
    #[serde(rename = "MeshHeightMultiplier")]
    pub mesh_height_multiplier: f32,
    pub terrain_curve: HeightCurve,
    /// Blends the world-type presets between flat and rugged.
    pub hillyness: f32,

    // Streaming
    /// Chebyshev radius, in chunks, kept resident around the player.
    pub render_distance: i32,

    // Path carving
    /// Half-width of the ray cone, in degrees.
    pub maximum_path_tilt: f32,
    /// Ray length in heightmap cells.
    pub path_segment_length: u32,
    pub min_path_segment_length: u32,
    pub path_rays: u32,
    pub maximum_incline: f32,
    pub water_avoidance_penalty: f32,
    pub max_carve_steps: u32,
    pub max_path_chunks: u32,

    // Path blending
    pub on_path_distance: f32,
    pub near_path_distance: f32,

    // Water / biome levels in world units
    pub sea_level: i32,
    pub sand_level: i32,
    pub snow_level: i32,

    // Lanes
    pub lane_offset: f32,
    pub samples_per_curve: u32,
}

impl Default for WorldGenerationParameters {
    fn default() -> Self {
        Self {
            world_type: WorldType::Island,
            world_name: "New World".to_string(),
            walk_duration: 1800,

            chunk_size: 80,
            scale: 1,

            noise_factor: 2200.0,
            octaves: 7,
            persistence: 0.43,
            lacunarity: 2.0,
            seed: 0,
            mesh_height_multiplier: 400.0,
            terrain_curve: HeightCurve::default(),
            hillyness: 0.5,

            render_distance: 2,

            maximum_path_tilt: 30.0,
            path_segment_length: 8,
            min_path_segment_length: 5,
            path_rays: 10,
            maximum_incline: 0.2,
            water_avoidance_penalty: 200.0,
            max_carve_steps: 300,
            max_path_chunks: 100,

            on_path_distance: 30.0,
            near_path_distance: 100.0,

            sea_level: -160,
            sand_level: -150,
            snow_level: 400,

            lane_offset: 20.0,
            samples_per_curve: 20,
        }
    }
}

// Clamp into [min, max] and record a message when the value changed. NaN falls back to `min`.
fn clamp_reported(warnings: &mut Vec<String>, name: &str, value: f32, min: f32, max: f32) -> f32 {
    let fixed = if value.is_nan() { min } else { value.clamp(min, max) };
    if fixed != value {
        warnings.push(format!("{} {} outside [{}, {}]. Set to {}", name, value, min, max, fixed));
    }
    fixed
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

impl WorldGenerationParameters {
    /// Edge length of a chunk in world units.
    pub fn scaled_chunk_size(&self) -> i32 {
        i32::try_from(self.chunk_size.saturating_mul(self.scale)).unwrap_or(i32::MAX)
    }

    pub fn target_path_length(&self) -> f32 {
        self.walk_duration as f32
    }

    /// Number of 30-unit terrain tiles a runner covers at 20 units/s over the walk.
    pub fn tile_count(&self) -> u32 {
        const VELOCITY: f32 = 20.0;
        const TILE_LENGTH: f32 = 30.0;
        ((self.walk_duration as f32 * VELOCITY) / TILE_LENGTH) as u32
    }

    /// Minimum world distance between two kept master points.
    pub fn min_segment_world_length(&self) -> f32 {
        self.min_path_segment_length.saturating_mul(self.scale) as f32
    }

    /// Apply the world-type presets on top of the loaded values.
    pub fn revalidate(&mut self) {
        match self.world_type {
            WorldType::Ocean => {
                self.noise_factor = lerp(4000.0, 3400.0, self.hillyness);
                self.mesh_height_multiplier = lerp(150.0, 250.0, self.hillyness);
                self.render_distance = 2;
                self.sea_level = -120;
                self.sand_level = -110;
                self.snow_level = i32::MAX;
            }
            WorldType::Island => {
                self.noise_factor = lerp(3200.0, 3400.0, self.hillyness);
                self.sea_level = 2;
            }
        }
    }

    /// Validate and correct out-of-range parameters.
    ///
    /// Returns a message for every parameter that had to be changed.
    pub fn validate_and_fix(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.chunk_size < 2 {
            warnings.push(format!("chunkSize {} raised to minimum of 2", self.chunk_size));
            self.chunk_size = 2;
        } else if self.chunk_size > MAX_CHUNK_SIZE {
            warnings.push(format!("chunkSize {} capped at {}", self.chunk_size, MAX_CHUNK_SIZE));
            self.chunk_size = MAX_CHUNK_SIZE;
        }
        if self.scale == 0 {
            warnings.push("scale must be positive. Set to 1".to_string());
            self.scale = 1;
        } else if self.scale > MAX_SCALE {
            warnings.push(format!("scale {} capped at {}", self.scale, MAX_SCALE));
            self.scale = MAX_SCALE;
        }

        if self.octaves == 0 {
            warnings.push("octaves set to minimum value of 1".to_string());
            self.octaves = 1;
        } else if self.octaves > 10 {
            warnings.push("octaves capped at maximum value of 10".to_string());
            self.octaves = 10;
        }
        if !(self.noise_factor > 0.0) {
            warnings.push("noisefactor must be positive. Set to default 2200".to_string());
            self.noise_factor = 2200.0;
        }
        self.persistence =
            clamp_reported(&mut warnings, "persistence", self.persistence, 0.01, 1.0);
        self.lacunarity = clamp_reported(&mut warnings, "lacunarity", self.lacunarity, 1.0, 4.0);
        self.hillyness = clamp_reported(&mut warnings, "hillyness", self.hillyness, 0.0, 1.0);

        if !(self.mesh_height_multiplier > 0.0) {
            warnings.push("MeshHeightMultiplier must be positive. Set to default 400".to_string());
            self.mesh_height_multiplier = 400.0;
        }

        if self.render_distance < 0 {
            warnings.push(format!("renderDistance {} raised to 0", self.render_distance));
            self.render_distance = 0;
        }

        if !(self.maximum_path_tilt > 0.0 && self.maximum_path_tilt <= 90.0) {
            warnings.push(format!(
                "maximumPathTilt {} outside (0, 90]. Set to default 30",
                self.maximum_path_tilt
            ));
            self.maximum_path_tilt = 30.0;
        }
        if self.path_segment_length == 0 {
            warnings.push("pathSegmentLength must be positive. Set to 1".to_string());
            self.path_segment_length = 1;
        }
        if self.path_rays == 0 {
            warnings.push("pathRays must be positive. Set to default 10".to_string());
            self.path_rays = 10;
        }
        if !(self.maximum_incline > 0.0) {
            warnings.push("maximumIncline must be positive. Set to default 0.2".to_string());
            self.maximum_incline = 0.2;
        }
        self.water_avoidance_penalty = clamp_reported(
            &mut warnings,
            "waterAvoidancePenalty",
            self.water_avoidance_penalty,
            0.0,
            f32::MAX,
        );
        if self.max_carve_steps == 0 {
            warnings.push("maxCarveSteps must be positive. Set to default 300".to_string());
            self.max_carve_steps = 300;
        }
        if self.max_path_chunks == 0 {
            warnings.push("maxPathChunks must be positive. Set to default 100".to_string());
            self.max_path_chunks = 100;
        }

        if self.on_path_distance < 0.0 {
            warnings.push("onPathDistance must not be negative. Set to 0".to_string());
            self.on_path_distance = 0.0;
        }
        if self.near_path_distance < self.on_path_distance {
            warnings.push(format!(
                "nearPathDistance {} below onPathDistance {}; raised to match",
                self.near_path_distance, self.on_path_distance
            ));
            self.near_path_distance = self.on_path_distance;
        }

        if self.samples_per_curve == 0 {
            warnings.push("samplesPerCurve must be positive. Set to default 20".to_string());
            self.samples_per_curve = 20;
        }
        self.lane_offset =
            clamp_reported(&mut warnings, "laneOffset", self.lane_offset, 0.0, f32::MAX);

        warnings
    }
}
