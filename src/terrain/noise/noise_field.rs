// src/terrain/noise/noise_field.rs
use glam::DVec2;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::noise_parameters::NoiseParameters;

/// Half-width of the range octave offsets are drawn from.
const OFFSET_RANGE: i32 = 100_000;

/// Deterministic multi-octave Perlin sampler.
///
/// Each octave is shifted by its own offset drawn from a `ChaCha8Rng` seeded
/// with the world seed, so the field is a pure function of
/// `(seed, octave settings, x, z)`. Callers pass world-space coordinates;
/// there is no per-chunk state.
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
    params: NoiseParameters,
    octave_offsets: Vec<DVec2>,
}

impl NoiseField {
    pub fn new(params: NoiseParameters) -> Self {
        Self {
            perlin: Perlin::new(params.seed as u32),
            octave_offsets: Self::octave_offsets(params.seed, params.octaves),
            params,
        }
    }

    /// One offset per octave, reproducible for a given seed and octave count.
    pub fn octave_offsets(seed: i32, octaves: u32) -> Vec<DVec2> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        (0..octaves)
            .map(|_| {
                let x = rng.random_range(-OFFSET_RANGE..OFFSET_RANGE);
                let z = rng.random_range(-OFFSET_RANGE..OFFSET_RANGE);
                DVec2::new(x as f64, z as f64)
            })
            .collect()
    }

    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    pub fn offsets(&self) -> &[DVec2] {
        &self.octave_offsets
    }

    /// Octave sum at a world position, roughly in `[-max_amplitude, max_amplitude]`.
    pub fn sample(&self, world_x: f64, world_z: f64) -> f32 {
        let noise_factor = self.params.noise_factor.max(f32::EPSILON) as f64;
        let mut amplitude = 1.0f64;
        let mut frequency = 1.0f64;
        let mut total = 0.0f64;

        for offset in &self.octave_offsets {
            let sample_x = (world_x + offset.x) / noise_factor * frequency;
            let sample_z = (world_z + offset.y) / noise_factor * frequency;
            // Perlin is already centred on zero, equivalent to 2·p − 1 for a [0, 1] source
            let value = self.perlin.get([sample_x, sample_z]).clamp(-1.0, 1.0);
            total += value * amplitude;

            amplitude *= self.params.persistence as f64;
            frequency *= self.params.lacunarity as f64;
        }

        total as f32
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("params", &self.params)
            .field("octave_offsets", &self.octave_offsets)
            .finish()
    }
}
