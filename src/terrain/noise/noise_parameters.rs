// src/terrain/noise/noise_parameters.rs
use crate::config::WorldGenerationParameters;

/// Octave settings for [`super::NoiseField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParameters {
    pub seed: i32,
    /// World units per noise period at the base octave.
    pub noise_factor: f32,
    pub octaves: u32,
    /// Amplitude multiplier applied per octave.
    pub persistence: f32,
    /// Frequency multiplier applied per octave.
    pub lacunarity: f32,
}

impl NoiseParameters {
    pub fn from_world(params: &WorldGenerationParameters) -> Self {
        Self {
            seed: params.seed,
            noise_factor: params.noise_factor,
            octaves: params.octaves,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
        }
    }

    /// Largest magnitude the octave sum can reach.
    pub fn max_amplitude(&self) -> f32 {
        (0..self.octaves).map(|octave| self.persistence.powi(octave as i32)).sum()
    }
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self::from_world(&WorldGenerationParameters::default())
    }
}
