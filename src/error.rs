use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum WorldGenError {
    /// The path needed more chunks than allowed to reach its target length.
    #[error("too many iterations building the world path: {limit} chunks carved, {length:.1} of {target:.1} units reached")]
    TooManyChunks { limit: u32, length: f32, target: f32 },

    #[error("lane derivation needs at least 2 path points, got {count}")]
    NotEnoughPathPoints { count: usize },

    #[error("world generation failed after {attempts} attempts: {last}")]
    RestartsExhausted { attempts: u32, last: Box<WorldGenError> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = WorldGenError> = std::result::Result<T, E>;
