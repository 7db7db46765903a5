//! Procedural world generation for an endless runner: noise terrain streamed in
//! chunks around the player, a walkable path carved through it and three lanes
//! derived from that path.

pub mod config;
pub mod core;
pub mod error;
pub mod path;
pub mod spline;
pub mod terrain;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::{ParameterStore, WorldGenerationParameters, WorldType};
pub use crate::core::{GenerationSession, GenerationTiming};
pub use error::{Result, WorldGenError};
pub use path::{WorldPath, WorldPathBuilder};
pub use spline::{Lane, LaneDeriver, LaneSet};
pub use terrain::{
    ChunkManager, ChunkPosition, ChunkVisualBuilder, Heightmap, HeightmapGenerator, NoVisuals,
};
