// Export all components from the terrain module
pub mod chunk_manager;
pub mod chunk_position;
pub mod chunk_visuals;
pub mod height_curve;
pub mod heightmap;
pub mod heightmap_generator;
pub mod noise;

// Re-export main types for easier access
pub use chunk_manager::{ChunkManager, ResidentChunk, StreamingUpdate};
pub use chunk_position::ChunkPosition;
pub use chunk_visuals::{ChunkSurface, ChunkVisualBuilder, NoVisuals};
pub use height_curve::{CurveKey, HeightCurve};
pub use heightmap::Heightmap;
pub use heightmap_generator::HeightmapGenerator;
pub use noise::{NoiseField, NoiseParameters};
