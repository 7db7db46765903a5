pub mod angle_budget;
pub mod blender;
pub mod carver;
pub mod direction;
pub mod geometry;
pub mod world_path;

pub use angle_budget::AngleBudget;
pub use blender::{PathBlender, PathProximity};
pub use carver::{CarveOutcome, CarveRequest, PathCarver};
pub use direction::Direction;
pub use world_path::{WorldPath, WorldPathBuilder};
