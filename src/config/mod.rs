pub mod parameter_store;
pub mod world_parameters;

pub use parameter_store::{ConfigError, ParameterStore};
pub use world_parameters::{WorldGenerationParameters, WorldType};
