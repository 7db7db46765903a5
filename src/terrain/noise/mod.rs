pub mod noise_field;
pub mod noise_parameters;

pub use noise_field::NoiseField;
pub use noise_parameters::NoiseParameters;
