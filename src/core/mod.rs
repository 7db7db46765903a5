pub mod session;
pub mod timing;

pub use session::{GenerationSession, next_seed};
pub use timing::{GenerationState, GenerationTiming};
