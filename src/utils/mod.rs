pub mod error_logger;

pub use error_logger::{clear_history, init as init_logging, warning_history};
