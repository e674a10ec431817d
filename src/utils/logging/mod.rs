//! Logging, console output and load progress

pub mod console;
pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_load_progress_bar, finish_and_clear};
