//! Log lines for file loading

use std::path::Path;
use std::time::Duration;

/// Log that reading `path` has started
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log that `items` rows or features were taken from `path`
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "read"
/// * `path` - Source file
/// * `items` - Number of rows or features
/// * `elapsed` - Time taken, if measured
pub fn log_operation_complete(operation: &str, path: &Path, items: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {operation} {items} items from {} in {duration:?}",
            path.display()
        ),
        None => log::info!("Successfully {operation} {items} items from {}", path.display()),
    }
}

/// Log a recoverable problem, optionally tied to a file
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
