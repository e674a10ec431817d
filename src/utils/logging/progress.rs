//! Progress reporting while the input tables load
//!
//! Uses the indicatif crate; bars draw nothing when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the load progress bar
pub const DEFAULT_LOAD_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Create a progress bar for loading `length` inputs
///
/// A hidden bar is returned when `visible` is false, so callers never need
/// to branch on it.
#[must_use]
pub fn create_load_progress_bar(length: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_LOAD_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Finish a progress bar and clear it from display
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
