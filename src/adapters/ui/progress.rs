//! Indicatif spinners for in-flight requests.
//!
//! There is no cancellation or timeout anywhere in the client; a hung request
//! leaves its spinner running.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner with a message, ticking until finished.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
