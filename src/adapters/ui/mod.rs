//! Terminal UI adapters. Banner, spinners, inquire prompts.

pub mod banner;
pub mod progress;
pub mod tui;

pub use tui::TuiInputPort;

/// Prints the welcome banner. Call once at startup (after tracing init).
pub fn init_ui() {
    banner::print_welcome();
}
