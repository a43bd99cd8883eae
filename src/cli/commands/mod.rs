//! Command implementations for ultifocus.
//!
//! Each command returns the text to print, already formatted for the
//! requested output format.

mod completions;
mod config;
mod device;
mod focus;

pub use completions::{completion_install_instructions, completions, generate_completions};
pub use config::config;
pub use device::device;
pub use focus::{preview, resolve_duration, start};
