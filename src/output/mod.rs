//! Output formatting for ultifocus.
//!
//! Every report has a pretty (colored) and a JSON rendering.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::DeviceInfo;
use crate::error::FocusError;
use crate::features::focus::{RewardPreview, SessionOutcome, SessionTimerView};

pub use json::*;
pub use pretty::*;

/// Format a device report based on output format.
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_device(info: &DeviceInfo, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_device_pretty(info)),
        OutputFormat::Json => format_device_json(info),
    }
}

/// Format a session preview based on output format.
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_preview(
    view: &SessionTimerView,
    rewards: &RewardPreview,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_preview_pretty(view, rewards)),
        OutputFormat::Json => format_preview_json(view, rewards),
    }
}

/// Format a finished session based on output format.
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_outcome(outcome: &SessionOutcome, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_outcome_pretty(outcome)),
        OutputFormat::Json => format_outcome_json(outcome),
    }
}
