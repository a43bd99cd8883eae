//! Focus session commands.

use crate::cli::args::{OutputFormat, StartArgs};
use crate::config::Config;
use crate::error::FocusError;
use crate::features::focus::{parse_duration, SessionMode, SessionTimerView};
use crate::output::{format_outcome, format_preview};
use crate::tui;

/// Session length in seconds from a `--duration` value or the configured
/// default.
///
/// # Errors
///
/// Returns `InvalidArgument` if the value cannot be parsed.
pub fn resolve_duration(duration: Option<&str>, config: &Config) -> Result<u64, FocusError> {
    let Some(raw) = duration else {
        return Ok(u64::from(config.focus.default_duration_minutes) * 60);
    };

    parse_duration(raw)
        .and_then(|d| u64::try_from(d.num_seconds()).ok())
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            FocusError::InvalidArgument(format!(
                "invalid duration '{raw}' (expected e.g. 25m, 1h30m, 90s)"
            ))
        })
}

const fn session_mode(standard: bool, config: &Config) -> SessionMode {
    if standard || !config.focus.lock_mode {
        SessionMode::Standard
    } else {
        SessionMode::Lock
    }
}

/// Run a session in the terminal and report how it ended.
///
/// # Errors
///
/// Returns an error for an invalid duration, a terminal failure, or an
/// output formatting failure.
pub fn start(args: &StartArgs, config: &Config, format: OutputFormat) -> Result<String, FocusError> {
    let duration_seconds = resolve_duration(args.duration.as_deref(), config)?;
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.device.user_agent.clone());

    let outcome = match session_mode(args.standard, config) {
        SessionMode::Lock => tui::run_lock(config, duration_seconds, user_agent)?,
        SessionMode::Standard => tui::run_standard(config, duration_seconds)?,
    };

    format_outcome(&outcome, format)
}

/// Describe a session without starting it.
///
/// # Errors
///
/// Returns an error for an invalid duration or an output formatting
/// failure.
pub fn preview(
    duration: Option<&str>,
    standard: bool,
    config: &Config,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let duration_seconds = resolve_duration(duration, config)?;
    let view = SessionTimerView::new(0, duration_seconds, session_mode(standard, config));
    let rewards = view.reward_preview(&config.rewards);

    format_preview(&view, &rewards, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_duration_default() {
        let mut config = Config::default();
        assert_eq!(resolve_duration(None, &config).unwrap(), 1500);
        config.focus.default_duration_minutes = 50;
        assert_eq!(resolve_duration(None, &config).unwrap(), 3000);
    }

    #[test]
    fn test_resolve_duration_values() {
        let config = Config::default();
        assert_eq!(resolve_duration(Some("90s"), &config).unwrap(), 90);
        assert_eq!(resolve_duration(Some("1h30m"), &config).unwrap(), 5400);
        assert_eq!(resolve_duration(Some("10"), &config).unwrap(), 600);
    }

    #[test]
    fn test_resolve_duration_invalid() {
        let config = Config::default();
        let err = resolve_duration(Some("soon"), &config).unwrap_err();
        assert!(matches!(err, FocusError::InvalidArgument(_)));
        assert_eq!(err.exit_code(), 2);
        assert!(resolve_duration(Some("0m"), &config).is_err());
    }

    #[test]
    fn test_session_mode() {
        let mut config = Config::default();
        assert_eq!(session_mode(false, &config), SessionMode::Lock);
        assert_eq!(session_mode(true, &config), SessionMode::Standard);
        config.focus.lock_mode = false;
        assert_eq!(session_mode(false, &config), SessionMode::Standard);
    }

    #[test]
    fn test_preview_json() {
        let out = preview(Some("50m"), false, &Config::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "lock");
        assert_eq!(value["durationSeconds"], 3000);
        assert_eq!(value["countdown"], "50:00");
        assert_eq!(value["rewards"]["coins"], 25);
    }

    #[test]
    fn test_preview_standard_rewards() {
        let out = preview(None, true, &Config::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "standard");
        assert_eq!(value["rewards"]["xp"], 50);
        assert!(value["rewards"]["multiplier"].is_null());
    }
}
