//! JSON output formatting for ultifocus.

use serde::Serialize;
use serde_json::json;

use crate::core::DeviceInfo;
use crate::error::FocusError;
use crate::features::focus::{RewardPreview, SessionOutcome, SessionTimerView};

/// Serialize any value as pretty-printed JSON.
///
/// # Errors
///
/// Returns `FocusError::Json` if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format a device report as JSON.
///
/// # Errors
///
/// Returns `FocusError::Json` if serialization fails.
pub fn format_device_json(info: &DeviceInfo) -> Result<String, FocusError> {
    let output = json!({
        "deviceClass": info.device_class(),
        "device": info,
        "effectiveness": info.effectiveness_rating(),
        "limitations": info.mobile_limitations(),
    });
    to_json(&output)
}

/// Format a session preview as JSON.
///
/// # Errors
///
/// Returns `FocusError::Json` if serialization fails.
pub fn format_preview_json(
    view: &SessionTimerView,
    rewards: &RewardPreview,
) -> Result<String, FocusError> {
    let output = json!({
        "mode": view.mode,
        "durationSeconds": view.duration_seconds,
        "countdown": view.format_remaining(view.start_time_ms),
        "rewards": rewards,
    });
    to_json(&output)
}

/// Format a finished session as JSON.
///
/// # Errors
///
/// Returns `FocusError::Json` if serialization fails.
pub fn format_outcome_json(outcome: &SessionOutcome) -> Result<String, FocusError> {
    to_json(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewardConfig;
    use crate::features::focus::SessionMode;
    use crate::platform::FeatureSupport;

    #[test]
    fn test_device_json_fields() {
        let info = DeviceInfo::classify(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/604.1",
            FeatureSupport::default(),
        );
        let value: serde_json::Value =
            serde_json::from_str(&format_device_json(&info).unwrap()).unwrap();

        assert_eq!(value["deviceClass"], "Mobile");
        assert_eq!(value["device"]["isIOS"], true);
        assert_eq!(value["effectiveness"]["score"], 40);
        assert!(value["limitations"].as_array().is_some_and(|l| !l.is_empty()));
    }

    #[test]
    fn test_preview_json_fields() {
        let view = SessionTimerView::new(0, 1500, SessionMode::Lock);
        let rewards = view.reward_preview(&RewardConfig::default());
        let value: serde_json::Value =
            serde_json::from_str(&format_preview_json(&view, &rewards).unwrap()).unwrap();

        assert_eq!(value["countdown"], "25:00");
        assert_eq!(value["rewards"]["xp"], 100);
        assert_eq!(value["rewards"]["multiplier"], 2);
    }
}
