//! Device capability report.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::core::DeviceCapabilities;
use crate::error::FocusError;
use crate::output::format_device;
use crate::platform::TerminalPlatform;

/// Classify this terminal, or the given user agent, and report lock
/// effectiveness.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn device(
    user_agent: Option<String>,
    config: &Config,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let user_agent = user_agent.or_else(|| config.device.user_agent.clone());
    let platform = TerminalPlatform::new(std::io::sink(), user_agent);
    let capabilities = DeviceCapabilities::new();

    format_device(capabilities.detect(&platform), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
                        (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_device_user_agent_flag_wins() {
        let mut config = Config::default();
        config.device.user_agent = Some("Mozilla/5.0 (Windows NT 10.0) Chrome/120.0".to_string());

        let out = device(Some(IPAD.to_string()), &config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["deviceClass"], "Tablet");
        assert_eq!(value["device"]["osName"], "iOS");
    }

    #[test]
    fn test_device_falls_back_to_config() {
        let mut config = Config::default();
        config.device.user_agent = Some(IPAD.to_string());

        let out = device(None, &config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["device"]["isIOS"], true);
    }

    #[test]
    fn test_terminal_is_desktop() {
        let out = device(None, &Config::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["deviceClass"], "Desktop");
        assert_eq!(value["effectiveness"]["score"], 95);
    }
}
