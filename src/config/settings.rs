//! Configuration settings for ultifocus.
//!
//! Settings are loaded from `~/.ultifocus/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::FocusError;
use crate::features::focus::LockOptions;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus session settings.
    pub focus: FocusConfig,
    /// Reward preview table.
    pub rewards: RewardConfig,
    /// Device overrides.
    pub device: DeviceConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Focus session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    /// Session length when none is given, in minutes.
    #[serde(default = "default_duration")]
    pub default_duration_minutes: u32,
    /// Run sessions in lock mode unless `--standard` is passed.
    #[serde(default = "default_true")]
    pub lock_mode: bool,
    /// Delay before the "stay focused" reminder after leaving, in ms.
    #[serde(default = "default_alert_delay")]
    pub stay_focused_alert_delay_ms: u64,
    /// Haptic feedback on supported devices.
    #[serde(default = "default_true")]
    pub vibration: bool,
    /// Show activation and end notifications.
    #[serde(default = "default_true")]
    pub notifications: bool,
}

/// Reward preview table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewardConfig {
    #[serde(default = "default_standard_xp")]
    pub standard_xp: u32,
    #[serde(default = "default_standard_coins")]
    pub standard_coins: u32,
    #[serde(default = "default_lock_xp")]
    pub lock_xp: u32,
    #[serde(default = "default_lock_coins")]
    pub lock_coins: u32,
    #[serde(default = "default_lock_multiplier")]
    pub lock_multiplier: u32,
}

/// Device overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceConfig {
    /// User agent to classify instead of the terminal's own.
    pub user_agent: Option<String>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_duration() -> u32 {
    25
}

const fn default_alert_delay() -> u64 {
    1000
}

const fn default_true() -> bool {
    true
}

const fn default_standard_xp() -> u32 {
    50
}

const fn default_standard_coins() -> u32 {
    10
}

const fn default_lock_xp() -> u32 {
    100
}

const fn default_lock_coins() -> u32 {
    25
}

const fn default_lock_multiplier() -> u32 {
    2
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration(),
            lock_mode: default_true(),
            stay_focused_alert_delay_ms: default_alert_delay(),
            vibration: default_true(),
            notifications: default_true(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            standard_xp: default_standard_xp(),
            standard_coins: default_standard_coins(),
            lock_xp: default_lock_xp(),
            lock_coins: default_lock_coins(),
            lock_multiplier: default_lock_multiplier(),
        }
    }
}

impl Config {
    /// Controller options derived from these settings.
    #[must_use]
    pub const fn lock_options(&self) -> LockOptions {
        LockOptions {
            stay_focused_alert_delay_ms: self.focus.stay_focused_alert_delay_ms,
            vibration: self.focus.vibration,
            notifications: self.focus.notifications,
            rewards: self.rewards,
        }
    }

    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, FocusError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if lock mode would preview less than standard mode,
    /// or the default duration is zero.
    pub fn validate(&self) -> Result<(), FocusError> {
        let r = &self.rewards;
        if r.lock_xp < r.standard_xp || r.lock_coins < r.standard_coins {
            return Err(FocusError::Config(format!(
                "lock mode rewards ({} XP, {} coins) must not be lower than standard ({} XP, {} coins)",
                r.lock_xp, r.lock_coins, r.standard_xp, r.standard_coins
            )));
        }
        if r.lock_multiplier == 0 {
            return Err(FocusError::Config(
                "rewards.lock_multiplier must be at least 1".to_string(),
            ));
        }
        if self.focus.default_duration_minutes == 0 {
            return Err(FocusError::Config(
                "focus.default_duration_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), FocusError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, FocusError> {
        serde_yaml::to_string(self)
            .map_err(|e| FocusError::Config(format!("Failed to serialize config: {e}")))
    }
}
