//! Configuration management for ultifocus.
//!
//! This module handles loading and saving configuration from `~/.ultifocus/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, DeviceConfig, FocusConfig, GeneralConfig, RewardConfig};
