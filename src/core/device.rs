//! Device and browser classification.
//!
//! Classification is derived from the host's user agent plus its feature
//! probe, computed once and memoized for the lifetime of the
//! [`DeviceCapabilities`] value.

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Sentinel for fields that could not be classified.
pub const UNKNOWN: &str = "Unknown";

static IOS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)iPhone|iPad|iPod").unwrap_or_else(|e| panic!("Invalid iOS regex: {e}"))
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)iPhone|iPod").unwrap_or_else(|e| panic!("Invalid phone regex: {e}"))
});

static IPAD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)iPad").unwrap_or_else(|e| panic!("Invalid iPad regex: {e}")));

static ANDROID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android").unwrap_or_else(|e| panic!("Invalid Android regex: {e}"))
});

static MOBILE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Mobile").unwrap_or_else(|e| panic!("Invalid mobile regex: {e}"))
});

/// Browser tokens in match order; earlier entries shadow later ones
/// (Edge and Opera both carry a Chrome token, everything carries Safari).
const BROWSERS: &[(&str, &str)] = &[
    ("Edg/", "Edge"),
    ("EdgiOS/", "Edge"),
    ("OPR/", "Opera"),
    ("SamsungBrowser/", "Samsung Internet"),
    ("CriOS/", "Chrome"),
    ("Chrome/", "Chrome"),
    ("FxiOS/", "Firefox"),
    ("Firefox/", "Firefox"),
    ("Safari/", "Safari"),
];

/// Classified runtime environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    pub is_android: bool,
    pub browser_name: String,
    pub os_name: String,
    pub has_fullscreen_support: bool,
    pub has_wake_lock_support: bool,
    pub has_vibration_support: bool,
    pub has_reliable_unload_warning_support: bool,
}

impl DeviceInfo {
    /// Classify a user agent given the host's feature probe.
    #[must_use]
    pub fn classify(user_agent: &str, features: crate::platform::FeatureSupport) -> Self {
        let is_ios = IOS_PATTERN.is_match(user_agent);
        let is_android = ANDROID_PATTERN.is_match(user_agent);
        let has_mobile_token = MOBILE_TOKEN.is_match(user_agent);

        let is_mobile = PHONE_PATTERN.is_match(user_agent) || (is_android && has_mobile_token);
        let is_tablet = IPAD_PATTERN.is_match(user_agent) || (is_android && !has_mobile_token);

        Self {
            is_mobile,
            is_tablet,
            is_desktop: !is_mobile && !is_tablet,
            is_ios,
            is_android,
            browser_name: browser_name(user_agent).to_string(),
            os_name: os_name(user_agent, is_ios, is_android).to_string(),
            has_fullscreen_support: features.fullscreen,
            has_wake_lock_support: features.wake_lock,
            has_vibration_support: features.vibration,
            has_reliable_unload_warning_support: !is_ios,
        }
    }

    #[must_use]
    pub const fn is_mobile_or_tablet(&self) -> bool {
        self.is_mobile || self.is_tablet
    }

    #[must_use]
    pub const fn supports_fullscreen(&self) -> bool {
        self.has_fullscreen_support
    }

    #[must_use]
    pub const fn supports_wake_lock(&self) -> bool {
        self.has_wake_lock_support
    }

    #[must_use]
    pub const fn supports_vibration(&self) -> bool {
        self.has_vibration_support
    }

    #[must_use]
    pub const fn supports_unload_warning(&self) -> bool {
        self.has_reliable_unload_warning_support
    }

    /// Human-readable device class.
    #[must_use]
    pub const fn device_class(&self) -> &'static str {
        if self.is_mobile {
            "Mobile"
        } else if self.is_tablet {
            "Tablet"
        } else {
            "Desktop"
        }
    }

    /// Things lock mode cannot enforce on this device.
    ///
    /// Advisory text only; lock behavior does not change based on it.
    #[must_use]
    pub fn mobile_limitations(&self) -> Vec<String> {
        let mut limitations = Vec::new();

        if self.is_ios {
            limitations.push("iOS cannot block the home button or app switcher".to_string());
            limitations.push("Control Center and notifications remain reachable".to_string());
        } else if self.is_android {
            limitations.push("Android cannot block the home or recent-apps buttons".to_string());
        }

        if self.is_mobile_or_tablet() {
            limitations.push("Leaving the app can be detected but not prevented".to_string());
        }

        if !self.has_reliable_unload_warning_support {
            limitations.push("Closing the page may not show a leave warning".to_string());
        }
        if !self.has_fullscreen_support {
            limitations.push("Fullscreen mode is not available".to_string());
        }
        if self.is_mobile_or_tablet() && !self.has_wake_lock_support {
            limitations.push("The screen may dim or lock during the session".to_string());
        }
        if self.is_mobile_or_tablet() && !self.has_vibration_support {
            limitations.push("Haptic feedback is unavailable".to_string());
        }

        limitations
    }

    /// Heuristic score for how well lock mode can be enforced here.
    #[must_use]
    pub fn effectiveness_rating(&self) -> EffectivenessRating {
        let score = if self.is_desktop {
            if self.has_fullscreen_support {
                95
            } else {
                80
            }
        } else if self.is_ios {
            40
        } else if self.is_android {
            let mut score = 60;
            if self.has_wake_lock_support {
                score += 5;
            }
            if self.has_fullscreen_support {
                score += 5;
            }
            score
        } else {
            50
        };

        EffectivenessRating::from_score(score)
    }
}

fn browser_name(user_agent: &str) -> &'static str {
    BROWSERS
        .iter()
        .find(|(token, _)| user_agent.contains(token))
        .map_or(UNKNOWN, |(_, name)| name)
}

fn os_name(user_agent: &str, is_ios: bool, is_android: bool) -> &'static str {
    if is_ios {
        "iOS"
    } else if is_android {
        "Android"
    } else if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("Mac OS X") || user_agent.contains("Macintosh") {
        "macOS"
    } else if user_agent.contains("CrOS") {
        "ChromeOS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        UNKNOWN
    }
}

/// Advisory enforcement score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivenessRating {
    /// 0 to 100.
    pub score: u8,
    pub label: String,
}

impl EffectivenessRating {
    fn from_score(score: u8) -> Self {
        let label = match score {
            90..=u8::MAX => "Excellent",
            75..=89 => "Good",
            60..=74 => "Moderate",
            _ => "Limited",
        };
        Self {
            score,
            label: label.to_string(),
        }
    }
}

/// Memoized device classification.
#[derive(Debug, Default)]
pub struct DeviceCapabilities {
    info: OnceCell<DeviceInfo>,
}

impl DeviceCapabilities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the host, computing at most once.
    pub fn detect(&self, platform: &dyn Platform) -> &DeviceInfo {
        self.info
            .get_or_init(|| DeviceInfo::classify(&platform.user_agent(), platform.features()))
    }

    /// The cached snapshot, if `detect` has run.
    #[must_use]
    pub fn cached(&self) -> Option<&DeviceInfo> {
        self.info.get()
    }
}
