//! Lock session data.
//!
//! A [`LockSession`] exists only while the controller is active; ending it
//! produces a [`SessionOutcome`] for whoever grants rewards.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::reward::RewardPreview;

/// Whether a session runs with lock enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Timer only.
    Standard,
    /// UltiFocus lock mode.
    Lock,
}

impl SessionMode {
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Lock => "UltiFocus Lock",
        }
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndReason {
    /// The timer ran out.
    Completed,
    /// The user stopped the session through a normal control.
    UserEnded,
    /// The user went through the emergency-exit confirmations.
    Emergency,
}

impl EndReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::UserEnded => "user-ended",
            Self::Emergency => "emergency",
        }
    }

    /// Rewards are granted only for sessions that ran to the end.
    #[must_use]
    pub const fn earns_rewards(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active lock session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSession {
    pub id: String,
    /// Epoch milliseconds at activation.
    pub start_time_ms: i64,
    pub duration_seconds: u64,
    pub is_active: bool,
    pub is_mobile_platform: bool,
}

/// Result of a finished session, handed to the reward collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub session_id: String,
    pub mode: SessionMode,
    pub reason: EndReason,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: u64,
    pub elapsed_seconds: u64,
    pub exit_attempts: u32,
    /// Present only when the reason earns rewards.
    pub rewards: Option<RewardPreview>,
}

impl SessionOutcome {
    /// Format the outcome for display.
    #[must_use]
    pub fn format_status(&self) -> String {
        let elapsed = format_duration_short(self.elapsed_seconds);
        let planned = format_duration_short(self.duration_seconds);
        format!(
            "{} session {} after {elapsed} of {planned} ({} exit attempts)",
            self.mode, self.reason, self.exit_attempts
        )
    }
}

pub(crate) fn timestamp(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
}

/// Format a duration as a short string (e.g., "25m", "1h 30m", "45s").
fn format_duration_short(seconds: u64) -> String {
    let total_minutes = seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if total_minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> LockSession {
        LockSession {
            id: "s1".to_string(),
            start_time_ms: 1_700_000_000_000,
            duration_seconds: 1500,
            is_active: true,
            is_mobile_platform: false,
        }
    }

    #[test]
    fn test_only_completed_earns_rewards() {
        assert!(EndReason::Completed.earns_rewards());
        assert!(!EndReason::UserEnded.earns_rewards());
        assert!(!EndReason::Emergency.earns_rewards());
    }

    #[test]
    fn test_end_reason_serializes_kebab() {
        let json = serde_json::to_string(&EndReason::UserEnded).unwrap();
        assert_eq!(json, "\"user-ended\"");
    }

    #[test]
    fn test_timestamp_from_millis() {
        assert_eq!(timestamp(session().start_time_ms).timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_format_duration_short() {
        assert_eq!(format_duration_short(1500), "25m");
        assert_eq!(format_duration_short(5400), "1h 30m");
        assert_eq!(format_duration_short(45), "45s");
    }

    #[test]
    fn test_outcome_format_status() {
        let outcome = SessionOutcome {
            session_id: "s1".to_string(),
            mode: SessionMode::Lock,
            reason: EndReason::Emergency,
            started_at: timestamp(0),
            ended_at: timestamp(600_000),
            duration_seconds: 1500,
            elapsed_seconds: 600,
            exit_attempts: 2,
            rewards: None,
        };
        assert_eq!(
            outcome.format_status(),
            "UltiFocus Lock session emergency after 10m of 25m (2 exit attempts)"
        );
    }
}
