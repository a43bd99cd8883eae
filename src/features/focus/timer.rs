//! Countdown derived from the wall clock.
//!
//! [`SessionTimerView`] keeps no state of its own: remaining time and
//! progress are recomputed from `now - start` on every call, so a throttled
//! or skipped poll never drifts the display. Also provides duration parsing
//! and formatting.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::reward::RewardPreview;
use super::session::{LockSession, SessionMode};
use crate::config::RewardConfig;

/// Read-only projection of a running session onto a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimerView {
    pub start_time_ms: i64,
    pub duration_seconds: u64,
    pub mode: SessionMode,
}

impl SessionTimerView {
    #[must_use]
    pub const fn new(start_time_ms: i64, duration_seconds: u64, mode: SessionMode) -> Self {
        Self {
            start_time_ms,
            duration_seconds,
            mode,
        }
    }

    /// View over an active lock session.
    #[must_use]
    pub const fn for_lock_session(session: &LockSession) -> Self {
        Self::new(
            session.start_time_ms,
            session.duration_seconds,
            SessionMode::Lock,
        )
    }

    fn elapsed_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.start_time_ms).max(0)
    }

    fn duration_ms(&self) -> i64 {
        i64::try_from(self.duration_seconds)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000)
    }

    /// Whole seconds left, floored and clamped at zero.
    #[must_use]
    pub fn time_remaining(&self, now_ms: i64) -> u64 {
        let remaining_ms = self.duration_ms() - self.elapsed_ms(now_ms);
        u64::try_from(remaining_ms / 1000).unwrap_or(0)
    }

    /// Whole seconds since start, capped at the session length.
    #[must_use]
    pub fn elapsed_seconds(&self, now_ms: i64) -> u64 {
        self.duration_seconds
            .saturating_sub(self.time_remaining(now_ms))
    }

    /// Percentage of the session elapsed, 0 to 100.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self, now_ms: i64) -> f64 {
        let duration = self.duration_ms();
        if duration == 0 {
            return 100.0;
        }
        let percent = self.elapsed_ms(now_ms) as f64 / duration as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn is_complete(&self, now_ms: i64) -> bool {
        self.time_remaining(now_ms) == 0
    }

    /// What this session earns on completion.
    #[must_use]
    pub const fn reward_preview(&self, rewards: &RewardConfig) -> RewardPreview {
        RewardPreview::for_mode(self.mode, rewards)
    }

    /// Remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self, now_ms: i64) -> String {
        format_duration_mmss(seconds(self.time_remaining(now_ms)))
    }
}

/// Whole seconds as a `Duration`, saturating at the largest representable.
#[must_use]
pub fn seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX).min(i64::MAX / 1000))
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes. Values too large to represent are
/// rejected.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return (minutes > 0).then(|| Duration::try_minutes(minutes)).flatten();
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        } else if !c.is_whitespace() {
            return None;
        }
    }

    // Trailing number without unit is minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    (total_seconds > 0)
        .then(|| Duration::try_seconds(total_seconds))
        .flatten()
}

/// Render a progress bar from a 0-100 percentage.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
