use colored::Colorize;

use crate::core::DeviceInfo;
use crate::features::focus::{
    format_duration, render_progress_bar, seconds, EndReason, RewardPreview, SessionMode, SessionOutcome, SessionTimerView,
};

fn yes_no(supported: bool) -> colored::ColoredString {
    if supported {
        "yes".green()
    } else {
        "no".red()
    }
}

/// Format a device report for the terminal.
pub fn format_device_pretty(info: &DeviceInfo) -> String {
    let rating = info.effectiveness_rating();
    let score = format!("{}/100 ({})", rating.score, rating.label);
    let score = match rating.score {
        90..=u8::MAX => score.green(),
        75..=89 => score.cyan(),
        60..=74 => score.yellow(),
        _ => score.red(),
    };

    let mut output = vec![
        format!("{}", "Device".bold()),
        "─".repeat(40),
        format!("  Class:            {}", info.device_class()),
        format!("  OS:               {}", info.os_name),
        format!("  Browser:          {}", info.browser_name),
        String::new(),
        format!("{}", "Lock features".bold()),
        format!("  Fullscreen:       {}", yes_no(info.supports_fullscreen())),
        format!("  Wake lock:        {}", yes_no(info.supports_wake_lock())),
        format!("  Vibration:        {}", yes_no(info.supports_vibration())),
        format!("  Leave warning:    {}", yes_no(info.supports_unload_warning())),
        String::new(),
        format!("  Effectiveness:    {score}"),
    ];

    let limitations = info.mobile_limitations();
    if !limitations.is_empty() {
        output.push(String::new());
        output.push(format!("{}", "Limitations".bold()));
        for limitation in limitations {
            output.push(format!("  - {}", limitation.dimmed()));
        }
    }

    output.join("\n")
}

/// Format a session preview for the terminal.
pub fn format_preview_pretty(view: &SessionTimerView, rewards: &RewardPreview) -> String {
    let length = seconds(view.duration_seconds);
    let mut output = vec![
        format!("{} session", view.mode.display_name()).bold().to_string(),
        format!("  Countdown: {}", view.format_remaining(view.start_time_ms)),
        format!("  Length:    {}", format_duration(length)),
        format!("  Rewards:   {}", rewards.label().yellow()),
    ];

    if view.mode == SessionMode::Lock {
        output.push(String::new());
        output.push(
            "  Exit shortcuts are blocked; Esc or 'e' asks for an emergency exit."
                .dimmed()
                .to_string(),
        );
        output.push(
            "  An emergency exit forfeits the session's rewards."
                .dimmed()
                .to_string(),
        );
    }

    output.join("\n")
}

/// Format a finished session for the terminal.
pub fn format_outcome_pretty(outcome: &SessionOutcome) -> String {
    let headline = match outcome.reason {
        EndReason::Completed => "🎉 Session complete!".green().bold(),
        EndReason::UserEnded => "Session ended early".yellow().bold(),
        EndReason::Emergency => "⚠ Emergency exit".red().bold(),
    };

    #[allow(clippy::cast_precision_loss)]
    let percent = if outcome.duration_seconds == 0 {
        100.0
    } else {
        outcome.elapsed_seconds as f64 / outcome.duration_seconds as f64 * 100.0
    };

    let mut output = vec![
        headline.to_string(),
        format!("   {}", outcome.format_status()),
        format!("   {}", render_progress_bar(percent, 30)),
    ];

    if let Some(rewards) = &outcome.rewards {
        output.push(format!("   Rewards: {}", rewards.label().yellow()));
    } else {
        output.push(format!("   {}", "No rewards earned".dimmed()));
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewardConfig;
    use crate::platform::FeatureSupport;
    use chrono::Utc;

    #[test]
    fn test_device_pretty_lists_limitations() {
        colored::control::set_override(false);
        let info = DeviceInfo::classify(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/604.1",
            FeatureSupport::default(),
        );
        let out = format_device_pretty(&info);

        assert!(out.contains("Class:            Mobile"));
        assert!(out.contains("40/100 (Limited)"));
        assert!(out.contains("iOS cannot block the home button"));
    }

    #[test]
    fn test_preview_pretty_lock_mode() {
        colored::control::set_override(false);
        let view = SessionTimerView::new(0, 1500, SessionMode::Lock);
        let out = format_preview_pretty(&view, &view.reward_preview(&RewardConfig::default()));

        assert!(out.contains("UltiFocus Lock session"));
        assert!(out.contains("25:00"));
        assert!(out.contains("+100 XP  +25 coins  x2"));
        assert!(out.contains("emergency exit"));
    }

    #[test]
    fn test_outcome_pretty_without_rewards() {
        colored::control::set_override(false);
        let outcome = SessionOutcome {
            session_id: "s1".to_string(),
            mode: SessionMode::Lock,
            reason: EndReason::Emergency,
            started_at: Utc::now(),
            ended_at: Utc::now(),
            duration_seconds: 1500,
            elapsed_seconds: 300,
            exit_attempts: 2,
            rewards: None,
        };
        let out = format_outcome_pretty(&outcome);

        assert!(out.contains("Emergency exit"));
        assert!(out.contains("No rewards earned"));
        assert!(out.contains("[██████░░░░░░░░░░░░░░░░░░░░░░░░]"));
    }
}
