//! Reward preview shown before and during a session.
//!
//! The preview depends only on the session mode. Actual granting is done by
//! the reward collaborator from a [`SessionOutcome`](super::SessionOutcome).

use serde::{Deserialize, Serialize};

use super::session::SessionMode;
use crate::config::RewardConfig;

/// What a session would earn on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPreview {
    pub xp: u32,
    pub coins: u32,
    /// Multiplier badge shown for lock mode.
    pub multiplier: Option<u32>,
}

impl RewardPreview {
    /// Preview for a mode under the configured reward table.
    #[must_use]
    pub const fn for_mode(mode: SessionMode, rewards: &RewardConfig) -> Self {
        match mode {
            SessionMode::Standard => Self {
                xp: rewards.standard_xp,
                coins: rewards.standard_coins,
                multiplier: None,
            },
            SessionMode::Lock => Self {
                xp: rewards.lock_xp,
                coins: rewards.lock_coins,
                multiplier: Some(rewards.lock_multiplier),
            },
        }
    }

    /// Short label such as "+100 XP  +25 coins  x2".
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = format!("+{} XP  +{} coins", self.xp, self.coins);
        if let Some(m) = self.multiplier {
            label.push_str(&format!("  x{m}"));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_preview_not_lower_than_standard() {
        let rewards = RewardConfig::default();
        let standard = RewardPreview::for_mode(SessionMode::Standard, &rewards);
        let lock = RewardPreview::for_mode(SessionMode::Lock, &rewards);

        assert!(lock.xp >= standard.xp);
        assert!(lock.coins >= standard.coins);
        assert_eq!(standard.multiplier, None);
        assert!(lock.multiplier.is_some());
    }

    #[test]
    fn test_label() {
        let preview = RewardPreview {
            xp: 100,
            coins: 25,
            multiplier: Some(2),
        };
        assert_eq!(preview.label(), "+100 XP  +25 coins  x2");

        let plain = RewardPreview {
            multiplier: None,
            ..preview
        };
        assert_eq!(plain.label(), "+100 XP  +25 coins");
    }
}
