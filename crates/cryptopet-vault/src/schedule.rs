//! Reward amounts per mood tier.

use cryptopet_types::{Mood, Wei};
use serde::Deserialize;

/// Scheduled reward for each mood tier, in wei.
///
/// Defaults: Sad pays nothing, Okay 0.0001 units, Happy 0.0005 units,
/// Excellent 0.001 units. The schedule must be non-decreasing with mood
/// rank; see [`RewardSchedule::is_monotonic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RewardSchedule {
    /// Reward when the pet is Sad.
    #[serde(default)]
    pub sad: Wei,

    /// Reward when the pet is Okay.
    #[serde(default = "default_okay")]
    pub okay: Wei,

    /// Reward when the pet is Happy.
    #[serde(default = "default_happy")]
    pub happy: Wei,

    /// Reward when the pet is Excellent.
    #[serde(default = "default_excellent")]
    pub excellent: Wei,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            sad: 0,
            okay: default_okay(),
            happy: default_happy(),
            excellent: default_excellent(),
        }
    }
}

impl RewardSchedule {
    /// Scheduled (uncapped) reward for `mood`.
    pub const fn amount_for(&self, mood: Mood) -> Wei {
        match mood {
            Mood::Sad => self.sad,
            Mood::Okay => self.okay,
            Mood::Happy => self.happy,
            Mood::Excellent => self.excellent,
        }
    }

    /// Whether a higher mood never earns less than a lower one.
    pub const fn is_monotonic(&self) -> bool {
        self.sad <= self.okay && self.okay <= self.happy && self.happy <= self.excellent
    }
}

const fn default_okay() -> Wei {
    100_000_000_000_000
}

const fn default_happy() -> Wei {
    500_000_000_000_000
}

const fn default_excellent() -> Wei {
    1_000_000_000_000_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_monotonic() {
        let schedule = RewardSchedule::default();
        assert!(schedule.is_monotonic());
        assert_eq!(schedule.amount_for(Mood::Sad), 0);
        assert!(schedule.amount_for(Mood::Okay) > 0);
    }

    #[test]
    fn rewards_never_decrease_with_mood() {
        let schedule = RewardSchedule::default();
        let amounts: Vec<Wei> = Mood::ALL.iter().map(|m| schedule.amount_for(*m)).collect();
        assert!(amounts.windows(2).all(|w| w.first() <= w.get(1)));
    }

    #[test]
    fn inverted_schedule_detected() {
        let schedule = RewardSchedule {
            sad: 0,
            okay: 10,
            happy: 5,
            excellent: 20,
        };
        assert!(!schedule.is_monotonic());
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let parsed: Result<RewardSchedule, _> = serde_yml::from_str("excellent: 42\n");
        assert!(parsed.is_ok());
        let schedule = parsed.unwrap_or_default();
        assert_eq!(schedule.excellent, 42);
        assert_eq!(schedule.okay, RewardSchedule::default().okay);
    }
}
