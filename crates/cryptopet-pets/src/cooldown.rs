//! Per-action cooldown enforcement.
//!
//! Feed and play are gated independently: each action compares the
//! current time against the pet's last successful use of that same action.

use cryptopet_types::{Pet, PetAction, Timestamp};

use crate::config::CooldownConfig;
use crate::error::PetError;

/// Enforces minimum spacing between repeated pet-care actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGuard {
    feed_secs: u64,
    play_secs: u64,
}

impl Default for CooldownGuard {
    fn default() -> Self {
        Self::new(&CooldownConfig::default())
    }
}

impl CooldownGuard {
    /// Build a guard from configured durations.
    pub const fn new(config: &CooldownConfig) -> Self {
        Self {
            feed_secs: config.feed_secs,
            play_secs: config.play_secs,
        }
    }

    /// Cooldown length for `action`, in seconds.
    pub const fn duration(&self, action: PetAction) -> u64 {
        match action {
            PetAction::Feed => self.feed_secs,
            PetAction::Play => self.play_secs,
        }
    }

    /// The pet's last successful use of `action`.
    pub const fn last_used(pet: &Pet, action: PetAction) -> Timestamp {
        match action {
            PetAction::Feed => pet.last_feed_time,
            PetAction::Play => pet.last_play_time,
        }
    }

    /// Seconds until `action` becomes available again, zero if it already is.
    pub fn remaining(&self, pet: &Pet, action: PetAction, now: Timestamp) -> u64 {
        let available_at = Self::last_used(pet, action).saturating_add(self.duration(action));
        available_at.saturating_sub(now)
    }

    /// Reject `action` if its cooldown has not elapsed at `now`.
    ///
    /// The action is allowed once `now - last_used >= duration`.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::CooldownActive`] with the seconds remaining.
    pub fn check(&self, pet: &Pet, action: PetAction, now: Timestamp) -> Result<(), PetError> {
        match self.remaining(pet, action, now) {
            0 => Ok(()),
            remaining_secs => Err(PetError::CooldownActive {
                action,
                remaining_secs,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use cryptopet_types::{AccountId, PetId};

    use super::*;

    fn pet_fed_and_played_at(t: Timestamp) -> Pet {
        Pet {
            id: PetId::new(),
            owner: AccountId::parse("0xowner").expect("test account literal is valid"),
            name: String::from("Rex"),
            happiness: 100,
            energy: 100,
            last_interaction_time: t,
            happiness_decay_carry: 0,
            energy_decay_carry: 0,
            last_feed_time: t,
            last_play_time: t,
            total_rewards: 0,
            created_at: t,
        }
    }

    #[test]
    fn feed_boundary_at_one_hour() {
        let guard = CooldownGuard::default();
        let pet = pet_fed_and_played_at(1_000);
        assert_eq!(
            guard.check(&pet, PetAction::Feed, 1_000 + 3_599),
            Err(PetError::CooldownActive {
                action: PetAction::Feed,
                remaining_secs: 1
            })
        );
        assert_eq!(guard.check(&pet, PetAction::Feed, 1_000 + 3_600), Ok(()));
    }

    #[test]
    fn play_boundary_at_half_hour() {
        let guard = CooldownGuard::default();
        let pet = pet_fed_and_played_at(0);
        assert!(guard.check(&pet, PetAction::Play, 1_799).is_err());
        assert_eq!(guard.check(&pet, PetAction::Play, 1_800), Ok(()));
    }

    #[test]
    fn actions_are_gated_independently() {
        let guard = CooldownGuard::default();
        let mut pet = pet_fed_and_played_at(0);
        pet.last_play_time = 5_000;
        assert_eq!(guard.check(&pet, PetAction::Feed, 5_000), Ok(()));
        assert_eq!(guard.remaining(&pet, PetAction::Play, 5_000), 1_800);
    }

    #[test]
    fn custom_durations() {
        let guard = CooldownGuard::new(&CooldownConfig {
            feed_secs: 10,
            play_secs: 20,
        });
        assert_eq!(guard.duration(PetAction::Feed), 10);
        assert_eq!(guard.duration(PetAction::Play), 20);
    }
}
