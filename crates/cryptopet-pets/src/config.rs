//! Tunable rules for pet stats, cooldowns, and adoption.
//!
//! [`PetsConfig`] and [`CooldownConfig`] deserialize directly from the
//! `pets` and `cooldowns` sections of `cryptopet-config.yaml`; every field
//! has a serde default. [`PetRules`] bundles them with the adoption fee
//! (which lives in the `economy` section) for the registry.

use cryptopet_types::Wei;
use serde::Deserialize;

/// Upper bound of the happiness and energy stats.
pub const MAX_STAT: u32 = 100;

/// Seconds in one hour; decay rates are expressed per hour.
pub const SECS_PER_HOUR: u64 = 3_600;

/// All pet rules in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRules {
    /// Stat baselines, decay, action deltas, and name bounds.
    pub pets: PetsConfig,

    /// Minimum spacing between repeated actions.
    pub cooldowns: CooldownConfig,

    /// Minimum payment to adopt, in wei.
    pub adoption_fee: Wei,
}

impl Default for PetRules {
    fn default() -> Self {
        Self {
            pets: PetsConfig::default(),
            cooldowns: CooldownConfig::default(),
            adoption_fee: DEFAULT_ADOPTION_FEE,
        }
    }
}

impl PetRules {
    /// Check that the rules keep every invariant reachable.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.pets.validate()?;
        self.cooldowns.validate()
    }
}

/// Default adoption fee: 0.01 units.
pub const DEFAULT_ADOPTION_FEE: Wei = 10_000_000_000_000_000;

/// Stat baselines, decay rates, per-action deltas, and name bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PetsConfig {
    /// Maximum name length in UTF-16 code units (default: 50).
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Happiness of a freshly adopted pet (default: 100).
    #[serde(default = "default_initial_stat")]
    pub initial_happiness: u32,

    /// Energy of a freshly adopted pet (default: 100).
    #[serde(default = "default_initial_stat")]
    pub initial_energy: u32,

    /// Happiness lost per hour without interaction (default: 5).
    #[serde(default = "default_happiness_decay")]
    pub happiness_decay_per_hour: u32,

    /// Energy lost per hour without interaction (default: 3).
    #[serde(default = "default_energy_decay")]
    pub energy_decay_per_hour: u32,

    /// Energy gained by feeding (default: 20).
    #[serde(default = "default_feed_energy")]
    pub feed_energy: u32,

    /// Happiness gained by feeding (default: 10).
    #[serde(default = "default_feed_happiness")]
    pub feed_happiness: u32,

    /// Happiness gained by playing (default: 15).
    #[serde(default = "default_play_happiness")]
    pub play_happiness: u32,

    /// Energy spent by playing (default: 10).
    #[serde(default = "default_play_energy_cost")]
    pub play_energy_cost: u32,

    /// Mood band lower bounds.
    #[serde(default)]
    pub mood: MoodThresholds,
}

impl Default for PetsConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            initial_happiness: default_initial_stat(),
            initial_energy: default_initial_stat(),
            happiness_decay_per_hour: default_happiness_decay(),
            energy_decay_per_hour: default_energy_decay(),
            feed_energy: default_feed_energy(),
            feed_happiness: default_feed_happiness(),
            play_happiness: default_play_happiness(),
            play_energy_cost: default_play_energy_cost(),
            mood: MoodThresholds::default(),
        }
    }
}

impl PetsConfig {
    /// Check bounds and mood band ordering.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_name_length == 0 {
            return Err(String::from("max_name_length must be at least 1"));
        }
        if self.initial_happiness > MAX_STAT || self.initial_energy > MAX_STAT {
            return Err(format!("initial stats must not exceed {MAX_STAT}"));
        }
        self.mood.validate()
    }
}

/// Lower bounds of the mood bands over the average of happiness and energy.
///
/// An average at or above `excellent` is Excellent, at or above `happy` is
/// Happy, at or above `okay` is Okay, and anything lower is Sad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MoodThresholds {
    /// Lower bound of the Excellent band (default: 80).
    #[serde(default = "default_excellent")]
    pub excellent: u32,

    /// Lower bound of the Happy band (default: 60).
    #[serde(default = "default_happy")]
    pub happy: u32,

    /// Lower bound of the Okay band (default: 40).
    #[serde(default = "default_okay")]
    pub okay: u32,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self {
            excellent: default_excellent(),
            happy: default_happy(),
            okay: default_okay(),
        }
    }
}

impl MoodThresholds {
    fn validate(&self) -> Result<(), String> {
        if self.excellent > MAX_STAT {
            return Err(format!("excellent threshold must not exceed {MAX_STAT}"));
        }
        if !(self.excellent > self.happy && self.happy > self.okay && self.okay > 0) {
            return Err(String::from(
                "mood thresholds must be strictly descending: excellent > happy > okay > 0",
            ));
        }
        Ok(())
    }
}

/// Cooldown durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CooldownConfig {
    /// Minimum seconds between feeds (default: 3600).
    #[serde(default = "default_feed_secs")]
    pub feed_secs: u64,

    /// Minimum seconds between play sessions (default: 1800).
    #[serde(default = "default_play_secs")]
    pub play_secs: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            feed_secs: default_feed_secs(),
            play_secs: default_play_secs(),
        }
    }
}

impl CooldownConfig {
    /// Reject zero-length cooldowns.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.feed_secs == 0 || self.play_secs == 0 {
            return Err(String::from("cooldowns must be at least 1 second"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_initial_stat() -> u32 {
    MAX_STAT
}

const fn default_happiness_decay() -> u32 {
    5
}

const fn default_energy_decay() -> u32 {
    3
}

const fn default_feed_energy() -> u32 {
    20
}

const fn default_feed_happiness() -> u32 {
    10
}

const fn default_play_happiness() -> u32 {
    15
}

const fn default_play_energy_cost() -> u32 {
    10
}

const fn default_excellent() -> u32 {
    80
}

const fn default_happy() -> u32 {
    60
}

const fn default_okay() -> u32 {
    40
}

const fn default_feed_secs() -> u64 {
    3_600
}

const fn default_play_secs() -> u64 {
    1_800
}

const fn default_max_name_length() -> usize {
    50
}
