//! Stat decay, mood derivation, and per-action stat changes.
//!
//! Stats decay lazily. A pet stores the values it had at
//! `last_interaction_time`; reads project decay up to the query time
//! without touching the record, and mutating actions materialize the same
//! projection before applying their own deltas.
//!
//! # Decay
//!
//! ```text
//! scaled = carry + elapsed_secs * rate_per_hour
//! loss   = scaled / 3600
//! carry  = scaled % 3600
//! stat   = stat.saturating_sub(loss)
//! ```
//!
//! The remainder below one whole point is kept on the pet as a carry, so
//! decay stays linear in elapsed time however often the pet is
//! materialized.
//!
//! # Mood
//!
//! Mood is a pure function of the average of happiness and energy, banded
//! by [`MoodThresholds`].

use cryptopet_types::{Mood, Pet, PetStatus, Timestamp};

use crate::config::{MAX_STAT, MoodThresholds, PetsConfig, SECS_PER_HOUR};

/// Whole points lost over `elapsed_secs` at `rate_per_hour`, starting from
/// a previous `carry`, and the carry left over.
pub fn decay_step(carry: u32, elapsed_secs: u64, rate_per_hour: u32) -> (u32, u32) {
    let scaled = elapsed_secs
        .saturating_mul(u64::from(rate_per_hour))
        .saturating_add(u64::from(carry));
    let loss = scaled.checked_div(SECS_PER_HOUR).unwrap_or(0);
    let rest = scaled.checked_rem(SECS_PER_HOUR).unwrap_or(0);
    (
        u32::try_from(loss).unwrap_or(u32::MAX),
        u32::try_from(rest).unwrap_or(0),
    )
}

/// Stats lost over `elapsed_secs` at `rate_per_hour`, rounded down.
pub fn decay_loss(elapsed_secs: u64, rate_per_hour: u32) -> u32 {
    decay_step(0, elapsed_secs, rate_per_hour).0
}

/// Stats and carries of `pet` after decay up to `now`, as
/// `(happiness, energy, happiness_carry, energy_carry)`.
fn decayed(pet: &Pet, now: Timestamp, config: &PetsConfig) -> (u32, u32, u32, u32) {
    let elapsed = now.saturating_sub(pet.last_interaction_time);
    let (happiness_loss, happiness_carry) = decay_step(
        pet.happiness_decay_carry,
        elapsed,
        config.happiness_decay_per_hour,
    );
    let (energy_loss, energy_carry) =
        decay_step(pet.energy_decay_carry, elapsed, config.energy_decay_per_hour);
    (
        pet.happiness.saturating_sub(happiness_loss),
        pet.energy.saturating_sub(energy_loss),
        happiness_carry,
        energy_carry,
    )
}

/// Happiness and energy of `pet` after decay up to `now`.
///
/// A `now` earlier than the last interaction projects no further decay.
pub fn project(pet: &Pet, now: Timestamp, config: &PetsConfig) -> (u32, u32) {
    let (happiness, energy, _, _) = decayed(pet, now, config);
    (happiness, energy)
}

/// Write the decay projected at `now` into `pet`.
///
/// Advances `last_interaction_time` to `now` (never backwards) and keeps
/// the sub-point remainder in the decay carries.
pub fn materialize(pet: &mut Pet, now: Timestamp, config: &PetsConfig) {
    if now <= pet.last_interaction_time {
        return;
    }
    let (happiness, energy, happiness_carry, energy_carry) = decayed(pet, now, config);
    pet.happiness = happiness;
    pet.energy = energy;
    pet.happiness_decay_carry = happiness_carry;
    pet.energy_decay_carry = energy_carry;
    pet.last_interaction_time = now;
}

/// Mood band for the given stats.
pub fn derive_mood(happiness: u32, energy: u32, thresholds: &MoodThresholds) -> Mood {
    let average = happiness.saturating_add(energy).checked_div(2).unwrap_or(0);
    if average >= thresholds.excellent {
        Mood::Excellent
    } else if average >= thresholds.happy {
        Mood::Happy
    } else if average >= thresholds.okay {
        Mood::Okay
    } else {
        Mood::Sad
    }
}

/// Read-only status of `pet` as of `now`.
pub fn status(pet: &Pet, now: Timestamp, config: &PetsConfig) -> PetStatus {
    let (happiness, energy) = project(pet, now, config);
    PetStatus {
        happiness,
        energy,
        mood: derive_mood(happiness, energy, &config.mood),
    }
}

/// Apply the feed deltas: energy and happiness rise, capped at [`MAX_STAT`].
pub fn apply_feed(pet: &mut Pet, config: &PetsConfig) {
    pet.energy = pet.energy.saturating_add(config.feed_energy).min(MAX_STAT);
    pet.happiness = pet
        .happiness
        .saturating_add(config.feed_happiness)
        .min(MAX_STAT);
}

/// Apply the play deltas: happiness rises (capped), energy falls (floored
/// at zero).
pub fn apply_play(pet: &mut Pet, config: &PetsConfig) {
    pet.happiness = pet
        .happiness
        .saturating_add(config.play_happiness)
        .min(MAX_STAT);
    pet.energy = pet.energy.saturating_sub(config.play_energy_cost);
}
