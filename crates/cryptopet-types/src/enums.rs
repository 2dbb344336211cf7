//! Enumeration types for the CryptoPet engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Discrete mood derived from a pet's current happiness and energy.
///
/// Variants are declared in rank order, so the derived [`Ord`] ranks
/// `Sad < Okay < Happy < Excellent`. The serialized names are the strings
/// the frontend matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// Lowest tier. Earns no reward.
    Sad,
    /// Earns a small reward.
    Okay,
    /// Earns a medium reward.
    Happy,
    /// Top tier. Earns the largest reward.
    Excellent,
}

impl Mood {
    /// Every mood, lowest rank first.
    pub const ALL: [Self; 4] = [Self::Sad, Self::Okay, Self::Happy, Self::Excellent];

    /// The serialized name of this mood.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sad => "Sad",
            Self::Okay => "Okay",
            Self::Happy => "Happy",
            Self::Excellent => "Excellent",
        }
    }
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pet actions
// ---------------------------------------------------------------------------

/// A time-gated pet-care action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PetAction {
    /// Feeding restores energy and some happiness.
    Feed,
    /// Playing raises happiness and costs energy.
    Play,
}

impl core::fmt::Display for PetAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Feed => f.write_str("feed"),
            Self::Play => f.write_str("play"),
        }
    }
}

// ---------------------------------------------------------------------------
// Vault ledger
// ---------------------------------------------------------------------------

/// Category of a vault ledger entry.
///
/// | Type | Direction | Counterparty |
/// |------|-----------|--------------|
/// | Deposit | credit | funding account |
/// | `AdoptionFee` | credit | adopting owner |
/// | Reward | debit | rewarded pet's owner |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum VaultEntryType {
    /// Operator (or any caller) funding the reward pool.
    Deposit,
    /// Adoption payment flowing into the pool.
    AdoptionFee,
    /// Reward paid out for a pet-care action.
    Reward,
}

impl VaultEntryType {
    /// Whether entries of this type increase the vault balance.
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::AdoptionFee)
    }
}
