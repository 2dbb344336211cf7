//! Core record types: pets, their projections, vault entries, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Mood, PetAction, VaultEntryType};
use crate::ids::{AccountId, EventId, PetId, VaultEntryId};

/// An amount of currency in its smallest unit (10^18 wei = 1 unit).
pub type Wei = u128;

/// A logical timestamp in whole seconds, supplied by the execution
/// environment's clock.
pub type Timestamp = u64;

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// The persisted record for one adopted pet.
///
/// Keyed by `owner` in the registry. `name`, `owner`, `id`, and
/// `created_at` never change after adoption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Pet {
    /// Unique pet identifier.
    pub id: PetId,
    /// The account that adopted this pet.
    pub owner: AccountId,
    /// Display name chosen at adoption.
    pub name: String,
    /// Happiness stat (0--100).
    pub happiness: u32,
    /// Energy stat (0--100).
    pub energy: u32,
    /// Time of the last decay materialization or mutating action.
    pub last_interaction_time: Timestamp,
    /// Happiness decay below one whole point, carried into the next
    /// materialization. Scaled by seconds per hour, so always below 3600.
    #[serde(default)]
    pub happiness_decay_carry: u32,
    /// Energy decay below one whole point, scaled like
    /// `happiness_decay_carry`.
    #[serde(default)]
    pub energy_decay_carry: u32,
    /// Time of the last successful feed.
    pub last_feed_time: Timestamp,
    /// Time of the last successful play.
    pub last_play_time: Timestamp,
    /// Cumulative rewards paid out for this pet.
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub total_rewards: Wei,
    /// Adoption time.
    pub created_at: Timestamp,
}

/// Identity and reward summary returned by `get_pet_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetInfo {
    /// Display name.
    pub name: String,
    /// Adoption time.
    pub created_at: Timestamp,
    /// Cumulative rewards paid out for this pet.
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub total_rewards: Wei,
}

/// Decay-projected stats returned by `get_current_pet_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetStatus {
    /// Happiness after decay up to the query time.
    pub happiness: u32,
    /// Energy after decay up to the query time.
    pub energy: u32,
    /// Mood derived from the projected stats.
    pub mood: Mood,
}

/// Outcome of a successful feed or play action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionReceipt {
    /// Which action was applied.
    pub action: PetAction,
    /// Happiness after the action.
    pub happiness: u32,
    /// Energy after the action.
    pub energy: u32,
    /// Mood after the action (determines the reward tier).
    pub mood: Mood,
    /// Reward actually paid (may be below schedule when the vault runs low).
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub reward: Wei,
    /// Logical time at which the action was applied.
    pub at: Timestamp,
}

// ---------------------------------------------------------------------------
// Vault
// ---------------------------------------------------------------------------

/// A single append-only entry in the reward vault ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VaultEntry {
    /// Unique entry identifier.
    pub id: VaultEntryId,
    /// Category of the movement.
    pub entry_type: VaultEntryType,
    /// Amount moved (always positive).
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub amount: Wei,
    /// Account that paid in or was paid out.
    pub counterparty: AccountId,
    /// Pet the entry relates to (`None` for plain deposits).
    pub pet_id: Option<PetId>,
    /// Logical time of the movement.
    pub at: Timestamp,
}

/// Aggregate view of the reward vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VaultSummary {
    /// Funds currently available for rewards.
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub balance: Wei,
    /// Sum of all deposits and adoption fees.
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub total_credited: Wei,
    /// Sum of all rewards paid.
    #[serde(with = "crate::wei")]
    #[ts(type = "string")]
    pub total_disbursed: Wei,
    /// Number of ledger entries.
    pub entry_count: u64,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Type-specific payload of a [`PetEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type")]
#[ts(export, export_to = "bindings/")]
pub enum PetEventDetails {
    /// A new pet was adopted.
    PetAdopted {
        /// The adopting account.
        owner: AccountId,
        /// The new pet.
        pet_id: PetId,
        /// The pet's name.
        name: String,
        /// Payment credited to the vault.
        #[serde(with = "crate::wei")]
        #[ts(type = "string")]
        paid: Wei,
    },
    /// A pet was fed.
    PetFed {
        /// The owning account.
        owner: AccountId,
        /// The fed pet.
        pet_id: PetId,
        /// Stats and reward after feeding.
        receipt: ActionReceipt,
    },
    /// A pet was played with.
    PetPlayed {
        /// The owning account.
        owner: AccountId,
        /// The pet played with.
        pet_id: PetId,
        /// Stats and reward after playing.
        receipt: ActionReceipt,
    },
    /// The reward vault was funded.
    RewardFundsDeposited {
        /// The funding account.
        depositor: AccountId,
        /// Amount deposited.
        #[serde(with = "crate::wei")]
        #[ts(type = "string")]
        amount: Wei,
        /// Vault balance after the deposit.
        #[serde(with = "crate::wei")]
        #[ts(type = "string")]
        balance: Wei,
    },
}

impl PetEventDetails {
    /// The account that triggered this event.
    pub const fn account(&self) -> &AccountId {
        match self {
            Self::PetAdopted { owner, .. }
            | Self::PetFed { owner, .. }
            | Self::PetPlayed { owner, .. } => owner,
            Self::RewardFundsDeposited { depositor, .. } => depositor,
        }
    }
}

/// An immutable record emitted by a successful action, for external
/// observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Logical time of the action.
    pub at: Timestamp,
    /// Type-specific payload.
    pub details: PetEventDetails,
    /// Real-world timestamp when the event was recorded.
    pub created_at: DateTime<Utc>,
}

impl PetEvent {
    /// Wrap `details` in a new event stamped with the current wall time.
    pub fn new(at: Timestamp, details: PetEventDetails) -> Self {
        Self {
            id: EventId::new(),
            at,
            details,
            created_at: Utc::now(),
        }
    }
}
