//! Reward vault and escrow ledger for the CryptoPet engine.
//!
//! The vault is the shared pool that pet-care rewards are paid from. Every
//! movement of funds is recorded as an append-only [`VaultEntry`], and the
//! running balance is always reproducible from those entries.
//!
//! # Architecture
//!
//! - [`vault`] -- The [`RewardVault`] struct: balance, per-pet payouts,
//!   funding, adoption credits, and capped disbursement.
//! - [`entry`] -- The [`VaultEntryBuilder`] for validated entry construction.
//! - [`schedule`] -- The [`RewardSchedule`] mapping moods to reward amounts.
//! - [`solvency`] -- Solvency verification and anomaly detection.
//!
//! # Solvency Law
//!
//! ```text
//! balance == sum(credits) - sum(debits) >= 0
//! ```
//!
//! Deposits and adoption fees are credits; rewards are debits. A reward
//! never pushes the balance below zero: when the pool cannot cover the
//! scheduled amount, the payout is reduced to whatever is left.
//!
//! # Usage
//!
//! ```
//! use cryptopet_types::{AccountId, Mood, PetId};
//! use cryptopet_vault::{RewardSchedule, RewardVault, SolvencyResult};
//!
//! let mut vault = RewardVault::new(RewardSchedule::default());
//! let (Some(operator), Some(owner)) = (AccountId::parse("0xdeployer"), AccountId::parse("0xowner"))
//! else {
//!     return;
//! };
//!
//! vault.fund(&operator, 1_500, 0).ok();
//! let paid = vault.disburse(&owner, PetId::new(), Mood::Excellent, 60).ok();
//!
//! // The schedule wants far more than 1_500 wei, so the payout is capped.
//! assert_eq!(paid, Some(1_500));
//! assert_eq!(vault.balance(), 0);
//! assert_eq!(vault.verify_solvency(), SolvencyResult::Solvent);
//! ```

pub mod entry;
pub mod schedule;
pub mod solvency;
pub mod vault;

// Re-export primary types at crate root.
pub use entry::VaultEntryBuilder;
pub use schedule::RewardSchedule;
pub use solvency::SolvencyResult;
pub use vault::RewardVault;

use cryptopet_types::{VaultEntryType, Wei};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when moving funds through the vault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    /// Entries must move a strictly positive amount.
    #[error("{entry_type:?} amount must be non-zero")]
    ZeroAmount {
        /// The entry type that was rejected.
        entry_type: VaultEntryType,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A debit exceeded the balance while replaying recorded entries.
    #[error("overdraft: debit of {requested} exceeds balance {available}")]
    Overdraft {
        /// The debit amount.
        requested: Wei,
        /// The balance at the time of the debit.
        available: Wei,
    },

    /// A running total would overflow.
    #[error("arithmetic overflow in vault accounting: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A solvency violation detected by [`solvency::verify_solvency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultAnomaly {
    /// Balance the vault reports.
    pub reported_balance: Wei,
    /// Balance implied by the ledger (`None` if the ledger itself is
    /// inconsistent, e.g. a debit would have overdrawn it).
    pub ledger_balance: Option<Wei>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for VaultAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
