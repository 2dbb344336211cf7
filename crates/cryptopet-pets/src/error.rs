//! Error types for the cryptopet-pets crate.
//!
//! Every rejected action returns one of these and leaves the registry and
//! the vault exactly as they were.

use cryptopet_types::{AccountId, PetAction, Wei};
use cryptopet_vault::VaultError;

/// Errors that can occur during pet registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetError {
    /// The caller already owns a pet; each account may adopt once.
    #[error("account {0} already owns a pet")]
    AlreadyOwnsPet(AccountId),

    /// The account has never adopted a pet.
    #[error("account {0} has no pet")]
    NoSuchPet(AccountId),

    /// The requested pet name is empty, too long, or malformed.
    #[error("invalid pet name: {reason}")]
    InvalidName {
        /// Description of why the name was rejected.
        reason: String,
    },

    /// The payment attached to an adoption is below the fee.
    #[error("insufficient payment: adoption requires {required} wei, got {paid}")]
    InsufficientPayment {
        /// The adoption fee.
        required: Wei,
        /// The amount attached.
        paid: Wei,
    },

    /// The action was attempted before its cooldown elapsed.
    #[error("{action} cooldown active: {remaining_secs}s remaining")]
    CooldownActive {
        /// The rejected action.
        action: PetAction,
        /// Seconds until the action becomes available.
        remaining_secs: u64,
    },

    /// A restored pet record violates a registry invariant.
    #[error("corrupt pet record for {owner}: {reason}")]
    CorruptRecord {
        /// The owner key of the record.
        owner: AccountId,
        /// Description of the violated invariant.
        reason: String,
    },

    /// An arithmetic overflow occurred during a stat or reward computation.
    #[error("arithmetic overflow in pet computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// The vault rejected a credit or disbursement.
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),
}
