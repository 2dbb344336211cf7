//! Shared type definitions for the CryptoPet engine.
//!
//! This crate is the single source of truth for the records that cross
//! crate boundaries: pets, their read projections, vault ledger entries,
//! and event records. Types flow downstream to `TypeScript` via `ts-rs`
//! so the web frontend decodes exactly what the engine returns.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes ([`PetId`], [`AccountId`], ...)
//! - [`enums`] -- [`Mood`], [`PetAction`], [`VaultEntryType`]
//! - [`structs`] -- [`Pet`], projections, vault entries, events
//! - [`wei`] -- decimal-string serde for [`Wei`] amounts

pub mod enums;
pub mod ids;
pub mod structs;
pub mod wei;

// Re-export all public types at crate root for convenience.
pub use enums::{Mood, PetAction, VaultEntryType};
pub use ids::{AccountId, EventId, PetId, VaultEntryId};
pub use structs::{
    ActionReceipt, Pet, PetEvent, PetEventDetails, PetInfo, PetStatus, Timestamp, VaultEntry,
    VaultSummary, Wei,
};

/// Number of wei in one whole currency unit.
pub const WEI_PER_UNIT: Wei = 1_000_000_000_000_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings for types marked #[ts(export)] into the
        // crate's `bindings/` directory.
        use ts_rs::TS;

        let _ = PetId::export_all();
        let _ = EventId::export_all();
        let _ = VaultEntryId::export_all();
        let _ = AccountId::export_all();

        let _ = Mood::export_all();
        let _ = PetAction::export_all();
        let _ = VaultEntryType::export_all();

        let _ = Pet::export_all();
        let _ = PetInfo::export_all();
        let _ = PetStatus::export_all();
        let _ = ActionReceipt::export_all();
        let _ = VaultEntry::export_all();
        let _ = VaultSummary::export_all();
        let _ = PetEventDetails::export_all();
        let _ = PetEvent::export_all();
    }

    #[test]
    fn mood_serializes_to_frontend_names() {
        for mood in Mood::ALL {
            let json = serde_json::to_string(&mood).ok();
            assert_eq!(json, Some(format!("\"{}\"", mood.as_str())));
        }
    }

    #[test]
    fn moods_are_ranked() {
        assert!(Mood::Sad < Mood::Okay);
        assert!(Mood::Okay < Mood::Happy);
        assert!(Mood::Happy < Mood::Excellent);
    }

    #[test]
    fn event_details_are_tagged() {
        let owner = AccountId::parse("0xabc");
        assert!(owner.is_some());
        let Some(owner) = owner else { return };
        let details = PetEventDetails::RewardFundsDeposited {
            depositor: owner.clone(),
            amount: 5,
            balance: 5,
        };
        assert_eq!(details.account(), &owner);
        let json = serde_json::to_value(&details).ok();
        assert_eq!(
            json.as_ref().and_then(|v| v.get("type")).and_then(|v| v.as_str()),
            Some("RewardFundsDeposited")
        );
    }

    #[test]
    fn credit_entry_types() {
        assert!(VaultEntryType::Deposit.is_credit());
        assert!(VaultEntryType::AdoptionFee.is_credit());
        assert!(!VaultEntryType::Reward.is_credit());
    }
}
