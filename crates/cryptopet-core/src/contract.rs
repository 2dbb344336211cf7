//! The contract state machine: registry, vault, and logical time.
//!
//! [`Contract`] owns the [`PetRegistry`] and the [`RewardVault`] together
//! and exposes the seven public operations. It is synchronous and
//! lock-free by itself; [`crate::service::PetService`] serializes access.
//!
//! # Logical time
//!
//! The contract keeps a high-water mark of every time it has seen. A
//! caller-supplied `now` below the mark is raised to it, so decay and
//! cooldowns never run backwards even if the clock does.
//!
//! # Snapshots
//!
//! [`ContractSnapshot`] is the persisted form: every pet record, the full
//! vault ledger, and the time mark. Restoring replays the ledger and
//! re-checks every invariant before accepting the state.

use std::path::Path;

use cryptopet_pets::{PetError, PetRegistry, PetRules};
use cryptopet_types::{
    AccountId, ActionReceipt, Pet, PetId, PetInfo, PetStatus, Timestamp, VaultEntry,
    VaultSummary, Wei,
};
use cryptopet_vault::{RewardSchedule, RewardVault, SolvencyResult, VaultError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Errors that can occur while saving or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Failed to read or write the snapshot file.
    #[error("snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to encode or decode the snapshot JSON.
    #[error("snapshot JSON is malformed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The snapshot decodes but violates an invariant.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// The violated invariant.
        reason: String,
    },
}

impl From<PetError> for SnapshotError {
    fn from(e: PetError) -> Self {
        Self::InvalidSnapshot {
            reason: e.to_string(),
        }
    }
}

impl From<VaultError> for SnapshotError {
    fn from(e: VaultError) -> Self {
        Self::InvalidSnapshot {
            reason: e.to_string(),
        }
    }
}

/// Persisted contract state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSnapshot {
    /// Every pet record, ordered by owner.
    pub pets: Vec<Pet>,
    /// The full vault ledger in insertion order.
    pub vault_entries: Vec<VaultEntry>,
    /// The logical time high-water mark.
    pub latest_time: Timestamp,
}

/// Registry, vault, and logical time, mutated together.
#[derive(Debug, Clone)]
pub struct Contract {
    registry: PetRegistry,
    vault: RewardVault,
    latest_time: Timestamp,
}

impl Default for Contract {
    fn default() -> Self {
        Self::new(PetRules::default(), RewardSchedule::default())
    }
}

impl Contract {
    /// An empty contract with no pets and an unfunded vault.
    pub const fn new(rules: PetRules, schedule: RewardSchedule) -> Self {
        Self {
            registry: PetRegistry::new(rules),
            vault: RewardVault::new(schedule),
            latest_time: 0,
        }
    }

    /// The pet registry.
    pub const fn registry(&self) -> &PetRegistry {
        &self.registry
    }

    /// The reward vault.
    pub const fn vault(&self) -> &RewardVault {
        &self.vault
    }

    /// The latest logical time any operation has observed.
    pub const fn latest_time(&self) -> Timestamp {
        self.latest_time
    }

    const fn effective_time(&self, now: Timestamp) -> Timestamp {
        if now > self.latest_time {
            now
        } else {
            self.latest_time
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Adopt a pet for `caller` with `paid` attached.
    ///
    /// # Errors
    ///
    /// See [`PetRegistry::adopt_pet`].
    pub fn adopt_pet(
        &mut self,
        caller: &AccountId,
        name: &str,
        paid: Wei,
        now: Timestamp,
    ) -> Result<(PetId, Timestamp), PetError> {
        let now = self.effective_time(now);
        let pet_id = self
            .registry
            .adopt_pet(&mut self.vault, caller, name, paid, now)?;
        self.latest_time = now;
        Ok((pet_id, now))
    }

    /// Feed `caller`'s pet.
    ///
    /// # Errors
    ///
    /// See [`PetRegistry::feed_pet`].
    pub fn feed_pet(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ActionReceipt, PetError> {
        let now = self.effective_time(now);
        let receipt = self.registry.feed_pet(&mut self.vault, caller, now)?;
        self.latest_time = now;
        Ok(receipt)
    }

    /// Play with `caller`'s pet.
    ///
    /// # Errors
    ///
    /// See [`PetRegistry::play_with_pet`].
    pub fn play_with_pet(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ActionReceipt, PetError> {
        let now = self.effective_time(now);
        let receipt = self.registry.play_with_pet(&mut self.vault, caller, now)?;
        self.latest_time = now;
        Ok(receipt)
    }

    /// Credit `amount` from `depositor` to the reward vault.
    ///
    /// Open to any caller. Returns the new balance and the time applied.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ZeroAmount`] if nothing is attached.
    pub fn deposit_reward_funds(
        &mut self,
        depositor: &AccountId,
        amount: Wei,
        now: Timestamp,
    ) -> Result<(Wei, Timestamp), VaultError> {
        let now = self.effective_time(now);
        let balance = self.vault.fund(depositor, amount, now)?;
        info!(depositor = %depositor, amount = %amount, balance = %balance, "reward funds deposited");
        self.latest_time = now;
        Ok((balance, now))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether `account` owns a pet.
    pub fn check_has_pet(&self, account: &AccountId) -> bool {
        self.registry.has_pet(account)
    }

    /// Name, adoption time, and lifetime rewards.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] if `account` has no pet.
    pub fn get_pet_info(&self, account: &AccountId) -> Result<PetInfo, PetError> {
        self.registry.get_pet_info(account)
    }

    /// Stats and mood with decay projected to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] if `account` has no pet.
    pub fn get_current_pet_status(
        &self,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<PetStatus, PetError> {
        self.registry
            .get_current_status(account, self.effective_time(now))
    }

    /// Balance and lifetime totals of the reward vault.
    pub fn vault_summary(&self) -> VaultSummary {
        self.vault.summary()
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Capture the full state.
    pub fn snapshot(&self) -> ContractSnapshot {
        ContractSnapshot {
            pets: self.registry.pets().cloned().collect(),
            vault_entries: self.vault.entries().to_vec(),
            latest_time: self.latest_time,
        }
    }

    /// Rebuild a contract from `snapshot`, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidSnapshot`] if a pet record is out of
    /// bounds, the ledger does not replay, the ledger and pet reward totals
    /// disagree, or any recorded time is after the time mark.
    pub fn from_snapshot(
        rules: PetRules,
        schedule: RewardSchedule,
        snapshot: ContractSnapshot,
    ) -> Result<Self, SnapshotError> {
        let ContractSnapshot {
            pets,
            vault_entries,
            latest_time,
        } = snapshot;

        let invalid = |reason: String| SnapshotError::InvalidSnapshot { reason };

        if let Some(entry) = vault_entries.iter().find(|e| e.at > latest_time) {
            return Err(invalid(format!(
                "vault entry {} is after the time mark {latest_time}",
                entry.id
            )));
        }
        let vault = RewardVault::from_entries(schedule, vault_entries)?;
        if let SolvencyResult::Anomaly(anomaly) = vault.verify_solvency() {
            return Err(invalid(anomaly.to_string()));
        }

        let registry = PetRegistry::from_pets(rules, pets)?;
        let mut rewarded: Wei = 0;
        for pet in registry.pets() {
            if pet.last_interaction_time > latest_time {
                return Err(invalid(format!(
                    "pet of {} was touched after the time mark {latest_time}",
                    pet.owner
                )));
            }
            if pet.total_rewards != vault.paid_to(pet.id) {
                return Err(invalid(format!(
                    "pet of {} records {} in rewards but the ledger paid {}",
                    pet.owner,
                    pet.total_rewards,
                    vault.paid_to(pet.id)
                )));
            }
            rewarded = rewarded
                .checked_add(pet.total_rewards)
                .ok_or_else(|| invalid(String::from("reward totals overflow")))?;
        }
        if rewarded != vault.total_disbursed() {
            return Err(invalid(format!(
                "ledger disbursed {} but pets account for {rewarded}",
                vault.total_disbursed()
            )));
        }

        Ok(Self {
            registry,
            vault,
            latest_time,
        })
    }

    /// Write a JSON snapshot to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] or [`SnapshotError::Json`].
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec_pretty(&self.snapshot())?;
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, path)?;
        info!(path = %path.display(), pets = self.registry.len(), "snapshot saved");
        Ok(())
    }

    /// Read and validate a JSON snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`], [`SnapshotError::Json`], or
    /// [`SnapshotError::InvalidSnapshot`].
    pub fn load_from(
        path: &Path,
        rules: PetRules,
        schedule: RewardSchedule,
    ) -> Result<Self, SnapshotError> {
        let bytes = std::fs::read(path)?;
        let snapshot: ContractSnapshot = serde_json::from_slice(&bytes)?;
        let contract = Self::from_snapshot(rules, schedule, snapshot)?;
        info!(
            path = %path.display(),
            pets = contract.registry.len(),
            balance = %contract.vault.balance(),
            "snapshot restored"
        );
        Ok(contract)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cryptopet_types::{Mood, PetAction};

    use super::*;

    const HOUR: u64 = 3_600;
    const FEE: Wei = 10_000_000_000_000_000;

    fn account(raw: &str) -> AccountId {
        AccountId::parse(raw).unwrap()
    }

    fn busy_contract() -> Contract {
        let mut contract = Contract::default();
        contract
            .deposit_reward_funds(&account("0xdeployer"), 100_000_000_000_000_000, 0)
            .unwrap();
        contract
            .adopt_pet(&account("0xalice"), "Rex", FEE, 10)
            .unwrap();
        contract.adopt_pet(&account("0xbob"), "Tom", FEE, 20).unwrap();
        contract.feed_pet(&account("0xalice"), 2 * HOUR).unwrap();
        contract.play_with_pet(&account("0xbob"), 3 * HOUR).unwrap();
        contract
    }

    #[test]
    fn time_never_runs_backwards() {
        let mut contract = Contract::default();
        let alice = account("0xalice");
        contract.adopt_pet(&alice, "Rex", FEE, 10 * HOUR).unwrap();

        // A stale clock reading is raised to the mark, so the cooldown
        // still measures from the adoption time.
        let early = contract.feed_pet(&alice, 0);
        assert!(matches!(
            early,
            Err(PetError::CooldownActive {
                action: PetAction::Feed,
                remaining_secs: HOUR,
            })
        ));
        assert_eq!(contract.latest_time(), 10 * HOUR);

        let status = contract.get_current_pet_status(&alice, 0).unwrap();
        assert_eq!(status.happiness, 100);
        assert_eq!(status.mood, Mood::Excellent);
    }

    #[test]
    fn failed_action_leaves_time_mark() {
        let mut contract = Contract::default();
        let stranger = account("0xstranger");
        assert!(contract.feed_pet(&stranger, 500).is_err());
        assert_eq!(contract.latest_time(), 0);
    }

    #[test]
    fn zero_deposit_rejected() {
        let mut contract = Contract::default();
        let result = contract.deposit_reward_funds(&account("0xdeployer"), 0, 0);
        assert!(matches!(result, Err(VaultError::ZeroAmount { .. })));
        assert_eq!(contract.vault_summary().balance, 0);
    }

    #[test]
    fn snapshot_round_trip() {
        let contract = busy_contract();
        let json = serde_json::to_string(&contract.snapshot()).unwrap();
        let decoded: ContractSnapshot = serde_json::from_str(&json).unwrap();
        let restored =
            Contract::from_snapshot(PetRules::default(), RewardSchedule::default(), decoded)
                .unwrap();

        assert_eq!(restored.snapshot(), contract.snapshot());
        assert_eq!(restored.vault_summary(), contract.vault_summary());
        let alice = account("0xalice");
        assert_eq!(
            restored.get_pet_info(&alice).unwrap(),
            contract.get_pet_info(&alice).unwrap()
        );
    }

    #[test]
    fn tampered_rewards_rejected() {
        let mut snapshot = busy_contract().snapshot();
        for pet in &mut snapshot.pets {
            pet.total_rewards = pet.total_rewards.saturating_add(1);
        }
        let result =
            Contract::from_snapshot(PetRules::default(), RewardSchedule::default(), snapshot);
        assert!(matches!(result, Err(SnapshotError::InvalidSnapshot { .. })));
    }

    #[test]
    fn owners_differing_only_in_case_collide() {
        let json = serde_json::to_string(&busy_contract().snapshot()).unwrap();
        let decoded: ContractSnapshot =
            serde_json::from_str(&json.replace("0xbob", " 0xALICE ")).unwrap();
        assert!(decoded.pets.iter().all(|pet| pet.owner == account("0xalice")));

        let result =
            Contract::from_snapshot(PetRules::default(), RewardSchedule::default(), decoded);
        assert!(matches!(
            &result,
            Err(SnapshotError::InvalidSnapshot { reason }) if reason.contains("duplicate owner")
        ));
    }

    #[test]
    fn future_pet_rejected() {
        let mut snapshot = busy_contract().snapshot();
        snapshot.latest_time = 0;
        let result =
            Contract::from_snapshot(PetRules::default(), RewardSchedule::default(), snapshot);
        assert!(matches!(result, Err(SnapshotError::InvalidSnapshot { .. })));
    }

    #[test]
    fn overdrawn_ledger_rejected() {
        let mut snapshot = busy_contract().snapshot();
        // Without any credits the rewards overdraw the ledger.
        snapshot.vault_entries.retain(|e| !e.entry_type.is_credit());
        let result =
            Contract::from_snapshot(PetRules::default(), RewardSchedule::default(), snapshot);
        assert!(result.is_err());
    }

    #[test]
    fn save_and_load_file() {
        let contract = busy_contract();
        let path = std::env::temp_dir().join(format!(
            "cryptopet-contract-{}.json",
            uuid::Uuid::now_v7()
        ));
        contract.save_to(&path).unwrap();
        let loaded =
            Contract::load_from(&path, PetRules::default(), RewardSchedule::default()).unwrap();
        assert_eq!(loaded.snapshot(), contract.snapshot());
        std::fs::remove_file(&path).unwrap();
    }
}
