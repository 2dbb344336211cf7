//! The reward vault: pooled funds, capped disbursement, and its ledger.
//!
//! The [`RewardVault`] holds a single shared balance. Deposits and
//! adoption payments credit it; rewards for feeding and playing debit it.
//!
//! # Design
//!
//! - **Append-only**: every movement is a [`VaultEntry`]; entries are never
//!   modified or deleted.
//! - **Never negative**: a reward larger than the balance is cut down to
//!   the balance. An empty vault pays zero and records nothing.
//! - **All-or-nothing**: each method validates and computes every new
//!   total before touching state, so an error leaves the vault unchanged.

use std::collections::BTreeMap;

use cryptopet_types::{
    AccountId, Mood, PetId, Timestamp, VaultEntry, VaultEntryType, VaultSummary, Wei,
};
use tracing::{debug, warn};

use crate::solvency::{self, SolvencyResult};
use crate::{RewardSchedule, VaultEntryBuilder, VaultError};

/// Pooled reward funds and their disbursement accounting.
#[derive(Debug, Clone)]
pub struct RewardVault {
    /// Reward amounts per mood tier.
    schedule: RewardSchedule,
    /// Funds currently available.
    balance: Wei,
    /// Sum of all credits ever recorded.
    total_credited: Wei,
    /// Sum of all rewards ever paid.
    total_disbursed: Wei,
    /// Rewards paid per pet.
    paid_per_pet: BTreeMap<PetId, Wei>,
    /// All entries, in insertion order.
    entries: Vec<VaultEntry>,
}

impl RewardVault {
    /// Create an empty vault paying rewards per `schedule`.
    pub const fn new(schedule: RewardSchedule) -> Self {
        Self {
            schedule,
            balance: 0,
            total_credited: 0,
            total_disbursed: 0,
            paid_per_pet: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    /// Rebuild a vault by replaying previously recorded entries.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] if the entries do not replay cleanly
    /// (zero amounts, overdrafts, or overflowing totals).
    pub fn from_entries(
        schedule: RewardSchedule,
        entries: Vec<VaultEntry>,
    ) -> Result<Self, VaultError> {
        let totals = solvency::replay(&entries)?;
        Ok(Self {
            schedule,
            balance: totals.balance,
            total_credited: totals.total_credited,
            total_disbursed: totals.total_disbursed,
            paid_per_pet: totals.paid_per_pet,
            entries,
        })
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// The reward schedule in use.
    pub const fn schedule(&self) -> &RewardSchedule {
        &self.schedule
    }

    /// Funds currently available for rewards.
    pub const fn balance(&self) -> Wei {
        self.balance
    }

    /// Sum of all deposits and adoption payments.
    pub const fn total_credited(&self) -> Wei {
        self.total_credited
    }

    /// Sum of all rewards paid.
    pub const fn total_disbursed(&self) -> Wei {
        self.total_disbursed
    }

    /// Rewards paid so far for `pet_id`.
    pub fn paid_to(&self, pet_id: PetId) -> Wei {
        self.paid_per_pet.get(&pet_id).copied().unwrap_or(0)
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    /// Aggregate figures for display.
    pub fn summary(&self) -> VaultSummary {
        VaultSummary {
            balance: self.balance,
            total_credited: self.total_credited,
            total_disbursed: self.total_disbursed,
            entry_count: u64::try_from(self.entries.len()).unwrap_or(u64::MAX),
        }
    }

    /// Check that the balance matches the ledger.
    pub fn verify_solvency(&self) -> SolvencyResult {
        solvency::verify_solvency(&self.entries, self.balance)
    }

    // -----------------------------------------------------------------------
    // Credits
    // -----------------------------------------------------------------------

    /// Credit the vault with funds attached by `depositor`.
    ///
    /// Returns the balance after the deposit.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ZeroAmount`] if no funds are attached, or
    /// [`VaultError::ArithmeticOverflow`] if the balance would overflow.
    pub fn fund(
        &mut self,
        depositor: &AccountId,
        amount: Wei,
        at: Timestamp,
    ) -> Result<Wei, VaultError> {
        let entry = VaultEntryBuilder::new(at, VaultEntryType::Deposit)
            .counterparty(Some(depositor.clone()))
            .amount(amount)
            .build()?;
        self.credit(entry)
    }

    /// Credit an adoption payment made by `owner` for `pet_id`.
    ///
    /// Returns the balance after the credit.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ZeroAmount`] for a zero payment, or
    /// [`VaultError::ArithmeticOverflow`] if the balance would overflow.
    pub fn credit_adoption(
        &mut self,
        owner: &AccountId,
        pet_id: PetId,
        amount: Wei,
        at: Timestamp,
    ) -> Result<Wei, VaultError> {
        let entry = VaultEntryBuilder::new(at, VaultEntryType::AdoptionFee)
            .counterparty(Some(owner.clone()))
            .amount(amount)
            .pet(pet_id)
            .build()?;
        self.credit(entry)
    }

    fn credit(&mut self, entry: VaultEntry) -> Result<Wei, VaultError> {
        let balance = self.balance.checked_add(entry.amount).ok_or_else(|| {
            VaultError::ArithmeticOverflow {
                context: String::from("balance credit"),
            }
        })?;
        let total_credited = self.total_credited.checked_add(entry.amount).ok_or_else(|| {
            VaultError::ArithmeticOverflow {
                context: String::from("total credited"),
            }
        })?;

        debug!(
            entry_type = ?entry.entry_type,
            amount = %entry.amount,
            balance = %balance,
            "vault credited"
        );

        self.balance = balance;
        self.total_credited = total_credited;
        self.entries.push(entry);
        Ok(balance)
    }

    // -----------------------------------------------------------------------
    // Disbursement
    // -----------------------------------------------------------------------

    /// The reward `disburse` would pay right now for `mood`: the
    /// scheduled amount, capped at the current balance.
    pub fn quote(&self, mood: Mood) -> Wei {
        self.schedule.amount_for(mood).min(self.balance)
    }

    /// Pay the reward for a pet-care action and return the amount paid.
    ///
    /// The scheduled amount for `mood` is capped at the balance, so a
    /// depleted vault pays zero instead of failing. Nothing is recorded
    /// when the payout is zero.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ArithmeticOverflow`] if a running total would
    /// overflow. The vault is unchanged on error.
    pub fn disburse(
        &mut self,
        owner: &AccountId,
        pet_id: PetId,
        mood: Mood,
        at: Timestamp,
    ) -> Result<Wei, VaultError> {
        let scheduled = self.schedule.amount_for(mood);
        let paid = self.quote(mood);

        if paid < scheduled {
            warn!(
                %pet_id,
                scheduled = %scheduled,
                paid = %paid,
                "reward vault depleted, payout capped"
            );
        }
        if paid == 0 {
            return Ok(0);
        }

        let entry = VaultEntryBuilder::new(at, VaultEntryType::Reward)
            .counterparty(Some(owner.clone()))
            .amount(paid)
            .pet(pet_id)
            .build()?;

        // paid <= balance by construction of `quote`.
        let balance = self.balance.saturating_sub(paid);
        let total_disbursed = self.total_disbursed.checked_add(paid).ok_or_else(|| {
            VaultError::ArithmeticOverflow {
                context: String::from("total disbursed"),
            }
        })?;
        let pet_total = self.paid_to(pet_id).checked_add(paid).ok_or_else(|| {
            VaultError::ArithmeticOverflow {
                context: String::from("per-pet payout"),
            }
        })?;

        self.balance = balance;
        self.total_disbursed = total_disbursed;
        self.paid_per_pet.insert(pet_id, pet_total);
        self.entries.push(entry);
        Ok(paid)
    }
}
