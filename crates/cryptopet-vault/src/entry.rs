//! Entry builder for the vault ledger.
//!
//! Provides a [`VaultEntryBuilder`] that refuses to produce a
//! [`VaultEntry`] without a counterparty and a positive amount, and that
//! requires a pet reference for adoption fees and rewards.

use cryptopet_types::{AccountId, PetId, Timestamp, VaultEntry, VaultEntryId, VaultEntryType, Wei};

use crate::VaultError;

/// Builder for constructing validated [`VaultEntry`] values.
///
/// # Examples
///
/// ```
/// use cryptopet_types::{AccountId, VaultEntryType};
/// use cryptopet_vault::VaultEntryBuilder;
///
/// let entry = VaultEntryBuilder::new(0, VaultEntryType::Deposit)
///     .counterparty(AccountId::parse("0xdeployer"))
///     .amount(100)
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct VaultEntryBuilder {
    at: Timestamp,
    entry_type: VaultEntryType,
    amount: Option<Wei>,
    counterparty: Option<AccountId>,
    pet_id: Option<PetId>,
}

impl VaultEntryBuilder {
    /// Start building an entry of `entry_type` at logical time `at`.
    pub const fn new(at: Timestamp, entry_type: VaultEntryType) -> Self {
        Self {
            at,
            entry_type,
            amount: None,
            counterparty: None,
            pet_id: None,
        }
    }

    /// Set the amount moved.
    #[must_use]
    pub const fn amount(mut self, amount: Wei) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the paying or receiving account.
    #[must_use]
    pub fn counterparty(mut self, account: Option<AccountId>) -> Self {
        self.counterparty = account;
        self
    }

    /// Set the pet this entry relates to.
    #[must_use]
    pub const fn pet(mut self, pet_id: PetId) -> Self {
        self.pet_id = Some(pet_id);
        self
    }

    /// Validate inputs and produce a [`VaultEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MissingField`] if the amount or counterparty
    /// is unset, or if an adoption fee or reward has no pet.
    /// Returns [`VaultError::ZeroAmount`] if the amount is zero.
    pub fn build(self) -> Result<VaultEntry, VaultError> {
        let amount = self.amount.ok_or(VaultError::MissingField("amount"))?;
        let counterparty = self
            .counterparty
            .ok_or(VaultError::MissingField("counterparty"))?;

        if amount == 0 {
            return Err(VaultError::ZeroAmount {
                entry_type: self.entry_type,
            });
        }

        if self.entry_type != VaultEntryType::Deposit && self.pet_id.is_none() {
            return Err(VaultError::MissingField("pet_id"));
        }

        Ok(VaultEntry {
            id: VaultEntryId::new(),
            entry_type: self.entry_type,
            amount,
            counterparty,
            pet_id: self.pet_id,
            at: self.at,
        })
    }
}
