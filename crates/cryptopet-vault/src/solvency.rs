//! Solvency verification for the vault ledger.
//!
//! Replays the append-only entries in order and checks that:
//!
//! ```text
//! running_balance = sum(credits so far) - sum(debits so far) >= 0
//! ```
//!
//! holds after every entry, and that the final running balance equals the
//! balance the vault reports. Disbursement caps the payout at the balance,
//! so this passes by construction for entries the vault recorded itself;
//! it guards restored snapshots and future accounting changes.

use std::collections::BTreeMap;

use cryptopet_types::{PetId, VaultEntry, Wei};

use crate::{VaultAnomaly, VaultError};

/// The result of a solvency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolvencyResult {
    /// The reported balance matches the ledger and never went negative.
    Solvent,
    /// The ledger and reported balance disagree.
    Anomaly(VaultAnomaly),
}

/// Totals reconstructed by replaying vault entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayTotals {
    /// Final balance.
    pub balance: Wei,
    /// Sum of all credits.
    pub total_credited: Wei,
    /// Sum of all debits.
    pub total_disbursed: Wei,
    /// Rewards paid per pet.
    pub paid_per_pet: BTreeMap<PetId, Wei>,
}

/// Replay `entries` in order, accumulating balances.
///
/// # Errors
///
/// Returns [`VaultError::Overdraft`] if a debit exceeds the running
/// balance, [`VaultError::ZeroAmount`] for an empty movement, or
/// [`VaultError::ArithmeticOverflow`] if a running total overflows.
pub fn replay(entries: &[VaultEntry]) -> Result<ReplayTotals, VaultError> {
    let mut totals = ReplayTotals::default();

    for entry in entries {
        if entry.amount == 0 {
            return Err(VaultError::ZeroAmount {
                entry_type: entry.entry_type,
            });
        }

        if entry.entry_type.is_credit() {
            totals.balance = checked(totals.balance.checked_add(entry.amount), "balance credit")?;
            totals.total_credited = checked(
                totals.total_credited.checked_add(entry.amount),
                "total credited",
            )?;
            continue;
        }

        totals.balance = totals
            .balance
            .checked_sub(entry.amount)
            .ok_or(VaultError::Overdraft {
                requested: entry.amount,
                available: totals.balance,
            })?;
        totals.total_disbursed = checked(
            totals.total_disbursed.checked_add(entry.amount),
            "total disbursed",
        )?;
        if let Some(pet_id) = entry.pet_id {
            let paid = totals.paid_per_pet.entry(pet_id).or_insert(0);
            *paid = checked(paid.checked_add(entry.amount), "per-pet payout")?;
        }
    }

    Ok(totals)
}

/// Verify that `reported_balance` is what `entries` imply.
pub fn verify_solvency(entries: &[VaultEntry], reported_balance: Wei) -> SolvencyResult {
    match replay(entries) {
        Ok(totals) if totals.balance == reported_balance => SolvencyResult::Solvent,
        Ok(totals) => SolvencyResult::Anomaly(VaultAnomaly {
            reported_balance,
            ledger_balance: Some(totals.balance),
            message: format!(
                "VAULT_ANOMALY: reported balance {reported_balance} but ledger implies {}",
                totals.balance
            ),
        }),
        Err(e) => SolvencyResult::Anomaly(VaultAnomaly {
            reported_balance,
            ledger_balance: None,
            message: format!("VAULT_ANOMALY: ledger replay failed: {e}"),
        }),
    }
}

fn checked(value: Option<Wei>, context: &str) -> Result<Wei, VaultError> {
    value.ok_or_else(|| VaultError::ArithmeticOverflow {
        context: context.to_owned(),
    })
}
