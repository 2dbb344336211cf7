//! The serialized pet service shared by the API and the node.
//!
//! [`PetService`] wraps one [`Contract`] in a [`tokio::sync::RwLock`]:
//! mutating operations hold the write lock for the whole action, queries
//! share the read lock, so a reader sees either the state before an action
//! or after it, never in between. The service also pulls "now" from the
//! injected [`Clock`], records an event for every successful mutation in a
//! bounded log, and publishes it on a broadcast channel.
//!
//! Lock order is always contract, then event log.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use cryptopet_pets::PetError;
use cryptopet_types::{
    AccountId, ActionReceipt, PetAction, PetEvent, PetEventDetails, PetId, PetInfo, PetStatus,
    Timestamp, VaultSummary, Wei,
};
use cryptopet_vault::{RewardVault, VaultError};
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use crate::clock::Clock;
use crate::config::CryptoPetConfig;
use crate::contract::{Contract, ContractSnapshot, SnapshotError};

/// Maximum number of events kept in memory.
pub const EVENT_LOG_CAPACITY: usize = 1_000;

/// Capacity of the broadcast channel for events.
///
/// A subscriber that falls behind by more than this many events receives
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest.
const BROADCAST_CAPACITY: usize = 256;

/// Thread-safe handle to the contract. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PetService {
    contract: Arc<RwLock<Contract>>,
    events: Arc<RwLock<VecDeque<PetEvent>>>,
    tx: broadcast::Sender<PetEvent>,
    clock: Arc<dyn Clock>,
}

impl PetService {
    /// Serve `contract`, reading time from `clock`.
    pub fn new(contract: Contract, clock: Arc<dyn Clock>) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            contract: Arc::new(RwLock::new(contract)),
            events: Arc::new(RwLock::new(VecDeque::new())),
            tx,
            clock,
        }
    }

    /// Serve an empty contract built from `config`.
    pub fn from_config(config: &CryptoPetConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Contract::new(config.pet_rules(), config.economy.rewards),
            clock,
        )
    }

    /// Subscribe to events from successful mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<PetEvent> {
        self.tx.subscribe()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Adopt a pet for `caller`, paying `paid` into the vault.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::AlreadyOwnsPet`], [`PetError::InvalidName`], or
    /// [`PetError::InsufficientPayment`]; nothing changes on error.
    pub async fn adopt_pet(
        &self,
        caller: &AccountId,
        name: &str,
        paid: Wei,
    ) -> Result<PetId, PetError> {
        let mut contract = self.contract.write().await;
        let (pet_id, at) = contract
            .adopt_pet(caller, name, paid, self.clock.now())
            .inspect_err(|e| debug!(caller = %caller, error = %e, "adoption rejected"))?;
        let stored_name = contract
            .registry()
            .get(caller)
            .map_or_else(|| name.to_owned(), |pet| pet.name.clone());
        let event = self
            .record(
                at,
                PetEventDetails::PetAdopted {
                    owner: caller.clone(),
                    pet_id,
                    name: stored_name,
                    paid,
                },
            )
            .await;
        drop(contract);

        self.broadcast(event);
        Ok(pet_id)
    }

    /// Feed `caller`'s pet.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] or [`PetError::CooldownActive`];
    /// nothing changes on error.
    pub async fn feed_pet(&self, caller: &AccountId) -> Result<ActionReceipt, PetError> {
        self.care(caller, PetAction::Feed).await
    }

    /// Play with `caller`'s pet.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] or [`PetError::CooldownActive`];
    /// nothing changes on error.
    pub async fn play_with_pet(&self, caller: &AccountId) -> Result<ActionReceipt, PetError> {
        self.care(caller, PetAction::Play).await
    }

    async fn care(&self, caller: &AccountId, action: PetAction) -> Result<ActionReceipt, PetError> {
        let mut contract = self.contract.write().await;
        let now = self.clock.now();
        let receipt = match action {
            PetAction::Feed => contract.feed_pet(caller, now),
            PetAction::Play => contract.play_with_pet(caller, now),
        }?;
        let pet_id = contract
            .registry()
            .get(caller)
            .map(|pet| pet.id)
            .ok_or_else(|| PetError::NoSuchPet(caller.clone()))?;
        let details = match action {
            PetAction::Feed => PetEventDetails::PetFed {
                owner: caller.clone(),
                pet_id,
                receipt,
            },
            PetAction::Play => PetEventDetails::PetPlayed {
                owner: caller.clone(),
                pet_id,
                receipt,
            },
        };
        let event = self.record(receipt.at, details).await;
        drop(contract);

        self.broadcast(event);
        Ok(receipt)
    }

    /// Deposit `amount` from `depositor` into the reward vault.
    ///
    /// Returns the new vault balance.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ZeroAmount`] if `amount` is zero.
    pub async fn deposit_reward_funds(
        &self,
        depositor: &AccountId,
        amount: Wei,
    ) -> Result<Wei, VaultError> {
        let mut contract = self.contract.write().await;
        let (balance, at) = contract.deposit_reward_funds(depositor, amount, self.clock.now())?;
        let event = self
            .record(
                at,
                PetEventDetails::RewardFundsDeposited {
                    depositor: depositor.clone(),
                    amount,
                    balance,
                },
            )
            .await;
        drop(contract);

        self.broadcast(event);
        Ok(balance)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether `account` owns a pet.
    pub async fn check_has_pet(&self, account: &AccountId) -> bool {
        self.contract.read().await.check_has_pet(account)
    }

    /// Name, adoption time, and lifetime rewards of `account`'s pet.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] if `account` has no pet.
    pub async fn get_pet_info(&self, account: &AccountId) -> Result<PetInfo, PetError> {
        self.contract.read().await.get_pet_info(account)
    }

    /// Current stats and mood of `account`'s pet, decay projected to now.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] if `account` has no pet.
    pub async fn get_current_pet_status(
        &self,
        account: &AccountId,
    ) -> Result<PetStatus, PetError> {
        let contract = self.contract.read().await;
        contract.get_current_pet_status(account, self.clock.now())
    }

    /// Vault balance and lifetime totals.
    pub async fn vault_summary(&self) -> VaultSummary {
        self.contract.read().await.vault_summary()
    }

    /// Number of adopted pets.
    pub async fn pet_count(&self) -> usize {
        self.contract.read().await.registry().len()
    }

    /// A copy of the reward vault, ledger included.
    pub async fn vault(&self) -> RewardVault {
        self.contract.read().await.vault().clone()
    }

    /// Up to `limit` most recent events, newest first, optionally only
    /// those triggered by `owner`.
    pub async fn recent_events(&self, owner: Option<&AccountId>, limit: usize) -> Vec<PetEvent> {
        let events = self.events.read().await;
        events
            .iter()
            .rev()
            .filter(|event| owner.is_none_or(|o| event.details.account() == o))
            .take(limit)
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the full contract state.
    pub async fn snapshot(&self) -> ContractSnapshot {
        self.contract.read().await.snapshot()
    }

    /// Write the contract state to `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the file cannot be written.
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        self.contract.read().await.save_to(path)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    async fn record(&self, at: Timestamp, details: PetEventDetails) -> PetEvent {
        let event = PetEvent::new(at, details);
        let mut events = self.events.write().await;
        if events.len() >= EVENT_LOG_CAPACITY {
            events.pop_front();
        }
        events.push_back(event.clone());
        event
    }

    fn broadcast(&self, event: PetEvent) -> usize {
        // send fails only when nobody is subscribed.
        self.tx.send(event).unwrap_or(0)
    }
}
