//! The account-to-pet registry and the pet-care actions.
//!
//! [`PetRegistry`] is the only owner of pet records. Mutating operations
//! take the [`RewardVault`] by mutable reference so that a caller holding
//! both behind one lock applies each action atomically.
//!
//! Every mutating operation works on a copy of the pet and computes the
//! vault change before committing anything, so a rejected action leaves
//! both the registry and the vault untouched.

use std::collections::BTreeMap;

use cryptopet_types::{
    AccountId, ActionReceipt, Pet, PetAction, PetId, PetInfo, PetStatus, Timestamp, Wei,
};
use cryptopet_vault::RewardVault;
use tracing::{debug, info};

use crate::config::{MAX_STAT, PetRules, SECS_PER_HOUR};
use crate::cooldown::CooldownGuard;
use crate::error::PetError;
use crate::stats;

/// Owns every adopted pet, keyed by owner.
#[derive(Debug, Clone)]
pub struct PetRegistry {
    rules: PetRules,
    cooldowns: CooldownGuard,
    pets: BTreeMap<AccountId, Pet>,
}

impl Default for PetRegistry {
    fn default() -> Self {
        Self::new(PetRules::default())
    }
}

impl PetRegistry {
    /// Create an empty registry governed by `rules`.
    pub const fn new(rules: PetRules) -> Self {
        let cooldowns = CooldownGuard::new(&rules.cooldowns);
        Self {
            rules,
            cooldowns,
            pets: BTreeMap::new(),
        }
    }

    /// Rebuild a registry from previously persisted records.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::CorruptRecord`] if any record breaks a registry
    /// invariant or two records share an owner.
    pub fn from_pets(rules: PetRules, pets: Vec<Pet>) -> Result<Self, PetError> {
        let mut registry = Self::new(rules);
        for pet in pets {
            registry.check_record(&pet)?;
            if registry.pets.contains_key(&pet.owner) {
                return Err(PetError::CorruptRecord {
                    owner: pet.owner,
                    reason: String::from("duplicate owner"),
                });
            }
            registry.pets.insert(pet.owner.clone(), pet);
        }
        Ok(registry)
    }

    /// The rules this registry enforces.
    pub const fn rules(&self) -> &PetRules {
        &self.rules
    }

    /// All pets, ordered by owner.
    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.pets.values()
    }

    /// Number of adopted pets.
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    /// Whether no pet has been adopted yet.
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// The stored record for `owner`, without decay applied.
    pub fn get(&self, owner: &AccountId) -> Option<&Pet> {
        self.pets.get(owner)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether `account` has adopted a pet.
    pub fn has_pet(&self, account: &AccountId) -> bool {
        self.pets.contains_key(account)
    }

    /// Name, adoption time, and lifetime rewards of `account`'s pet.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] if `account` has no pet.
    pub fn get_pet_info(&self, account: &AccountId) -> Result<PetInfo, PetError> {
        let pet = self.lookup(account)?;
        Ok(PetInfo {
            name: pet.name.clone(),
            created_at: pet.created_at,
            total_rewards: pet.total_rewards,
        })
    }

    /// Stats and mood of `account`'s pet with decay projected to `now`.
    ///
    /// Nothing is persisted; two calls at the same `now` agree.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] if `account` has no pet.
    pub fn get_current_status(
        &self,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<PetStatus, PetError> {
        let pet = self.lookup(account)?;
        Ok(stats::status(pet, now, &self.rules.pets))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Adopt a new pet for `caller`, crediting `paid` to the vault.
    ///
    /// The pet starts at the configured stats with every timestamp at
    /// `now`, so the first feed and play are subject to cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::AlreadyOwnsPet`], [`PetError::InvalidName`], or
    /// [`PetError::InsufficientPayment`] on validation failure, and
    /// [`PetError::Vault`] if the credit would overflow the vault.
    pub fn adopt_pet(
        &mut self,
        vault: &mut RewardVault,
        caller: &AccountId,
        name: &str,
        paid: Wei,
        now: Timestamp,
    ) -> Result<PetId, PetError> {
        if self.has_pet(caller) {
            return Err(PetError::AlreadyOwnsPet(caller.clone()));
        }
        let name = validate_name(name, self.rules.pets.max_name_length)?;
        if paid < self.rules.adoption_fee {
            return Err(PetError::InsufficientPayment {
                required: self.rules.adoption_fee,
                paid,
            });
        }

        let pet = Pet {
            id: PetId::new(),
            owner: caller.clone(),
            name,
            happiness: self.rules.pets.initial_happiness,
            energy: self.rules.pets.initial_energy,
            last_interaction_time: now,
            happiness_decay_carry: 0,
            energy_decay_carry: 0,
            last_feed_time: now,
            last_play_time: now,
            total_rewards: 0,
            created_at: now,
        };

        if paid > 0 {
            vault.credit_adoption(caller, pet.id, paid, now)?;
        }

        info!(
            owner = %caller,
            pet_id = %pet.id,
            name = %pet.name,
            paid = %paid,
            "pet adopted"
        );

        let pet_id = pet.id;
        self.pets.insert(caller.clone(), pet);
        Ok(pet_id)
    }

    /// Feed `caller`'s pet: energy and happiness rise, and a reward is paid
    /// for the resulting mood.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] or [`PetError::CooldownActive`].
    pub fn feed_pet(
        &mut self,
        vault: &mut RewardVault,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ActionReceipt, PetError> {
        self.care(vault, caller, PetAction::Feed, now)
    }

    /// Play with `caller`'s pet: happiness rises, energy falls, and a
    /// reward is paid for the resulting mood.
    ///
    /// Low energy never blocks play; energy floors at zero.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::NoSuchPet`] or [`PetError::CooldownActive`].
    pub fn play_with_pet(
        &mut self,
        vault: &mut RewardVault,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<ActionReceipt, PetError> {
        self.care(vault, caller, PetAction::Play, now)
    }

    fn care(
        &mut self,
        vault: &mut RewardVault,
        caller: &AccountId,
        action: PetAction,
        now: Timestamp,
    ) -> Result<ActionReceipt, PetError> {
        let mut next = self.lookup(caller)?.clone();

        stats::materialize(&mut next, now, &self.rules.pets);
        debug!(
            owner = %caller,
            happiness = next.happiness,
            energy = next.energy,
            "decay materialized"
        );
        if let Err(e) = self.cooldowns.check(&next, action, now) {
            debug!(owner = %caller, %action, error = %e, "action rejected");
            return Err(e);
        }

        match action {
            PetAction::Feed => {
                stats::apply_feed(&mut next, &self.rules.pets);
                next.last_feed_time = now;
            }
            PetAction::Play => {
                stats::apply_play(&mut next, &self.rules.pets);
                next.last_play_time = now;
            }
        }
        next.last_interaction_time = now;

        let mood = stats::derive_mood(next.happiness, next.energy, &self.rules.pets.mood);
        if next.total_rewards.checked_add(vault.quote(mood)).is_none() {
            return Err(PetError::ArithmeticOverflow {
                context: String::from("pet total rewards"),
            });
        }

        let reward = vault.disburse(caller, next.id, mood, now)?;
        next.total_rewards = next.total_rewards.saturating_add(reward);

        info!(
            owner = %caller,
            %action,
            happiness = next.happiness,
            energy = next.energy,
            %mood,
            reward = %reward,
            "pet cared for"
        );

        let receipt = ActionReceipt {
            action,
            happiness: next.happiness,
            energy: next.energy,
            mood,
            reward,
            at: now,
        };
        self.pets.insert(caller.clone(), next);
        Ok(receipt)
    }

    fn lookup(&self, account: &AccountId) -> Result<&Pet, PetError> {
        self.pets
            .get(account)
            .ok_or_else(|| PetError::NoSuchPet(account.clone()))
    }

    fn check_record(&self, pet: &Pet) -> Result<(), PetError> {
        let corrupt = |reason: &str| PetError::CorruptRecord {
            owner: pet.owner.clone(),
            reason: reason.to_owned(),
        };

        if pet.happiness > MAX_STAT || pet.energy > MAX_STAT {
            return Err(corrupt("stat out of bounds"));
        }
        let carry_limit = u32::try_from(SECS_PER_HOUR).unwrap_or(u32::MAX);
        if pet.happiness_decay_carry >= carry_limit || pet.energy_decay_carry >= carry_limit {
            return Err(corrupt("decay carry out of bounds"));
        }
        if pet.last_feed_time > pet.last_interaction_time
            || pet.last_play_time > pet.last_interaction_time
        {
            return Err(corrupt("action time after last interaction"));
        }
        if pet.created_at > pet.last_interaction_time {
            return Err(corrupt("created after last interaction"));
        }
        match validate_name(&pet.name, self.rules.pets.max_name_length) {
            Ok(normalized) if normalized == pet.name => Ok(()),
            Ok(_) => Err(corrupt("name is not normalized")),
            Err(e) => Err(corrupt(&e.to_string())),
        }
    }
}

/// Trim `raw` and check it against the naming rules.
///
/// Returns the trimmed name.
///
/// # Errors
///
/// Returns [`PetError::InvalidName`] if the name is blank, contains control
/// characters, or is longer than `max_len` UTF-16 code units.
pub fn validate_name(raw: &str, max_len: usize) -> Result<String, PetError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(PetError::InvalidName {
            reason: String::from("name must not be empty"),
        });
    }
    if name.chars().any(char::is_control) {
        return Err(PetError::InvalidName {
            reason: String::from("name must not contain control characters"),
        });
    }
    let len = name.encode_utf16().count();
    if len > max_len {
        return Err(PetError::InvalidName {
            reason: format!("name is {len} code units, limit is {max_len}"),
        });
    }
    Ok(name.to_owned())
}
