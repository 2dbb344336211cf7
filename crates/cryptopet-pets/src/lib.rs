//! Pet registry, stat decay, mood, and cooldown rules for the CryptoPet
//! engine.
//!
//! This crate is the logic layer for pets: everything that operates on pet
//! records without touching I/O or clocks. Callers supply the logical time
//! and the [`cryptopet_vault::RewardVault`] that rewards are paid from.
//!
//! # Modules
//!
//! - [`config`] -- Tunable stats, decay, mood bands, cooldowns ([`PetRules`])
//! - [`cooldown`] -- Per-action cooldown enforcement ([`CooldownGuard`])
//! - [`error`] -- Error types for all pet operations ([`PetError`])
//! - [`registry`] -- The account-to-pet mapping and actions ([`PetRegistry`])
//! - [`stats`] -- Lazy decay projection, mood derivation, action deltas

pub mod config;
pub mod cooldown;
pub mod error;
pub mod registry;
pub mod stats;

// Re-export primary types at crate root for convenience.
pub use config::{CooldownConfig, MoodThresholds, PetRules, PetsConfig};
pub use cooldown::CooldownGuard;
pub use error::PetError;
pub use registry::PetRegistry;
