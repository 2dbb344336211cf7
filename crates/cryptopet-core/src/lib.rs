//! Clock, configuration, contract state, and the serialized pet service
//! for the CryptoPet engine.
//!
//! # Modules
//!
//! - [`clock`] -- Logical time sources ([`Clock`], [`SystemClock`], [`ManualClock`])
//! - [`config`] -- Typed `cryptopet-config.yaml` loader ([`CryptoPetConfig`])
//! - [`contract`] -- Registry plus vault state machine and snapshots ([`Contract`])
//! - [`service`] -- Lock-serialized async handle with event log ([`PetService`])

pub mod clock;
pub mod config;
pub mod contract;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, CryptoPetConfig};
pub use contract::{Contract, ContractSnapshot, SnapshotError};
pub use service::PetService;
