//! Server binary for the CryptoPet engine.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`CRYPTOPET_CONFIG` or `cryptopet-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Restore the contract from the snapshot file, or deploy a fresh one
//!    and fund its vault
//! 4. Serve the API until `Ctrl-C`
//! 5. Save the snapshot

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cryptopet_api::AppState;
use cryptopet_core::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LoggingConfig};
use cryptopet_core::{Clock, Contract, CryptoPetConfig, PetService, SystemClock};
use cryptopet_types::AccountId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::NodeError;

/// Account credited with the deploy-time reward funding.
const DEPLOYER_ACCOUNT: &str = "0xdeployer";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, snapshot restore, server startup,
/// or the final snapshot save fails.
#[tokio::main]
async fn main() -> Result<(), NodeError> {
    let config_path = config_path();
    let config = load_config(&config_path)?;

    init_tracing(&config.logging);
    info!(
        config = %config_path.display(),
        port = config.server.port,
        adoption_fee = %config.economy.adoption_fee,
        snapshot = ?config.persistence.snapshot_path,
        "cryptopet-node starting"
    );

    let service = build_service(&config, Arc::new(SystemClock)).await?;
    let summary = service.vault_summary().await;
    info!(
        pets = service.pet_count().await,
        balance = %summary.balance,
        "Contract ready"
    );

    let state = Arc::new(AppState::new(service.clone()));
    cryptopet_api::start_server(&config.server, state, shutdown_signal()).await?;

    if let Some(path) = &config.persistence.snapshot_path {
        service.save_snapshot(path).await?;
    }

    info!("cryptopet-node stopped");
    Ok(())
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured
/// level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Config file location from [`CONFIG_PATH_ENV`], else the default.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration from `path`, falling back to defaults if the file
/// does not exist.
fn load_config(path: &Path) -> Result<CryptoPetConfig, NodeError> {
    if path.exists() {
        Ok(CryptoPetConfig::from_file(path)?)
    } else {
        let mut config = CryptoPetConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }
}

/// Restore the contract from the configured snapshot if one exists;
/// otherwise deploy a fresh contract and deposit the initial reward funds.
async fn build_service(
    config: &CryptoPetConfig,
    clock: Arc<dyn Clock>,
) -> Result<PetService, NodeError> {
    if let Some(path) = &config.persistence.snapshot_path
        && path.exists()
    {
        let contract = Contract::load_from(path, config.pet_rules(), config.economy.rewards)?;
        return Ok(PetService::new(contract, clock));
    }

    let service = PetService::from_config(config, clock);
    let funds = config.economy.initial_reward_funds;
    if funds > 0 {
        let deployer = AccountId::parse(DEPLOYER_ACCOUNT).ok_or_else(|| NodeError::Startup {
            message: format!("invalid deployer account {DEPLOYER_ACCOUNT}"),
        })?;
        let balance = service.deposit_reward_funds(&deployer, funds).await?;
        info!(%balance, "Reward vault funded");
    }
    Ok(service)
}

/// Resolve on `Ctrl-C`.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cryptopet_core::ManualClock;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cryptopet-node-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let config = load_config(&scratch_path("absent.yaml")).unwrap();
        assert_eq!(config.economy, CryptoPetConfig::default().economy);
    }

    #[tokio::test]
    async fn fresh_deploy_funds_vault() {
        let config = CryptoPetConfig::default();
        let service = build_service(&config, Arc::new(ManualClock::new(0)))
            .await
            .unwrap();

        let summary = service.vault_summary().await;
        assert_eq!(summary.balance, config.economy.initial_reward_funds);
        assert_eq!(service.recent_events(None, 10).await.len(), 1);
    }

    #[tokio::test]
    async fn existing_snapshot_is_restored() {
        let path = scratch_path("restore.json");
        let mut config = CryptoPetConfig::default();
        config.persistence.snapshot_path = Some(path.clone());

        let clock = Arc::new(ManualClock::new(100));
        let first = build_service(&config, clock.clone()).await.unwrap();
        let alice = AccountId::parse("0xalice").unwrap();
        first
            .adopt_pet(&alice, "Rex", config.economy.adoption_fee)
            .await
            .unwrap();
        first.save_snapshot(&path).await.unwrap();

        let restored = build_service(&config, clock).await.unwrap();
        assert!(restored.check_has_pet(&alice).await);
        assert_eq!(restored.vault_summary().await, first.vault_summary().await);
        // A restored contract is not funded a second time.
        assert!(restored.recent_events(None, 10).await.is_empty());

        std::fs::remove_file(&path).unwrap();
    }
}
