//! Configuration loading and typed config structures for the CryptoPet
//! engine.
//!
//! The canonical configuration lives in `cryptopet-config.yaml` at the
//! project root. Every section and field has a default, so an empty file
//! (or no file at all) yields a working configuration.
//!
//! Environment overrides, applied after parsing:
//!
//! - `CRYPTOPET_PORT` -- API server port
//! - `CRYPTOPET_SNAPSHOT_PATH` -- snapshot file location

use std::path::{Path, PathBuf};

use cryptopet_pets::{CooldownConfig, PetRules, PetsConfig};
use cryptopet_types::Wei;
use cryptopet_vault::RewardSchedule;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CRYPTOPET_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "cryptopet-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An override or value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CryptoPetConfig {
    /// Stat baselines, decay, deltas, mood bands, name bounds.
    #[serde(default)]
    pub pets: PetsConfig,

    /// Action cooldowns.
    #[serde(default)]
    pub cooldowns: CooldownConfig,

    /// Fees, rewards, and deploy-time funding.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// API server binding.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Snapshot persistence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl CryptoPetConfig {
    /// Load configuration from a YAML file, apply environment overrides,
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the YAML is invalid, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment
    /// overrides, and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null rather than an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override values with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `CRYPTOPET_PORT` is not a port
    /// number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("CRYPTOPET_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::Invalid {
                reason: format!("CRYPTOPET_PORT={val}: {e}"),
            })?;
        }
        if let Ok(val) = std::env::var("CRYPTOPET_SNAPSHOT_PATH") {
            self.persistence.snapshot_path = Some(PathBuf::from(val));
        }
        Ok(())
    }

    /// Check that every value keeps the engine's invariants reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pet_rules()
            .validate()
            .map_err(|reason| ConfigError::Invalid { reason })?;
        if !self.economy.rewards.is_monotonic() {
            return Err(ConfigError::Invalid {
                reason: String::from("reward schedule must not decrease as mood improves"),
            });
        }
        Ok(())
    }

    /// The pet rules described by this configuration.
    pub fn pet_rules(&self) -> PetRules {
        PetRules {
            pets: self.pets.clone(),
            cooldowns: self.cooldowns,
            adoption_fee: self.economy.adoption_fee,
        }
    }
}

/// Fees, rewards, and deploy-time funding, all in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Minimum payment to adopt (default: 0.01 units).
    #[serde(default = "default_adoption_fee")]
    pub adoption_fee: Wei,

    /// Reward paid per mood tier.
    #[serde(default)]
    pub rewards: RewardSchedule,

    /// Deposit made by the operator at first start (default: 0.1 units).
    #[serde(default = "default_initial_reward_funds")]
    pub initial_reward_funds: Wei,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            adoption_fee: default_adoption_fee(),
            rewards: RewardSchedule::default(),
            initial_reward_funds: default_initial_reward_funds(),
        }
    }
}

/// API server binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port (default: 8080).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Snapshot persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Where to restore from at startup and save to at shutdown. State is
    /// kept in memory only when unset.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_adoption_fee() -> Wei {
    cryptopet_pets::config::DEFAULT_ADOPTION_FEE
}

const fn default_initial_reward_funds() -> Wei {
    100_000_000_000_000_000
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}
