//! Error types for the node binary.

/// Top-level error for the node binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cryptopet_core::ConfigError,
    },

    /// Snapshot restore or save failed.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying snapshot error.
        #[from]
        source: cryptopet_core::SnapshotError,
    },

    /// Initial vault funding failed.
    #[error("vault error: {source}")]
    Vault {
        /// The underlying vault error.
        #[from]
        source: cryptopet_vault::VaultError,
    },

    /// The API server failed to start or stopped abnormally.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: cryptopet_api::ServerError,
    },

    /// Startup could not proceed.
    #[error("startup error: {message}")]
    Startup {
        /// Description of the failure.
        message: String,
    },
}
