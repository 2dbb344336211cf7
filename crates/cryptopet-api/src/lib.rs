//! HTTP API server for the CryptoPet engine.
//!
//! This crate exposes the pet service over Axum:
//!
//! - **REST endpoints** for adopting, feeding, and playing with pets,
//!   funding the reward vault, and querying pets, the vault, and recent
//!   events
//! - **`WebSocket` endpoint** (`/ws/events`) streaming every event as it
//!   commits
//! - **Minimal HTML status page** (`GET /`)
//!
//! Mutating requests name their caller in the `x-caller` header. Errors
//! are JSON bodies with a stable `kind` and a matching HTTP status.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
