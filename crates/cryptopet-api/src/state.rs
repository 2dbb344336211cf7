//! Shared application state for the API server.

use chrono::{DateTime, Utc};
use cryptopet_core::PetService;
use cryptopet_types::PetEvent;
use tokio::sync::broadcast;

/// Shared state for the Axum application.
///
/// Wrapped in [`std::sync::Arc`] and injected via Axum's `State`
/// extractor. All pet and vault state lives behind the [`PetService`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// The serialized contract handle.
    pub service: PetService,
    /// Wall-clock time when the server state was created.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wrap `service` for the router.
    pub fn new(service: PetService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }

    /// Subscribe to pet events for a `WebSocket` client.
    pub fn subscribe(&self) -> broadcast::Receiver<PetEvent> {
        self.service.subscribe()
    }
}
