//! Axum router construction for the CryptoPet API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// Routes are listed in [`handlers`]; `GET /ws/events` streams events.
/// CORS allows any origin so a browser frontend on another port can
/// reach the API.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/events", get(ws::ws_events))
        // Pets
        .route("/api/pets/adopt", post(handlers::adopt_pet))
        .route("/api/pets/feed", post(handlers::feed_pet))
        .route("/api/pets/play", post(handlers::play_with_pet))
        .route("/api/pets/{account}", get(handlers::get_pet_info))
        .route("/api/pets/{account}/exists", get(handlers::check_has_pet))
        .route(
            "/api/pets/{account}/status",
            get(handlers::get_current_pet_status),
        )
        // Vault
        .route("/api/vault", get(handlers::get_vault))
        .route("/api/vault/deposit", post(handlers::deposit_reward_funds))
        // Events
        .route("/api/events", get(handlers::list_events))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
