//! REST API endpoint handlers.
//!
//! Mutating endpoints act on behalf of the account in the `x-caller`
//! header. All amounts are wei, written as decimal strings; request
//! bodies also accept plain integers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/pets/adopt` | Adopt a pet, paying `value` |
//! | `POST` | `/api/pets/feed` | Feed the caller's pet |
//! | `POST` | `/api/pets/play` | Play with the caller's pet |
//! | `POST` | `/api/vault/deposit` | Add reward funds |
//! | `GET` | `/api/pets/{account}/exists` | Whether an account owns a pet |
//! | `GET` | `/api/pets/{account}` | Pet name, adoption time, rewards |
//! | `GET` | `/api/pets/{account}/status` | Current stats and mood |
//! | `GET` | `/api/vault` | Vault balance and totals |
//! | `GET` | `/api/events` | Recent events (by owner) |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use cryptopet_core::service::EVENT_LOG_CAPACITY;
use cryptopet_types::{AccountId, PetEvent, Wei};

use crate::error::ApiError;
use crate::extract::Caller;
use crate::state::AppState;

/// Events returned by `GET /api/events` when no limit is given.
const DEFAULT_EVENT_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/pets/adopt`.
#[derive(Debug, serde::Deserialize)]
pub struct AdoptRequest {
    /// Requested pet name.
    pub name: String,
    /// Payment attached to the adoption, in wei.
    #[serde(with = "cryptopet_types::wei")]
    pub value: Wei,
}

/// Body of `POST /api/vault/deposit`.
#[derive(Debug, serde::Deserialize)]
pub struct DepositRequest {
    /// Amount to deposit, in wei.
    #[serde(with = "cryptopet_types::wei")]
    pub value: Wei,
}

/// Response of `POST /api/vault/deposit`.
#[derive(Debug, serde::Serialize)]
pub struct BalanceResponse {
    /// Vault balance after the deposit, in wei.
    #[serde(with = "cryptopet_types::wei")]
    pub balance: Wei,
}

/// Response of `GET /api/events`.
#[derive(Debug, serde::Serialize)]
pub struct EventsResponse {
    /// Number of events returned.
    pub count: usize,
    /// Events, newest first.
    pub events: Vec<PetEvent>,
}

/// Query parameters for the `GET /api/events` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EventsQuery {
    /// Only events triggered by this account.
    pub owner: Option<String>,
    /// Maximum number of events to return (default 100, max 1000).
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pet_count = state.service.pet_count().await;
    let vault = state.service.vault_summary().await;
    let balance = vault.balance;
    let total_disbursed = vault.total_disbursed;
    let started_at = state.started_at.format("%Y-%m-%d %H:%M:%S UTC");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>CryptoPet</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #f778ba; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #f778ba; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>CryptoPet</h1>
    <p class="subtitle">Running since {started_at}</p>

    <div>
        <div class="metric">
            <div class="label">Pets</div>
            <div class="value">{pet_count}</div>
        </div>
        <div class="metric">
            <div class="label">Vault balance (wei)</div>
            <div class="value">{balance}</div>
        </div>
        <div class="metric">
            <div class="label">Rewards paid (wei)</div>
            <div class="value">{total_disbursed}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>POST /api/pets/adopt -- Adopt a pet (x-caller header, {{"name", "value"}})</li>
        <li>POST /api/pets/feed -- Feed your pet</li>
        <li>POST /api/pets/play -- Play with your pet</li>
        <li>POST /api/vault/deposit -- Add reward funds ({{"value"}})</li>
        <li>GET /api/pets/{{account}}/exists -- Whether an account owns a pet</li>
        <li>GET /api/pets/{{account}} -- Pet info</li>
        <li>GET /api/pets/{{account}}/status -- Current stats and mood</li>
        <li>GET <a href="/api/vault">/api/vault</a> -- Vault summary</li>
        <li>GET <a href="/api/events">/api/events</a> -- Recent events (?owner=X&amp;limit=N)</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/events</code> -- Live event stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Adopt a pet for the caller.
///
/// Responds `201 Created` with `{"pet_id": ...}`.
pub async fn adopt_pet(
    State(state): State<Arc<AppState>>,
    Caller(caller): Caller,
    Json(body): Json<AdoptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pet_id = state
        .service
        .adopt_pet(&caller, &body.name, body.value)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "pet_id": pet_id })),
    ))
}

/// Feed the caller's pet and return its new stats and the reward paid.
pub async fn feed_pet(
    State(state): State<Arc<AppState>>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.service.feed_pet(&caller).await?;
    Ok(Json(receipt))
}

/// Play with the caller's pet and return its new stats and the reward paid.
pub async fn play_with_pet(
    State(state): State<Arc<AppState>>,
    Caller(caller): Caller,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.service.play_with_pet(&caller).await?;
    Ok(Json(receipt))
}

/// Deposit reward funds and return the new vault balance.
pub async fn deposit_reward_funds(
    State(state): State<Arc<AppState>>,
    Caller(caller): Caller,
    Json(body): Json<DepositRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let balance = state
        .service
        .deposit_reward_funds(&caller, body.value)
        .await?;
    Ok(Json(BalanceResponse { balance }))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Whether `account` owns a pet. Never fails for a well-formed account.
pub async fn check_has_pet(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account = parse_account(&account)?;
    let has_pet = state.service.check_has_pet(&account).await;
    Ok(Json(serde_json::json!({ "has_pet": has_pet })))
}

/// Name, adoption time, and lifetime rewards of `account`'s pet.
pub async fn get_pet_info(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account = parse_account(&account)?;
    let info = state.service.get_pet_info(&account).await?;
    Ok(Json(info))
}

/// Current stats and mood of `account`'s pet.
pub async fn get_current_pet_status(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account = parse_account(&account)?;
    let status = state.service.get_current_pet_status(&account).await?;
    Ok(Json(status))
}

/// Vault balance and lifetime totals.
pub async fn get_vault(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.vault_summary().await)
}

/// Recent events, newest first.
///
/// # Query Parameters
///
/// - `owner`: Return only events triggered by this account.
/// - `limit`: Maximum number of events to return (default 100, max 1000).
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_EVENT_LIMIT)
        .min(EVENT_LOG_CAPACITY);
    let owner = params
        .owner
        .as_deref()
        .map(|raw| {
            AccountId::parse(raw).ok_or_else(|| ApiError::InvalidQuery(format!("owner={raw}")))
        })
        .transpose()?;

    let events = state.service.recent_events(owner.as_ref(), limit).await;

    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_account(raw: &str) -> Result<AccountId, ApiError> {
    AccountId::parse(raw).ok_or_else(|| ApiError::InvalidAccount(raw.to_owned()))
}
