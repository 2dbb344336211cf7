//! Integration tests for the CryptoPet API endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Time comes from a [`ManualClock`] so cooldowns
//! and decay are deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use cryptopet_api::router::build_router;
use cryptopet_api::state::AppState;
use cryptopet_core::{CryptoPetConfig, ManualClock, PetService};
use serde_json::Value;
use tower::ServiceExt;

const FEE: &str = "10000000000000000";

fn make_app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let service = PetService::from_config(&CryptoPetConfig::default(), clock.clone());
    let router = build_router(Arc::new(AppState::new(service)));
    (router, clock)
}

fn post(uri: &str, caller: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(caller) = caller {
        builder = builder.header("x-caller", caller);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn adopt_body(name: &str, value: &str) -> String {
    format!(r#"{{"name": "{name}", "value": {value}}}"#)
}

/// Extract the body bytes from a response and parse as JSON.
async fn body_to_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn adopt(router: &Router, caller: &str, name: &str) -> Value {
    let response = router
        .clone()
        .oneshot(post(
            "/api/pets/adopt",
            Some(caller),
            &adopt_body(name, FEE),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response).await
}

// =========================================================================
// GET / -- HTML status page
// =========================================================================

#[tokio::test]
async fn index_returns_html() {
    let (router, _) = make_app();
    let response = router.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("CryptoPet"));
    assert!(html.contains("/api/vault"));
}

// =========================================================================
// POST /api/pets/adopt
// =========================================================================

#[tokio::test]
async fn adopt_returns_created_with_pet_id() {
    let (router, _) = make_app();
    let json = adopt(&router, "0xAlice", "  Rex ").await;
    assert!(json["pet_id"].is_string());

    let response = router.oneshot(get("/api/pets/0xalice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let info = body_to_json(response).await;
    assert_eq!(info["name"], "Rex");
    assert_eq!(info["created_at"], 0);
    assert_eq!(info["total_rewards"], "0");
}

#[tokio::test]
async fn second_adoption_is_conflict() {
    let (router, _) = make_app();
    adopt(&router, "0xalice", "Rex").await;

    let response = router
        .oneshot(post(
            "/api/pets/adopt",
            Some("0xalice"),
            &adopt_body("Fido", FEE),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_to_json(response).await;
    assert_eq!(json["kind"], "AlreadyOwnsPet");
    assert_eq!(json["status"], 409);
}

#[tokio::test]
async fn underpaid_adoption_is_payment_required() {
    let (router, _) = make_app();
    let response = router
        .oneshot(post(
            "/api/pets/adopt",
            Some("0xalice"),
            &adopt_body("Rex", "9999999999999999"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body_to_json(response).await["kind"], "InsufficientPayment");
}

#[tokio::test]
async fn blank_name_is_bad_request() {
    let (router, _) = make_app();
    let response = router
        .clone()
        .oneshot(post(
            "/api/pets/adopt",
            Some("0xalice"),
            &adopt_body("   ", FEE),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(response).await["kind"], "InvalidName");

    let response = router
        .oneshot(get("/api/pets/0xalice/exists"))
        .await
        .unwrap();
    assert_eq!(body_to_json(response).await["has_pet"], false);
}

#[tokio::test]
async fn missing_caller_is_bad_request() {
    let (router, _) = make_app();
    let response = router
        .oneshot(post("/api/pets/adopt", None, &adopt_body("Rex", FEE)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(response).await["kind"], "InvalidCaller");
}

// =========================================================================
// POST /api/pets/feed and /api/pets/play
// =========================================================================

#[tokio::test]
async fn feed_respects_cooldown() {
    let (router, clock) = make_app();
    adopt(&router, "0xalice", "Rex").await;

    clock.set(30 * 60);
    let response = router
        .clone()
        .oneshot(post("/api/pets/feed", Some("0xalice"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_to_json(response).await;
    assert_eq!(json["kind"], "CooldownActive");
    assert_eq!(json["remaining_secs"], 30 * 60);

    clock.set(60 * 60);
    let response = router
        .oneshot(post("/api/pets/feed", Some("0xalice"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let receipt = body_to_json(response).await;
    assert_eq!(receipt["action"], "Feed");
    assert_eq!(receipt["happiness"], 100);
    assert_eq!(receipt["energy"], 100);
    assert_eq!(receipt["mood"], "Excellent");
    assert_eq!(receipt["reward"], "1000000000000000");
}

#[tokio::test]
async fn play_spends_energy() {
    let (router, clock) = make_app();
    adopt(&router, "0xalice", "Rex").await;

    clock.set(30 * 60);
    let response = router
        .clone()
        .oneshot(post("/api/pets/play", Some("0xalice"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let receipt = body_to_json(response).await;
    assert_eq!(receipt["happiness"], 100);
    assert_eq!(receipt["energy"], 89);

    let response = router
        .oneshot(post("/api/pets/play", Some("0xalice"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn feeding_without_pet_is_not_found() {
    let (router, _) = make_app();
    let response = router
        .oneshot(post("/api/pets/feed", Some("0xnobody"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_to_json(response).await["kind"], "NoSuchPet");
}

// =========================================================================
// GET /api/pets/{account}/...
// =========================================================================

#[tokio::test]
async fn status_projects_decay() {
    let (router, clock) = make_app();
    adopt(&router, "0xalice", "Rex").await;

    clock.set(2 * 3_600);
    let response = router
        .oneshot(get("/api/pets/0xalice/status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = body_to_json(response).await;
    assert_eq!(status["happiness"], 90);
    assert_eq!(status["energy"], 94);
    assert_eq!(status["mood"], "Excellent");
}

#[tokio::test]
async fn unknown_pet_info_is_not_found() {
    let (router, _) = make_app();
    let response = router.oneshot(get("/api/pets/0xnobody")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], 404);
    assert!(json.get("remaining_secs").is_none());
}

#[tokio::test]
async fn malformed_account_is_bad_request() {
    let (router, _) = make_app();
    let response = router
        .oneshot(get("/api/pets/0x%20alice/exists"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(response).await["kind"], "InvalidAccount");
}

// =========================================================================
// Vault
// =========================================================================

#[tokio::test]
async fn deposit_increases_balance() {
    let (router, _) = make_app();
    adopt(&router, "0xalice", "Rex").await;

    let response = router
        .clone()
        .oneshot(post(
            "/api/vault/deposit",
            Some("0xsponsor"),
            r#"{"value": 5000}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_json(response).await["balance"],
        "10000000000005000"
    );

    let response = router.oneshot(get("/api/vault")).await.unwrap();
    let summary = body_to_json(response).await;
    assert_eq!(summary["balance"], "10000000000005000");
    assert_eq!(summary["total_disbursed"], "0");
    assert_eq!(summary["entry_count"], 2);
}

#[tokio::test]
async fn amounts_beyond_u64_stay_exact() {
    let (router, _) = make_app();
    let huge = "100000000000000000000000000000";
    let response = router
        .clone()
        .oneshot(post(
            "/api/vault/deposit",
            Some("0xsponsor"),
            &format!(r#"{{"value": "{huge}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["balance"], huge);

    let response = router
        .clone()
        .oneshot(post(
            "/api/pets/adopt",
            Some("0xalice"),
            &adopt_body("Rex", &format!("\"{FEE}\"")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router.oneshot(get("/api/events?limit=1")).await.unwrap();
    let json = body_to_json(response).await;
    assert_eq!(json["events"][0]["details"]["paid"], FEE);
}

#[tokio::test]
async fn zero_deposit_is_bad_request() {
    let (router, _) = make_app();
    let response = router
        .oneshot(post(
            "/api/vault/deposit",
            Some("0xsponsor"),
            r#"{"value": 0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(response).await["kind"], "ZeroAmount");
}

// =========================================================================
// GET /api/events
// =========================================================================

#[tokio::test]
async fn events_filter_by_owner_newest_first() {
    let (router, clock) = make_app();
    adopt(&router, "0xalice", "Rex").await;
    adopt(&router, "0xbob", "Fido").await;
    clock.set(3_600);
    let response = router
        .clone()
        .oneshot(post("/api/pets/feed", Some("0xalice"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get("/api/events?owner=0xALICE"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["events"][0]["details"]["type"], "PetFed");
    assert_eq!(json["events"][1]["details"]["type"], "PetAdopted");
    assert_eq!(json["events"][1]["details"]["name"], "Rex");

    let response = router.oneshot(get("/api/events?limit=1")).await.unwrap();
    let json = body_to_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["events"][0]["details"]["type"], "PetFed");
}
