//! Error types for the API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! Every error body has the shape
//! `{"error": <message>, "kind": <kind>, "status": <code>}`, plus
//! `remaining_secs` for cooldown rejections.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cryptopet_pets::PetError;
use cryptopet_vault::VaultError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A pet operation was rejected.
    #[error(transparent)]
    Pet(#[from] PetError),

    /// A vault operation was rejected.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// The `x-caller` header is missing or not a valid account.
    #[error("invalid caller: {0}")]
    InvalidCaller(String),

    /// An account in the request path is malformed.
    #[error("invalid account: {0}")]
    InvalidAccount(String),

    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Stable machine-readable name of this error.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Pet(e) => match e {
                PetError::AlreadyOwnsPet(_) => "AlreadyOwnsPet",
                PetError::NoSuchPet(_) => "NoSuchPet",
                PetError::InvalidName { .. } => "InvalidName",
                PetError::InsufficientPayment { .. } => "InsufficientPayment",
                PetError::CooldownActive { .. } => "CooldownActive",
                PetError::CorruptRecord { .. }
                | PetError::ArithmeticOverflow { .. }
                | PetError::Vault(_) => "Internal",
            },
            Self::Vault(VaultError::ZeroAmount { .. }) => "ZeroAmount",
            Self::Vault(_) => "Internal",
            Self::InvalidCaller(_) => "InvalidCaller",
            Self::InvalidAccount(_) => "InvalidAccount",
            Self::InvalidQuery(_) => "InvalidQuery",
        }
    }

    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Pet(e) => match e {
                PetError::AlreadyOwnsPet(_) => StatusCode::CONFLICT,
                PetError::NoSuchPet(_) => StatusCode::NOT_FOUND,
                PetError::InvalidName { .. } => StatusCode::BAD_REQUEST,
                PetError::InsufficientPayment { .. } => StatusCode::PAYMENT_REQUIRED,
                PetError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
                PetError::CorruptRecord { .. }
                | PetError::ArithmeticOverflow { .. }
                | PetError::Vault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Vault(VaultError::ZeroAmount { .. })
            | Self::InvalidCaller(_)
            | Self::InvalidAccount(_)
            | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Vault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });
        if let Self::Pet(PetError::CooldownActive { remaining_secs, .. }) = &self {
            body["remaining_secs"] = serde_json::json!(remaining_secs);
        }

        (status, axum::Json(body)).into_response()
    }
}
