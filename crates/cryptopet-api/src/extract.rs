//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cryptopet_types::AccountId;

use crate::error::ApiError;

/// Header naming the account that signs a mutating request.
pub const CALLER_HEADER: &str = "x-caller";

/// The account making a request, taken from the [`CALLER_HEADER`] header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub AccountId);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_HEADER)
            .ok_or_else(|| ApiError::InvalidCaller(format!("missing {CALLER_HEADER} header")))?
            .to_str()
            .map_err(|e| ApiError::InvalidCaller(e.to_string()))?;
        AccountId::parse(raw)
            .map(Self)
            .ok_or_else(|| ApiError::InvalidCaller(raw.to_owned()))
    }
}
