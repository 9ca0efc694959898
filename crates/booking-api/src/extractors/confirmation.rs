//! `ConfirmationCaller` extractor: the shared secret of the confirming system.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use booking_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the confirmation token.
pub const CONFIRMATION_TOKEN_HEADER: &str = "x-confirmation-token";

/// Proof that a confirmation comes from the configured confirming system.
///
/// When `server.confirmation_token` is unset every caller is accepted.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationCaller;

impl FromRequestParts<AppState> for ConfirmationCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.server.confirmation_token() else {
            return Ok(Self);
        };

        let given = parts
            .headers
            .get(CONFIRMATION_TOKEN_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();

        if tokens_match(given, expected.as_bytes()) {
            Ok(Self)
        } else {
            Err(AppError::unauthenticated("Missing or invalid X-Confirmation-Token header").into())
        }
    }
}

/// Compare without stopping at the first differing byte.
fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
