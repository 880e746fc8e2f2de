//! Transport token authentication extractor.
//!
//! Verifies the environment-provided API token against:
//! - `Authorization: Bearer <token>` header
//! - `X-API-Key: <token>` header
//!
//! When no token is configured the extractor is a no-op, leaving the
//! endpoint open for local development.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use secrecy::ExposeSecret;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated request marker. Extracting this validates the token.
pub struct Authenticated;

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = &state.api_token else {
            return Ok(Authenticated);
        };

        let provided = extract_api_key(parts)?;
        if provided == expected.expose_secret() {
            Ok(Authenticated)
        } else {
            Err(AppError::Unauthorized("Invalid API token.".to_string()))
        }
    }
}

/// Extract the API token from request headers.
fn extract_api_key(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <token>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try X-API-Key header
    if let Some(key) = parts.headers.get("x-api-key") {
        let key_str = key
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-API-Key header encoding".to_string()))?;
        return Ok(key_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing API token. Provide it via 'Authorization: Bearer <token>' or 'X-API-Key: <token>'."
            .to_string(),
    ))
}
