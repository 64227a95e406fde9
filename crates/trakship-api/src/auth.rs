//! API authentication via opaque bearer tokens.
//!
//! Tokens are random hex strings stored in the database with an expiry.
//! Passwords are hashed with bcrypt; the hash never leaves the storage
//! layer except for verification here.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::Rng;
use uuid::Uuid;

use trakship_storage::TokenRepository;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user, inserted as a request extension by
/// [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Generate a random 32-character hex token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    hex::encode(bytes)
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    bcrypt::verify(password, hash)
        .map_err(|e| ApiError::Internal(format!("Failed to verify password: {}", e)))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Resolve a bearer token from an Authorization header value.
///
/// `Ok(None)` means a missing, malformed, unknown, or expired token;
/// storage failures during the lookup propagate as errors rather than
/// masquerading as a rejected token.
pub fn resolve_bearer(state: &AppState, header_value: &str) -> Result<Option<Uuid>, ApiError> {
    let token = match header_value.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return Ok(None),
    };
    Ok(TokenRepository::new(Arc::clone(&state.database)).find_user(token)?)
}

/// Middleware that validates Bearer token authentication.
///
/// Looks the token up in the token store and rejects missing, unknown,
/// and expired tokens with 401. On success the owning user id is made
/// available to handlers as an [`AuthUser`] extension.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let header_value = match req.headers().get("authorization") {
        Some(value) => match value.to_str() {
            Ok(s) => s.to_string(),
            Err(_) => return unauthorized("Invalid Authorization header encoding"),
        },
        None => return unauthorized("Missing Authorization header"),
    };

    match resolve_bearer(&state, &header_value) {
        Ok(Some(user_id)) => {
            req.extensions_mut().insert(AuthUser(user_id));
            next.run(req).await
        }
        Ok(None) => unauthorized("Invalid or expired token"),
        Err(e) => e.into_response(),
    }
}
