//! # API Endpoint Handlers

use super::{
    AppState,
    types::{HealthResponse, RegisterRequest, RegisterResponse},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use quickbill_core::{
    NewAccount, QuickbillError,
    primitives::{EMAIL_TAKEN_MESSAGE, REGISTERED_MESSAGE, REGISTRATION_FAILED_MESSAGE},
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// REGISTER HANDLER
// =============================================================================

/// Create an account.
///
/// The payload is validated and its password hashed on the blocking pool
/// before the registry lock is taken. The duplicate check and the insert
/// then happen under a single write lock.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    let prepared = tokio::task::spawn_blocking(move || NewAccount::from_payload(request)).await;

    let account = match prepared {
        Ok(Ok(account)) => account,
        Ok(Err(e)) => return rejection(e),
        Err(e) => {
            tracing::error!(event = "register_failed", "Hashing task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RegisterResponse::failure(REGISTRATION_FAILED_MESSAGE)),
            );
        }
    };

    let mut registry = state.registry.write().await;
    match registry.register(account) {
        Ok(stored) => {
            tracing::info!(
                event = "account_registered",
                account_id = stored.id.0,
                "Account registered"
            );
            (
                StatusCode::CREATED,
                Json(RegisterResponse::success(REGISTERED_MESSAGE).with_account_id(stored.id.0)),
            )
        }
        Err(e) => rejection(e),
    }
}

/// Map a registration error onto a status and failure envelope.
fn rejection(error: QuickbillError) -> (StatusCode, Json<RegisterResponse>) {
    match error {
        QuickbillError::InvalidPayload(message) => {
            tracing::debug!(event = "register_rejected", reason = %message);
            (
                StatusCode::BAD_REQUEST,
                Json(RegisterResponse::failure(message)),
            )
        }
        QuickbillError::EmailTaken => {
            tracing::debug!(event = "register_rejected", reason = "email_taken");
            (
                StatusCode::CONFLICT,
                Json(RegisterResponse::failure(EMAIL_TAKEN_MESSAGE)),
            )
        }
        other => {
            tracing::error!(event = "register_failed", "Registration failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RegisterResponse::failure(REGISTRATION_FAILED_MESSAGE)),
            )
        }
    }
}
