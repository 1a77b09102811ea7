//! # API Request/Response Types
//!
//! JSON structures for the HTTP API. The registration body and the
//! `{success, message}` envelope are shared with the client through
//! quickbill-core.

use quickbill_core::{Envelope, RegistrationPayload};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`.
pub type RegisterRequest = RegistrationPayload;

/// Response of `POST /auth/register`.
pub type RegisterResponse = Envelope;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
