//! # QuickBill HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /auth/register` - Create an account
//! - `GET /health` - Health check
//!
//! ## Configuration (Environment Variables)
//!
//! - `QUICKBILL_CORS_ORIGINS`: Comma-separated list of allowed frontend origins,
//!   or "*" to mirror any origin (default: the QuickBill frontends)
//! - `QUICKBILL_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{health_handler, register_handler};
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{HealthResponse, RegisterRequest, RegisterResponse};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use quickbill_core::{QuickbillError, Registry};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Frontends allowed when `QUICKBILL_CORS_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "http://localhost:3000",
    "https://quick-bill-client.vercel.app",
];

/// Maximum accepted request body. Registration payloads are tiny.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the account registry.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `QUICKBILL_CORS_ORIGINS`:
/// - If "*": mirrors any request origin (development only)
/// - If not set: allows `DEFAULT_CORS_ORIGINS`
/// - Otherwise: parses a comma-separated list of allowed origins
///
/// Credentials are always allowed, so wildcard headers are never used.
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("QUICKBILL_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Mirroring ALL origins (QUICKBILL_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::very_permissive()
        }
        Some(origins) => {
            let allowed = parse_origins(origins.split(','));
            if allowed.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in QUICKBILL_CORS_ORIGINS, falling back to defaults"
                );
                allow_list(parse_origins(DEFAULT_CORS_ORIGINS))
            } else {
                allow_list(allowed)
            }
        }
        None => {
            tracing::info!("CORS: No QUICKBILL_CORS_ORIGINS set, using default frontends");
            allow_list(parse_origins(DEFAULT_CORS_ORIGINS))
        }
    }
}

fn parse_origins<'a>(origins: impl IntoIterator<Item = &'a str>) -> Vec<HeaderValue> {
    origins
        .into_iter()
        .filter_map(|s| {
            let trimmed = s.trim();
            match trimmed.parse::<HeaderValue>() {
                Ok(hv) => {
                    tracing::info!("CORS: Allowing origin: {}", trimmed);
                    Some(hv)
                }
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

fn allow_list(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Routes mounted under `/auth`.
fn auth_router() -> Router<AppState> {
    Router::new().route("/register", post(handlers::register_handler))
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - protects against floods (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/auth", auth_router());

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, registry: Registry) -> Result<(), QuickbillError> {
    let router = create_router(AppState::new(registry));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| QuickbillError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("QuickBill server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| QuickbillError::Io(format!("Server error: {}", e)))
}
