//! HTTP API for the game lobby server.
//!
//! # Architecture
//!
//! - **Axum**: Async web framework for the REST surface
//! - **Tower**: CORS middleware
//! - **Opaque bearer tokens**: issued on Steam sign-in, resolved by the
//!   auth middleware on protected routes
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health               - Health check (public)
//! POST /api/auth/steam       - Steam ticket sign-in (public)
//! GET  /api/auth/me          - Resolve the bearer token to a user (auth required)
//! ```
//!
//! # Security
//!
//! Every authorization failure answers with one generic `401 Unauthorized`
//! body; whether the token was malformed or merely pointed at a missing
//! user is never revealed. CORS is configured permissively for
//! development; restrict origins in production.

pub mod auth;
pub mod middleware;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use game_lobby::auth::AuthManager;
use game_lobby::steam::SteamClient;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to Arc wrappers).
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub steam: Arc<SteamClient>,
    pub pool: Arc<PgPool>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/api/auth/steam", post(auth::steam_login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Probes database connectivity and returns `200 OK` when healthy,
/// `503 Service Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&*state.pool).await.is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
