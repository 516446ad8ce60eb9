//! Authentication middleware for protected endpoints.
//!
//! Extracts the opaque bearer token from the `Authorization` header,
//! resolves it through the auth manager (sentinels included), and injects
//! the resulting `User` into request extensions for downstream handlers:
//!
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Handlers receive the user via `Extension(user): Extension<User>`.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{Json, Response},
};

use game_lobby::auth::AuthError;

use super::AppState;
use super::auth::ErrorResponse;
use crate::{logging, metrics};

/// Resolve the bearer token and inject the authenticated user.
///
/// # Behavior
///
/// - **Success**: token resolves → `User` stored in request extensions →
///   next handler runs
/// - **Missing/malformed header, bad token, missing user**: one generic
///   `401 Unauthorized`
/// - **Store failure**: `500 Internal Server Error`
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        metrics::authorize_attempt("unauthorized");
        return Err(unauthorized());
    };

    match state.auth.authorize(token).await {
        Ok(user) => {
            metrics::authorize_attempt("ok");
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(err @ (AuthError::InvalidToken | AuthError::NotFound)) => {
            logging::log_security_event("authorize_failed", None, &err.to_string());
            metrics::authorize_attempt("unauthorized");
            Err(unauthorized())
        }
        Err(err) => {
            tracing::error!("Authorization lookup failed: {err}");
            metrics::authorize_attempt("error");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.client_message(),
                }),
            ))
        }
    }
}

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Unauthorized".to_string(),
        }),
    )
}
