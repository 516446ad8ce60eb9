//! Authentication API handlers.
//!
//! Steam sign-in exchanges a session ticket for an opaque bearer token:
//! the ticket is verified against the Steam Web API, the verified identity
//! is resolved to a local account (created and linked on first sign-in),
//! and a token for that account is returned.
//!
//! Example sign-in:
//! ```bash
//! curl -X POST http://localhost:6970/api/auth/steam \
//!   -H "Content-Type: application/json" \
//!   -d '{"ticket": "<hex ticket from the Steam client>"}'
//! ```

use axum::{Extension, extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use game_lobby::auth::{AuthError, User, UserId};
use game_lobby::steam::{PROVIDER_STEAM, SteamError};

use super::AppState;
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
pub struct SteamLoginPayload {
    pub ticket: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub avatar_id: Option<i64>,
    pub admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar_id: user.avatar_id,
            admin: user.permission.admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Sign in with a Steam session ticket.
///
/// # Request Body
///
/// ```json
/// { "ticket": "<hex-encoded session ticket>" }
/// ```
///
/// # Response
///
/// On success, returns `200 OK` with a bearer token:
/// ```json
/// { "token": "opaque...", "user_id": 42, "username": "Player One" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Steam rejected the ticket
/// - `403 Forbidden`: the identity is VAC or publisher banned
/// - `502 Bad Gateway`: the Steam Web API was unreachable
pub async fn steam_login(
    State(state): State<AppState>,
    Json(payload): Json<SteamLoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    let identity = state
        .steam
        .authenticate_user_ticket(&payload.ticket)
        .await
        .map_err(steam_error)?;

    if identity.banned() {
        logging::log_security_event(
            "banned_identity",
            None,
            &format!("Rejected banned Steam identity {}", identity.steam_id),
        );
        metrics::steam_login_attempt("banned");
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Account is banned".to_string(),
            }),
        ));
    }

    // Re-authentication first; fall back to first-time signup on miss.
    let user = match state
        .auth
        .get_user_by_oauth(PROVIDER_STEAM, &identity.steam_id)
        .await
    {
        Ok(user) => user,
        Err(AuthError::NotFound) => {
            let summary = state
                .steam
                .get_player_summary(&identity.steam_id)
                .await
                .map_err(steam_error)?;
            let user = state
                .auth
                .create_user_by_oauth(summary.into())
                .await
                .map_err(auth_error)?;
            metrics::user_created(PROVIDER_STEAM);
            user
        }
        Err(e) => return Err(auth_error(e)),
    };

    let token = state.auth.create_token(user.id).map_err(auth_error)?;
    metrics::steam_login_attempt("ok");

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

/// Resolve the bearer token to the calling user.
///
/// The auth middleware has already authorized the request and stored the
/// user in request extensions.
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}

fn steam_error(err: SteamError) -> ApiError {
    if err.is_semantic() {
        logging::log_security_event("steam_rejected", None, &err.to_string());
        metrics::steam_login_attempt("unauthorized");
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        )
    } else {
        tracing::error!("Steam Web API failure: {err}");
        metrics::steam_login_attempt("error");
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "Authentication service unavailable".to_string(),
            }),
        )
    }
}

fn auth_error(err: AuthError) -> ApiError {
    let status = match &err {
        AuthError::NotFound | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthError::IdentityTaken => StatusCode::CONFLICT,
        AuthError::Database(_) | AuthError::Codec(_) => {
            tracing::error!("Auth failure during Steam sign-in: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status != StatusCode::INTERNAL_SERVER_ERROR {
        metrics::steam_login_attempt("unauthorized");
    } else {
        metrics::steam_login_attempt("error");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}
