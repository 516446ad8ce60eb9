//! Authentication error types.

use thiserror::Error;

use super::token::TokenError;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// User or identity link not found
    #[error("User not found")]
    NotFound,

    /// Token failed to decode, verify, or parse
    #[error("Invalid token")]
    InvalidToken,

    /// The (provider, external_id) pair is already linked to a user
    #[error("External identity already linked to a user")]
    IdentityTaken,

    /// Token issuance failed; a service that cannot issue tokens cannot
    /// function, so callers on the startup path must abort.
    #[error("Token issuance failed: {0}")]
    Codec(#[source] TokenError),
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Authorization failures collapse into one generic message so the API
    /// boundary never reveals whether a token was malformed or merely
    /// pointed at a missing user. Database and codec errors are sanitized
    /// to prevent information disclosure about the internal system
    /// structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::Codec(_) => "Internal server error".to_string(),
            AuthError::NotFound | AuthError::InvalidToken => "Unauthorized".to_string(),
            AuthError::IdentityTaken => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
