//! Steam Web API error types.

use thiserror::Error;

/// Steam Web API errors
///
/// Transport failures (`Transport`, `Status`, `Decode`) mean the API was
/// unreachable or unintelligible; semantic failures (`Api`,
/// `TicketRejected`, `UnknownPlayer`) mean Steam answered and said no.
#[derive(Debug, Error)]
pub enum SteamError {
    /// Network-level failure (connect, timeout, body read)
    #[error("Steam transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status before any body interpretation
    #[error("Steam http error: status {0}")]
    Status(u16),

    /// The response body did not match the expected wire shape
    #[error("Malformed Steam response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Steam's embedded error envelope, returned even on 2xx responses
    #[error("Steam api error {code}: {desc}")]
    Api { code: i64, desc: String },

    /// The ticket was readable but not accepted (expired, invalid, reused)
    #[error("Steam rejected ticket: result {0:?}")]
    TicketRejected(String),

    /// The profile endpoint returned zero matching players
    #[error("No Steam player found for {0}")]
    UnknownPlayer(String),
}

impl SteamError {
    /// True for failures that mean "Steam said no" rather than "Steam was
    /// unreachable"; callers map these to an authorization failure instead
    /// of an upstream error.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            SteamError::Api { .. } | SteamError::TicketRejected(_) | SteamError::UnknownPlayer(_)
        )
    }
}

/// Result type for Steam API operations
pub type SteamResult<T> = Result<T, SteamError>;
