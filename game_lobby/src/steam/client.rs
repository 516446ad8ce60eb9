//! Steam Web API client implementation.

use std::time::Duration;

use super::errors::{SteamError, SteamResult};
use super::models::{
    AuthenticateTicketEnvelope, ErrorEnvelope, PlayerSummariesEnvelope, PlayerSummary,
    TicketIdentity,
};

/// Production Steam Web API host.
const STEAM_API_URL: &str = "https://api.steampowered.com";

/// Fixed per-request timeout; no call blocks longer than this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Ticket verification success marker.
const RESULT_OK: &str = "OK";

/// Steam Web API credentials and endpoint configuration.
#[derive(Debug, Clone)]
pub struct SteamConfig {
    /// Steam application id the tickets are issued for
    pub app_id: String,
    /// Publisher Web API key
    pub api_key: String,
    /// API host; overridable so tests can point at a local server
    pub api_url: String,
}

impl SteamConfig {
    pub fn new(app_id: String, api_key: String) -> Self {
        Self {
            app_id,
            api_key,
            api_url: STEAM_API_URL.to_string(),
        }
    }
}

/// Steam Web API client.
///
/// Holds only the configured credentials and a pooled HTTP client; safe to
/// share across concurrent requests.
#[derive(Clone)]
pub struct SteamClient {
    http: reqwest::Client,
    config: SteamConfig,
}

impl SteamClient {
    /// Create a client with the fixed request timeout applied.
    pub fn new(config: SteamConfig) -> SteamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, interface: &str, method: &str, version: &str) -> String {
        format!("{}/{interface}/{method}/{version}/", self.config.api_url)
    }

    /// One GET against the API, applying the uniform response protocol:
    /// reject non-2xx, read the full body, surface the embedded error
    /// envelope even on 2xx, and only then hand the body to the caller.
    async fn api_get(&self, url: String, query: &[(&str, &str)]) -> SteamResult<Vec<u8>> {
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SteamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: ErrorEnvelope = serde_json::from_slice(&body)?;
        if let Some(err) = envelope.response.error {
            return Err(SteamError::Api {
                code: err.error_code,
                desc: err.error_desc,
            });
        }

        Ok(body.to_vec())
    }

    /// Verify a session ticket, returning the identity it belongs to.
    ///
    /// # Errors
    ///
    /// * `SteamError::TicketRejected` - Steam answered but the result was
    ///   not the literal `"OK"` (expired or invalid ticket); distinct from
    ///   every transport failure
    pub async fn authenticate_user_ticket(&self, ticket: &str) -> SteamResult<TicketIdentity> {
        let url = self.endpoint("ISteamUserAuth", "AuthenticateUserTicket", "v1");
        let body = self
            .api_get(
                url,
                &[
                    ("appid", self.config.app_id.as_str()),
                    ("key", self.config.api_key.as_str()),
                    ("ticket", ticket),
                ],
            )
            .await?;

        let envelope: AuthenticateTicketEnvelope = serde_json::from_slice(&body)?;
        let params = envelope.response.params;
        if params.result != RESULT_OK {
            return Err(SteamError::TicketRejected(params.result));
        }

        Ok(TicketIdentity {
            steam_id: params.steam_id,
            vac_banned: params.vac_banned,
            publisher_banned: params.publisher_banned,
        })
    }

    /// Fetch the public profile summary for a Steam id.
    ///
    /// # Errors
    ///
    /// * `SteamError::UnknownPlayer` - the endpoint answered with zero
    ///   matching profiles
    pub async fn get_player_summary(&self, steam_id: &str) -> SteamResult<PlayerSummary> {
        let url = self.endpoint("ISteamUser", "GetPlayerSummaries", "v2");
        let body = self
            .api_get(
                url,
                &[
                    ("key", self.config.api_key.as_str()),
                    ("steamids", steam_id),
                ],
            )
            .await?;

        let envelope: PlayerSummariesEnvelope = serde_json::from_slice(&body)?;
        envelope
            .response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| SteamError::UnknownPlayer(steam_id.to_string()))
    }
}
