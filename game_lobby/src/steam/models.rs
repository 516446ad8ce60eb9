//! Steam Web API wire models.

use serde::{Deserialize, Serialize};

use crate::auth::OAuthProfile;

/// Provider tag recorded on identity links created through Steam sign-in.
pub const PROVIDER_STEAM: &str = "steam";

/// Verified identity returned by ticket authentication.
#[derive(Debug, Clone)]
pub struct TicketIdentity {
    pub steam_id: String,
    pub vac_banned: bool,
    pub publisher_banned: bool,
}

impl TicketIdentity {
    /// True when either ban flag is set.
    pub fn banned(&self) -> bool {
        self.vac_banned || self.publisher_banned
    }
}

/// Public profile summary for a Steam account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname")]
    pub persona_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, rename = "avatarmedium")]
    pub avatar_medium: String,
    #[serde(default, rename = "avatarfull")]
    pub avatar_full: String,
}

impl PlayerSummary {
    /// Best available avatar URL, largest first.
    pub fn avatar_url(&self) -> Option<&str> {
        [&self.avatar_full, &self.avatar_medium, &self.avatar]
            .into_iter()
            .find(|url| !url.is_empty())
            .map(String::as_str)
    }
}

impl From<PlayerSummary> for OAuthProfile {
    fn from(summary: PlayerSummary) -> Self {
        let avatar_url = summary.avatar_url().map(str::to_string);
        OAuthProfile {
            provider: PROVIDER_STEAM.to_string(),
            external_id: summary.steam_id,
            nickname: summary.persona_name.clone(),
            name: summary.persona_name,
            avatar_url,
        }
    }
}

/// `{response:{error:{errorcode,errordesc}}}`, Steam's application-level
/// failure shape, possible on any endpoint regardless of HTTP status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub response: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(rename = "errorcode")]
    pub error_code: i64,
    #[serde(rename = "errordesc")]
    pub error_desc: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthenticateTicketEnvelope {
    pub response: AuthenticateTicketBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthenticateTicketBody {
    pub params: TicketParams,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TicketParams {
    pub result: String,
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(default, rename = "vacbanned")]
    pub vac_banned: bool,
    #[serde(default, rename = "publisherbanned")]
    pub publisher_banned: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerSummariesEnvelope {
    pub response: PlayerSummariesBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerSummariesBody {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_summary_prefers_full_avatar() {
        let summary = PlayerSummary {
            steam_id: "7656".to_string(),
            persona_name: "Player One".to_string(),
            avatar: "http://img/small.jpg".to_string(),
            avatar_medium: "http://img/medium.jpg".to_string(),
            avatar_full: "http://img/full.jpg".to_string(),
        };

        let profile = OAuthProfile::from(summary);
        assert_eq!(profile.provider, "steam");
        assert_eq!(profile.external_id, "7656");
        assert_eq!(profile.username(), "Player One");
        assert_eq!(profile.avatar_url.as_deref(), Some("http://img/full.jpg"));
    }

    #[test]
    fn test_profile_without_avatar() {
        let summary = PlayerSummary {
            steam_id: "7656".to_string(),
            persona_name: "Player One".to_string(),
            avatar: String::new(),
            avatar_medium: String::new(),
            avatar_full: String::new(),
        };
        assert!(OAuthProfile::from(summary).avatar_url.is_none());
    }
}
