//! Account identity data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// Local user account.
///
/// Created by the first-run bootstrap (admin) or by OAuth linking
/// (non-admin); never deleted or mutated by this library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Reference into the avatar store, if an avatar was ingested.
    pub avatar_id: Option<i64>,
    pub permission: Permission,
    pub created_at: DateTime<Utc>,
}

/// Permission flags attached to a user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Permission {
    pub admin: bool,
}

/// Durable association between an external identity and a local user.
///
/// The (provider, external_id) pair maps to at most one user; the store
/// enforces uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityLink {
    pub provider: String,
    pub external_id: String,
    pub user_id: UserId,
}

/// A verified external profile, as handed over by an OAuth callback or the
/// Steam login flow.
///
/// One tagged shape for every provider: the `provider` field names the
/// identity source, `external_id` is the provider's opaque identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthProfile {
    pub provider: String,
    pub external_id: String,
    /// Preferred display name; may be empty for some providers.
    pub nickname: String,
    /// Secondary display name, used when `nickname` is empty.
    pub name: String,
    pub avatar_url: Option<String>,
}

impl OAuthProfile {
    /// Username for a new account: the nickname, falling back to the name.
    pub fn username(&self) -> &str {
        if self.nickname.is_empty() {
            &self.name
        } else {
            &self.nickname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_prefers_nickname() {
        let profile = OAuthProfile {
            provider: "steam".to_string(),
            external_id: "1".to_string(),
            nickname: "Nick".to_string(),
            name: "Full Name".to_string(),
            avatar_url: None,
        };
        assert_eq!(profile.username(), "Nick");
    }

    #[test]
    fn test_username_falls_back_to_name() {
        let profile = OAuthProfile {
            provider: "google".to_string(),
            external_id: "2".to_string(),
            nickname: String::new(),
            name: "Full Name".to_string(),
            avatar_url: None,
        };
        assert_eq!(profile.username(), "Full Name");
    }
}
