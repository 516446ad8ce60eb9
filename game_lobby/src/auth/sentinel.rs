//! Sentinel token resolution.
//!
//! Two reserved literal tokens bypass the codec and the store entirely and
//! resolve to fixed identities. They exist so operators and end-to-end
//! tests can authenticate a pair of well-known accounts without minting
//! real tokens, and they are checked before any decoding so their behavior
//! never depends on the configured secret or on store contents.
//!
//! The resolver is an explicit capability handed to
//! [`AuthManager`](super::AuthManager): deployments that do not want the
//! backdoor construct the manager with [`SentinelResolver::disabled`].

use chrono::Utc;

use super::models::{Permission, User};

/// Reserved token resolving to the fixed user id 101.
pub const SENTINEL_BLACK: &str = "black";

/// Reserved token resolving to the fixed user id 201.
pub const SENTINEL_WHITE: &str = "white";

/// Maps reserved token literals to fixed users.
#[derive(Debug, Clone)]
pub struct SentinelResolver {
    entries: Vec<(&'static str, User)>,
}

impl SentinelResolver {
    /// The built-in pair: `"black"` -> user 101, `"white"` -> user 201.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                (SENTINEL_BLACK, Self::fixed_user(101, "흑우")),
                (SENTINEL_WHITE, Self::fixed_user(201, "백우")),
            ],
        }
    }

    /// A resolver that matches nothing; every token goes through the codec.
    pub fn disabled() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Resolve a sentinel token, if it is one.
    pub fn resolve(&self, token: &str) -> Option<User> {
        self.entries
            .iter()
            .find(|(literal, _)| *literal == token)
            .map(|(_, user)| user.clone())
    }

    fn fixed_user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            avatar_id: None,
            permission: Permission::default(),
            created_at: Utc::now(),
        }
    }
}

impl Default for SentinelResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sentinels() {
        let resolver = SentinelResolver::builtin();
        let black = resolver.resolve("black").expect("black is reserved");
        assert_eq!(black.id, 101);
        assert_eq!(black.username, "흑우");
        assert!(!black.permission.admin);

        let white = resolver.resolve("white").expect("white is reserved");
        assert_eq!(white.id, 201);
        assert_eq!(white.username, "백우");
    }

    #[test]
    fn test_non_sentinel_tokens_pass_through() {
        let resolver = SentinelResolver::builtin();
        assert!(resolver.resolve("Black").is_none());
        assert!(resolver.resolve("blackk").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn test_disabled_resolver_matches_nothing() {
        let resolver = SentinelResolver::disabled();
        assert!(resolver.resolve("black").is_none());
        assert!(resolver.resolve("white").is_none());
    }
}
