//! Authentication manager implementation.

use std::sync::Arc;

use super::errors::{AuthError, AuthResult};
use super::models::{OAuthProfile, User, UserId};
use super::sentinel::SentinelResolver;
use super::token::TokenCodec;
use crate::avatar::AvatarIngest;
use crate::db::IdentityRepository;

/// Username assigned to the first-run administrator.
const ADMIN_USERNAME: &str = "admin";

/// Authentication manager
///
/// Orchestrates the token codec, the identity store, and avatar ingestion.
/// All configuration is passed at construction and held read-only, so one
/// instance is shared across concurrent requests.
#[derive(Clone)]
pub struct AuthManager {
    store: Arc<dyn IdentityRepository>,
    avatars: Arc<dyn AvatarIngest>,
    codec: TokenCodec,
    sentinels: SentinelResolver,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `store` - Identity storage backend
    /// * `avatars` - Avatar ingestion backend
    /// * `secret` - Shared secret keying the token codec
    pub fn new(
        store: Arc<dyn IdentityRepository>,
        avatars: Arc<dyn AvatarIngest>,
        secret: &[u8],
    ) -> Self {
        Self {
            store,
            avatars,
            codec: TokenCodec::new(secret),
            sentinels: SentinelResolver::default(),
        }
    }

    /// Replace the sentinel resolver (e.g. [`SentinelResolver::disabled`]).
    pub fn with_sentinels(mut self, sentinels: SentinelResolver) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// First-run bootstrap: create the initial administrator account.
    ///
    /// When the store holds no users, creates exactly one admin user and
    /// returns a token for it (also logged, so an operator can sign in).
    /// Safe to call on every process start; with users present this is a
    /// no-op returning `None`. Concurrent cold starts are serialized by the
    /// store's atomic create-if-empty.
    ///
    /// # Errors
    ///
    /// * `AuthError::Codec` - token issuance failed; the caller must treat
    ///   this as fatal and abort startup
    pub async fn bootstrap(&self) -> AuthResult<Option<String>> {
        match self.store.create_first_admin(ADMIN_USERNAME).await? {
            Some(admin) => {
                let token = self.create_token(admin.id)?;
                log::info!(
                    "Created initial admin user {} (id {}), token: {}",
                    admin.username,
                    admin.id,
                    token
                );
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }

    /// Fetch a user by id
    ///
    /// # Errors
    ///
    /// * `AuthError::NotFound` - no such user
    pub async fn get_user(&self, id: UserId) -> AuthResult<User> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Issue a token for a user id.
    ///
    /// # Errors
    ///
    /// * `AuthError::Codec` - the encryption primitive failed; issuance
    ///   never silently returns an unusable token
    pub fn create_token(&self, id: UserId) -> AuthResult<String> {
        self.codec
            .encode(&id.to_string())
            .map_err(AuthError::Codec)
    }

    /// Recover the user id carried by a token.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidToken` - decode failure (tamper, corruption,
    ///   wrong secret) or a non-integer payload
    pub fn parse_token(&self, token: &str) -> AuthResult<UserId> {
        let payload = self
            .codec
            .decode(token)
            .map_err(|_| AuthError::InvalidToken)?;
        payload.parse().map_err(|_| AuthError::InvalidToken)
    }

    /// Resolve a bearer token to a user.
    ///
    /// Sentinel tokens resolve to their fixed identities before any
    /// decoding; everything else is parsed and looked up in the store.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidToken` - the token did not decode to a user id
    /// * `AuthError::NotFound` - the id decoded but no such user exists
    pub async fn authorize(&self, token: &str) -> AuthResult<User> {
        if let Some(user) = self.sentinels.resolve(token) {
            return Ok(user);
        }

        let id = self.parse_token(token)?;
        self.get_user(id).await
    }

    /// Create a local account for a verified external profile.
    ///
    /// The username comes from the profile (nickname, falling back to
    /// name). An avatar URL is ingested best-effort: a download or storage
    /// failure is logged and the account is created without an avatar. The
    /// user row and identity link are written atomically by the store.
    ///
    /// # Errors
    ///
    /// * `AuthError::IdentityTaken` - this external identity is already
    ///   linked to a user
    pub async fn create_user_by_oauth(&self, profile: OAuthProfile) -> AuthResult<User> {
        let avatar_id = match &profile.avatar_url {
            Some(url) => match self.ingest_avatar(url).await {
                Ok(id) => Some(id),
                Err(e) => {
                    log::error!("Failed to ingest avatar from {url}: {e}");
                    None
                }
            },
            None => None,
        };

        self.store
            .create_linked_user(
                profile.username(),
                avatar_id,
                &profile.provider,
                &profile.external_id,
            )
            .await
    }

    /// Resolve an external identity to its linked user.
    ///
    /// This is the re-authentication path; callers try it first and fall
    /// back to [`Self::create_user_by_oauth`] on `NotFound`.
    ///
    /// # Errors
    ///
    /// * `AuthError::NotFound` - no link exists for this identity
    pub async fn get_user_by_oauth(&self, provider: &str, external_id: &str) -> AuthResult<User> {
        let link = self
            .store
            .find_link(provider, external_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        self.get_user(link.user_id).await
    }

    async fn ingest_avatar(&self, url: &str) -> Result<i64, crate::avatar::AvatarError> {
        let image = self.avatars.fetch(url).await?;
        self.avatars.store(image).await
    }
}
