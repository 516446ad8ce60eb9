//! # Game Lobby
//!
//! Backend library for a game-lobby service: account identity, opaque
//! bearer tokens, third-party sign-in, and the storage contracts behind
//! them.
//!
//! Authorization resolves an opaque token to a [`auth::User`] through an
//! authenticated-encryption codec and the identity store. Third-party
//! sign-in verifies a Steam session ticket, fetches the player's profile,
//! and links the external identity to a local account exactly once.
//!
//! ## Core Modules
//!
//! - [`auth`]: Token codec, sentinel resolution, and the [`auth::AuthManager`]
//!   orchestration layer
//! - [`db`]: Connection pooling and the [`db::IdentityRepository`] storage
//!   contract
//! - [`steam`]: Steam Web API client (ticket verification, player summaries)
//! - [`avatar`]: Avatar download/storage contract used during sign-up
//!
//! ## Example
//!
//! ```no_run
//! use game_lobby::auth::AuthManager;
//! use game_lobby::avatar::HttpAvatarIngest;
//! use game_lobby::db::{Database, DatabaseConfig, PgIdentityRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let store = Arc::new(PgIdentityRepository::new(db.pool().clone()));
//!     let avatars = Arc::new(HttpAvatarIngest::new(db.pool().clone())?);
//!     let auth = AuthManager::new(store, avatars, b"token_secret_at_least_32_chars!!");
//!
//!     if let Some(token) = auth.bootstrap().await? {
//!         println!("initial admin token: {token}");
//!     }
//!     Ok(())
//! }
//! ```

/// Authentication: token codec, sentinels, and account orchestration.
pub mod auth;
pub use auth::{AuthError, AuthManager, AuthResult, TokenCodec, User, UserId};

/// Avatar ingestion contract and HTTP implementation.
pub mod avatar;

/// Database pooling and the identity storage contract.
pub mod db;

/// Steam Web API client.
pub mod steam;
pub use steam::{SteamClient, SteamConfig, SteamError};
