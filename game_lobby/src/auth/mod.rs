//! Authentication module: opaque bearer tokens and account identity.
//!
//! This module implements the lobby's authorization core:
//! - AES-256-GCM token codec (confidentiality + integrity over the user id)
//! - Sentinel tokens resolving to fixed test identities
//! - First-run administrator bootstrap
//! - Linking local accounts to external (OAuth / Steam) identities
//!
//! ## Example
//!
//! ```no_run
//! use game_lobby::auth::{AuthManager, OAuthProfile};
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
//!     let profile = OAuthProfile {
//!         provider: "steam".to_string(),
//!         external_id: "76561197960287930".to_string(),
//!         nickname: "Player One".to_string(),
//!         name: "player1".to_string(),
//!         avatar_url: None,
//!     };
//!     let user = auth.create_user_by_oauth(profile).await?;
//!     let token = auth.create_token(user.id)?;
//!     assert_eq!(auth.authorize(&token).await?.id, user.id);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod sentinel;
pub mod token;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{IdentityLink, OAuthProfile, Permission, User, UserId};
pub use sentinel::SentinelResolver;
pub use token::{TokenCodec, TokenError};
