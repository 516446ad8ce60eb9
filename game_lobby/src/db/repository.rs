//! Identity repository: the storage contract behind the auth layer.
//!
//! Trait-based abstraction over durable identity storage, enabling testing
//! through mock implementations and dependency injection. The two write
//! operations carry the atomicity the auth layer relies on:
//!
//! - `create_first_admin` creates the admin only when the user table is
//!   empty, serialized across concurrent cold starts.
//! - `create_linked_user` writes the user row and its identity link in one
//!   transaction, so no other caller ever observes an unlinked user.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::auth::{AuthError, AuthResult, IdentityLink, Permission, User, UserId};

/// Advisory lock key serializing first-run bootstrap across processes.
const BOOTSTRAP_LOCK_KEY: i64 = 0x6c6f_6262_79;

/// Trait for identity storage operations
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Count user records
    async fn count_users(&self) -> AuthResult<i64>;

    /// Create the initial admin user, only if no users exist yet.
    ///
    /// Returns `None` when the store already holds users. Must behave
    /// atomically under concurrent callers: exactly one caller ever
    /// observes `Some`.
    async fn create_first_admin(&self, username: &str) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_user_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Create a user together with its external identity link, atomically.
    ///
    /// # Errors
    ///
    /// * `AuthError::IdentityTaken` - the (provider, external_id) pair is
    ///   already linked
    async fn create_linked_user(
        &self,
        username: &str,
        avatar_id: Option<i64>,
        provider: &str,
        external_id: &str,
    ) -> AuthResult<User>;

    /// Find the identity link for an external identity
    async fn find_link(
        &self,
        provider: &str,
        external_id: &str,
    ) -> AuthResult<Option<IdentityLink>>;
}

/// Default PostgreSQL implementation of `IdentityRepository`
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, username, avatar_id, is_admin, created_at";

fn row_to_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        avatar_id: row.get("avatar_id"),
        permission: Permission {
            admin: row.get("is_admin"),
        },
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

fn map_link_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::IdentityTaken,
        _ => AuthError::Database(err),
    }
}

#[async_trait]
impl IdentityRepository for PgIdentityRepository {
    async fn count_users(&self) -> AuthResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    async fn create_first_admin(&self, username: &str) -> AuthResult<Option<User>> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent cold starts; the lock is released at commit.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&mut *tx)
            .await?
            .get("count");
        if count > 0 {
            tx.commit().await?;
            return Ok(None);
        }

        let row = sqlx::query(&format!(
            "INSERT INTO users (username, is_admin) VALUES ($1, TRUE) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Some(row_to_user(&row)))
    }

    async fn find_user_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn create_linked_user(
        &self,
        username: &str,
        avatar_id: Option<i64>,
        provider: &str,
        external_id: &str,
    ) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "INSERT INTO users (username, avatar_id) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(avatar_id)
        .fetch_one(&mut *tx)
        .await?;
        let user = row_to_user(&row);

        sqlx::query(
            "INSERT INTO oauth_identities (provider, external_id, user_id) VALUES ($1, $2, $3)",
        )
        .bind(provider)
        .bind(external_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(map_link_error)?;

        tx.commit().await?;
        Ok(user)
    }

    async fn find_link(
        &self,
        provider: &str,
        external_id: &str,
    ) -> AuthResult<Option<IdentityLink>> {
        let row = sqlx::query(
            "SELECT provider, external_id, user_id FROM oauth_identities
             WHERE provider = $1 AND external_id = $2",
        )
        .bind(provider)
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| IdentityLink {
            provider: r.get("provider"),
            external_id: r.get("external_id"),
            user_id: r.get("user_id"),
        }))
    }
}
