//! Avatar ingestion: download an image by URL and persist it.
//!
//! Sign-up treats avatars as best-effort decoration, so implementations
//! report failures and the caller decides whether they are fatal (they are
//! not, on the OAuth path).

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Download timeout for a single avatar fetch.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on accepted image size.
const MAX_AVATAR_BYTES: usize = 4 * 1024 * 1024;

/// Avatar ingestion errors
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Network-level download failure
    #[error("Avatar download failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The image host answered with a non-success status
    #[error("Avatar download failed: http status {0}")]
    Status(u16),

    /// The image exceeds the accepted size
    #[error("Avatar too large: {0} bytes")]
    TooLarge(usize),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for avatar operations
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Contract for fetching and persisting avatar images.
#[async_trait]
pub trait AvatarIngest: Send + Sync {
    /// Download the image behind `url`.
    async fn fetch(&self, url: &str) -> AvatarResult<Vec<u8>>;

    /// Persist image bytes, returning the stored avatar's id.
    async fn store(&self, image: Vec<u8>) -> AvatarResult<i64>;
}

/// Default implementation: HTTP download, PostgreSQL storage.
pub struct HttpAvatarIngest {
    http: reqwest::Client,
    pool: PgPool,
}

impl HttpAvatarIngest {
    pub fn new(pool: PgPool) -> AvatarResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        Ok(Self { http, pool })
    }
}

#[async_trait]
impl AvatarIngest for HttpAvatarIngest {
    async fn fetch(&self, url: &str) -> AvatarResult<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AvatarError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(AvatarError::TooLarge(bytes.len()));
        }
        Ok(bytes.to_vec())
    }

    async fn store(&self, image: Vec<u8>) -> AvatarResult<i64> {
        let row = sqlx::query("INSERT INTO avatars (data) VALUES ($1) RETURNING id")
            .bind(&image)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("id"))
    }
}
