//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the lookup layer and the
//! storage adapters behind it.

use crate::Result;
use crate::profile::{Cape, TextureProfile};
use async_trait::async_trait;

/// Minimal key-value surface the repositories are built on.
///
/// Any store answering `GET` and `HGET` with a byte string or an absent
/// marker can back the profile repository.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// `GET key`. `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// `HGET hash field`. `None` when the hash or field is absent.
    async fn hget(&self, hash: &str, field: &str) -> Result<Option<Vec<u8>>>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Read access to texture profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by username (case-insensitive).
    ///
    /// Misses are reported as [`crate::Error::ProfileNotFound`].
    async fn find_by_username(&self, username: &str) -> Result<TextureProfile>;

    /// Find a profile by numeric account id through the id index.
    async fn find_by_user_id(&self, id: i64) -> Result<TextureProfile>;

    /// Check the underlying storage is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Read access to cape images.
#[async_trait]
pub trait CapeRepository: Send + Sync {
    /// Find a cape by username (case-insensitive).
    ///
    /// Misses are reported as [`crate::Error::CapeNotFound`].
    async fn find_by_username(&self, username: &str) -> Result<Cape>;
}
