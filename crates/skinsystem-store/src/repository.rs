//! Profile repository on top of a key-value backend.
//!
//! Records live under `username:<lowercased username>` as
//! `compress(encode(profile))`. Id lookups resolve the username through the
//! account id hash first and then follow the username path.
//!
//! A record whose bytes are present but fail to decompress or decode is
//! reported as [`Error::Compression`] or [`Error::Decode`]; it is never turned
//! into an empty profile or a miss.

use crate::codec;
use crate::compression;
use crate::keys::{ACCOUNT_ID_TO_USERNAME_KEY, account_id_field, build_username_key};
use async_trait::async_trait;
use skinsystem_core::ports::{KeyValueBackend, ProfileRepository};
use skinsystem_core::{Error, Result, TextureProfile};
use std::sync::Arc;
use tracing::debug;

/// [`ProfileRepository`] reading compressed records from any [`KeyValueBackend`].
#[derive(Clone)]
pub struct StoredProfileRepository {
    backend: Arc<dyn KeyValueBackend>,
}

impl StoredProfileRepository {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Serialize a profile into the stored form.
    pub fn to_stored(profile: &TextureProfile) -> Result<Vec<u8>> {
        compression::compress(&codec::encode(profile)?)
    }

    /// Parse a profile from the stored form.
    pub fn from_stored(data: &[u8]) -> Result<TextureProfile> {
        codec::decode(&compression::decompress(data)?)
    }
}

#[async_trait]
impl ProfileRepository for StoredProfileRepository {
    async fn find_by_username(&self, username: &str) -> Result<TextureProfile> {
        if username.is_empty() {
            return Err(Error::ProfileNotFound(String::new()));
        }

        let key = build_username_key(username);
        debug!(backend = self.backend.name(), key = %key, "Looking up profile");

        match self.backend.get(&key).await? {
            Some(data) if !data.is_empty() => Self::from_stored(&data),
            _ => Err(Error::ProfileNotFound(username.to_string())),
        }
    }

    async fn find_by_user_id(&self, id: i64) -> Result<TextureProfile> {
        let field = account_id_field(id);
        debug!(backend = self.backend.name(), id, "Resolving username for account id");

        let username = match self
            .backend
            .hget(ACCOUNT_ID_TO_USERNAME_KEY, &field)
            .await?
        {
            Some(data) if !data.is_empty() => String::from_utf8(data).map_err(|e| {
                Error::Decode(format!("Invalid username for account id {}: {}", id, e))
            })?,
            _ => return Err(Error::ProfileNotFound(format!("account id {}", id))),
        };

        self.find_by_username(&username).await
    }

    async fn ping(&self) -> Result<()> {
        self.backend.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use skinsystem_core::SLIM_MODEL;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that counts calls and always fails.
    #[derive(Default)]
    struct FailingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl KeyValueBackend for FailingBackend {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Backend("connection refused".to_string()))
        }

        async fn hget(&self, _hash: &str, _field: &str) -> Result<Option<Vec<u8>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Backend("connection refused".to_string()))
        }

        async fn ping(&self) -> Result<()> {
            Err(Error::Backend("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn notch() -> TextureProfile {
        TextureProfile::new("", "notch").with_skin("http://x/skin.png", SLIM_MODEL)
    }

    fn seeded() -> (Arc<MemoryBackend>, StoredProfileRepository) {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(
            "username:notch",
            StoredProfileRepository::to_stored(&notch()).unwrap(),
        );
        let repository = StoredProfileRepository::new(backend.clone());
        (backend, repository)
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let (_, repository) = seeded();

        let profile = repository.find_by_username("Notch").await.unwrap();
        assert_eq!(profile.username, "notch");
        assert_eq!(profile.skin_url, "http://x/skin.png");
        assert_eq!(profile.skin_model, "slim");
        assert_eq!(profile.previous_username, "notch");
    }

    #[tokio::test]
    async fn test_find_by_username_missing() {
        let (_, repository) = seeded();

        let err = repository.find_by_username("jeb").await.unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(ref name) if name == "jeb"));
    }

    #[tokio::test]
    async fn test_find_by_username_empty_value_is_missing() {
        let (backend, repository) = seeded();
        backend.set("username:jeb", Vec::new());

        let err = repository.find_by_username("jeb").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_username_skips_backend() {
        let backend = Arc::new(FailingBackend::default());
        let repository = StoredProfileRepository::new(backend.clone());

        let err = repository.find_by_username("").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let backend = Arc::new(FailingBackend::default());
        let repository = StoredProfileRepository::new(backend.clone());

        let err = repository.find_by_username("notch").await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

        let err = repository.find_by_user_id(42).await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));

        assert!(repository.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_compression_propagates() {
        let (backend, repository) = seeded();
        backend.set("username:broken", b"not zlib".to_vec());

        let err = repository.find_by_username("broken").await.unwrap_err();
        assert!(matches!(err, Error::Compression(_)));
    }

    #[tokio::test]
    async fn test_corrupt_record_propagates() {
        let (backend, repository) = seeded();
        backend.set(
            "username:broken",
            compression::compress(b"this is not json").unwrap(),
        );

        let err = repository.find_by_username("broken").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_find_by_user_id() {
        let (backend, repository) = seeded();
        backend.hset(ACCOUNT_ID_TO_USERNAME_KEY, "42", "Notch");

        let profile = repository.find_by_user_id(42).await.unwrap();
        assert_eq!(profile.username, "notch");
        assert_eq!(profile.skin_model, "slim");
    }

    #[tokio::test]
    async fn test_find_by_user_id_missing_index() {
        let (_, repository) = seeded();

        let err = repository.find_by_user_id(42).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_user_id_missing_record() {
        let (backend, repository) = seeded();
        backend.hset(ACCOUNT_ID_TO_USERNAME_KEY, "7", "jeb");

        let err = repository.find_by_user_id(7).await.unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(ref name) if name == "jeb"));
    }

    #[tokio::test]
    async fn test_find_by_user_id_invalid_username() {
        let (backend, repository) = seeded();
        backend.hset(ACCOUNT_ID_TO_USERNAME_KEY, "9", vec![0xff, 0xfe]);

        let err = repository.find_by_user_id(9).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_ping() {
        let (_, repository) = seeded();
        assert!(repository.ping().await.is_ok());
    }

    #[test]
    fn test_stored_roundtrip() {
        let profile = notch().with_cape("http://x/cape.png");
        let stored = StoredProfileRepository::to_stored(&profile).unwrap();
        let decoded = StoredProfileRepository::from_stored(&stored).unwrap();
        assert_eq!(decoded.cape_url, "http://x/cape.png");
        assert_eq!(decoded.username, profile.username);
    }
}
