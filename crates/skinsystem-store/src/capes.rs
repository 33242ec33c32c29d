//! Filesystem-based cape storage.

use crate::config::FilesystemConfig;
use crate::keys::cape_file_name;
use async_trait::async_trait;
use skinsystem_core::ports::CapeRepository;
use skinsystem_core::{Cape, Error, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Reads raw cape images from `<base_path>/<lowercased username>.png`.
pub struct FilesystemCapeRepository {
    root_dir: PathBuf,
}

impl FilesystemCapeRepository {
    /// Create a repository. Fails when no base path is configured.
    pub fn new(config: &FilesystemConfig) -> Result<Self> {
        Ok(Self {
            root_dir: config.base_path()?.to_path_buf(),
        })
    }

    fn cape_path(&self, username: &str) -> PathBuf {
        self.root_dir.join(cape_file_name(username))
    }
}

#[async_trait]
impl CapeRepository for FilesystemCapeRepository {
    async fn find_by_username(&self, username: &str) -> Result<Cape> {
        if username.is_empty() {
            return Err(Error::CapeNotFound(String::new()));
        }

        let path = self.cape_path(username);
        debug!(path = %path.display(), "Reading cape");

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Cape::new(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::CapeNotFound(username.to_string()))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}
