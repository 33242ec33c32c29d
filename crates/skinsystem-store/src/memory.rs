//! In-process key-value backend for development and tests.

use async_trait::async_trait;
use skinsystem_core::Result;
use skinsystem_core::ports::KeyValueBackend;
use std::collections::HashMap;
use std::sync::RwLock;

/// `HashMap`-backed store answering `GET` and `HGET`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RwLock<HashMap<String, Vec<u8>>>,
    hashes: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `SET key value`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value.into());
    }

    /// `HSET hash field value`.
    pub fn hset(
        &self,
        hash: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) {
        self.hashes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(hash.into())
            .or_default()
            .insert(field.into(), value.into());
    }

    /// Number of plain keys stored.
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<Vec<u8>>> {
        let hashes = self.hashes.read().unwrap_or_else(|e| e.into_inner());
        Ok(hashes.get(hash).and_then(|h| h.get(field)).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
