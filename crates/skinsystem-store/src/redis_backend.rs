//! Redis key-value backend.
//!
//! Connections are opened lazily and live for the lifetime of the backend.
//! With a pool size of one or less a single persistent connection is used;
//! larger pools hand out slots round-robin. Every slot is guarded by its own
//! mutex, so commands on one physical connection are serialized while
//! different slots run concurrently.

use crate::config::RedisConfig;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Cmd, FromRedisValue};
use skinsystem_core::ports::KeyValueBackend;
use skinsystem_core::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

type Slot = Mutex<Option<MultiplexedConnection>>;

enum Connections {
    Single(Slot),
    Pooled { slots: Vec<Slot>, next: AtomicUsize },
}

impl Connections {
    fn new(size: usize) -> Self {
        if size <= 1 {
            Connections::Single(Mutex::new(None))
        } else {
            Connections::Pooled {
                slots: (0..size).map(|_| Mutex::new(None)).collect(),
                next: AtomicUsize::new(0),
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Connections::Single(_) => 1,
            Connections::Pooled { slots, .. } => slots.len(),
        }
    }

    fn slot(&self) -> (usize, &Slot) {
        match self {
            Connections::Single(slot) => (0, slot),
            Connections::Pooled { slots, next } => {
                let index = next.fetch_add(1, Ordering::Relaxed) % slots.len();
                (index, &slots[index])
            }
        }
    }
}

/// Redis-backed [`KeyValueBackend`].
pub struct RedisBackend {
    client: redis::Client,
    connections: Connections,
}

impl RedisBackend {
    /// Create a backend. Fails fast on missing parameters; no connection is
    /// opened until the first command.
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let url = config.url()?;
        let client = redis::Client::open(url.as_str())
            .map_err(|e| Error::Backend(format!("Invalid Redis address {}: {}", url, e)))?;

        info!(url = %url, slots = config.slots(), "Creating Redis backend");

        Ok(Self {
            client,
            connections: Connections::new(config.slots()),
        })
    }

    /// Number of connection slots.
    pub fn pool_size(&self) -> usize {
        self.connections.len()
    }

    async fn query<T: FromRedisValue>(&self, cmd: &Cmd) -> Result<T> {
        let (index, slot) = self.connections.slot();
        let mut guard = slot.lock().await;

        if guard.is_none() {
            debug!(slot = index, "Opening Redis connection");
            let conn = self
                .client
                .get_multiplexed_async_connection()
                .await
                .map_err(|e| Error::Backend(format!("Failed to connect to Redis: {}", e)))?;
            *guard = Some(conn);
        }

        let Some(conn) = guard.as_mut() else {
            return Err(Error::Backend("Redis connection unavailable".to_string()));
        };

        let result = cmd.query_async(conn).await;
        if let Err(e) = &result
            && (e.is_io_error() || e.is_connection_dropped())
        {
            warn!(slot = index, error = %e, "Dropping broken Redis connection");
            *guard = None;
        }

        result.map_err(|e| Error::Backend(e.to_string()))
    }
}

#[async_trait]
impl KeyValueBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query(&cmd).await
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("HGET");
        cmd.arg(hash).arg(field);
        self.query(&cmd).await
    }

    async fn ping(&self) -> Result<()> {
        let _: String = self.query(&redis::cmd("PING")).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "redis"
    }
}
