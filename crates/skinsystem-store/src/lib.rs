//! Texture profile storage: compact record codec, zlib compression, key
//! layout, and the Redis and filesystem backends the repositories read from.

pub mod capes;
pub mod codec;
pub mod compression;
pub mod config;
pub mod keys;
pub mod memory;
pub mod redis_backend;
pub mod repository;

pub use capes::FilesystemCapeRepository;
pub use codec::{decode, encode};
pub use compression::{compress, decompress};
pub use self::config::{FilesystemConfig, RedisConfig, StorageSettings};
pub use keys::{ACCOUNT_ID_TO_USERNAME_KEY, build_username_key};
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
pub use repository::StoredProfileRepository;
