//! Key-value storage backends
//!
//! The flashback store persists its whole list as one string value under a
//! single key. Anything that can `get` and `set` strings by key can back it:
//! - `FileKeyValueStore` keeps one JSON file per key under a data directory
//! - `MemoryKeyValueStore` keeps values in a map (tests, ephemeral sessions)

mod file_store;
mod memory_store;

use async_trait::async_trait;
use thiserror::Error;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;

#[derive(Error, Debug)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, KvError>;

/// Asynchronous string-valued key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if the key was never set
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Keys become file names, so only a conservative character set is allowed
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}
