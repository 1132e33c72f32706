//! File-backed key-value storage
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! └── {key}.json    # One file per key, holding the raw value
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{validate_key, KeyValueStore, Result};

/// Key-value store that keeps each value in its own file
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the path for a key's file
    fn value_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", key))
    }
}

async fn write_and_rename(temp_path: &Path, path: &Path, value: String) -> std::io::Result<()> {
    fs::write(temp_path, value).await?;
    fs::rename(temp_path, path).await
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.value_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        validate_key(key)?;
        fs::create_dir_all(&self.base_path).await?;

        // Write next to the target and rename over it so readers never see a partial value
        let temp_path = self.temp_path(key);
        if let Err(e) = write_and_rename(&temp_path, &self.value_path(key), value).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    log::warn!("Failed to remove {:?}: {}", temp_path, cleanup);
                }
            }
            return Err(e.into());
        }

        log::debug!("Wrote key {} to {:?}", key, self.base_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvError;
    use tempfile::TempDir;

    fn create_test_store() -> (FileKeyValueStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("data"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("flashbacks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_file() {
        let (store, _temp) = create_test_store();

        store.set("flashbacks", "[]".to_string()).await.unwrap();

        let path = store.base_path().join("flashbacks.json");
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
        assert!(!store.base_path().join(".flashbacks.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let (store, _temp) = create_test_store();

        store.set("flashbacks", "first".to_string()).await.unwrap();
        store.set("flashbacks", "second".to_string()).await.unwrap();

        assert_eq!(
            store.get("flashbacks").await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (store, _temp) = create_test_store();

        store.set("a", "1".to_string()).await.unwrap();
        store.set("b", "2".to_string()).await.unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let (store, _temp) = create_test_store();

        let result = store.set("../escape", "x".to_string()).await;
        assert!(matches!(result, Err(KvError::InvalidKey(_))));

        let result = store.get("../escape").await;
        assert!(matches!(result, Err(KvError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_set_fails_when_base_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = FileKeyValueStore::new(blocker);
        let result = store.set("flashbacks", "[]".to_string()).await;
        assert!(matches!(result, Err(KvError::Io(_))));
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let (store, _temp) = create_test_store();

        // A directory where the value file should go makes the rename fail
        let target = store.base_path().join("flashbacks.json");
        std::fs::create_dir_all(target.join("occupied")).unwrap();

        let result = store.set("flashbacks", "[]".to_string()).await;
        assert!(matches!(result, Err(KvError::Io(_))));
        assert!(!store.base_path().join(".flashbacks.json.tmp").exists());
        assert!(target.is_dir());
    }
}
