//! Configuration file handling
//!
//! Read from `~/.config/flashback/config.toml` (platform equivalent) unless a
//! path is given explicitly. Every field is optional:
//! ```toml
//! data_dir = "/home/me/flashbacks"
//! storage_key = "flashbacks"
//! recover_corrupt = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashbacks::{OpenOptions, DEFAULT_STORAGE_KEY};
use crate::kv::validate_key;

const APP_DIR: &str = "flashback";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid storage key {0:?}: use letters, digits, '_' or '-'")]
    InvalidStorageKey(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the key-value files live (default: platform data dir + "flashback")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Key the flashback list is stored under
    pub storage_key: String,
    /// Start with an empty list when the stored list cannot be decoded
    pub recover_corrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            recover_corrupt: true,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried and a missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validate_key(&self.storage_key)
            .map_err(|_| ConfigError::InvalidStorageKey(self.storage_key.clone()))
    }

    /// Configured data directory, falling back to the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(expand_home_dir(dir)),
            None => default_data_dir(),
        }
    }

    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            key: self.storage_key.clone(),
            recover_corrupt: self.recover_corrupt,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR))
        .ok_or(ConfigError::DataDirNotFound)
}

/// Expand a leading `~` to the home directory
fn expand_home_dir(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage_key, "flashbacks");
        assert!(config.recover_corrupt);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            "data_dir = \"/tmp/cards\"\nstorage_key = \"spanish\"\nrecover_corrupt = false\n",
        );

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/cards")));
        assert_eq!(config.storage_key, "spanish");
        assert!(!config.recover_corrupt);

        let options = config.open_options();
        assert_eq!(options.key, "spanish");
        assert!(!options.recover_corrupt);
        assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/tmp/cards"));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "recover_corrupt = false\n");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.storage_key, "flashbacks");
        assert!(config.data_dir.is_none());
        assert!(!config.recover_corrupt);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(temp.path().join("missing.toml").as_path()));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "storage_key = [");
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_storage_key() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "storage_key = \"../other\"");
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(ConfigError::InvalidStorageKey(_))
        ));
    }

    #[test]
    fn test_expand_home_dir() {
        let expanded = expand_home_dir(Path::new("~/cards"));
        assert!(expanded.ends_with("cards"));
        assert!(!expanded.starts_with("~"));

        assert_eq!(expand_home_dir(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        assert_eq!(expand_home_dir(Path::new("rel/path")), PathBuf::from("rel/path"));
    }
}
