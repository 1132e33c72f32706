use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use flashback_lib::config::Config;
use flashback_lib::flashbacks::{Flashback, FlashbackStore};
use flashback_lib::kv::FileKeyValueStore;

/// Shared application state for CLI commands
pub struct App {
    pub store: FlashbackStore<FileKeyValueStore>,
}

impl App {
    /// Load config and open the flashback store it points at
    pub async fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path).context("Failed to load config")?;

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => config
                .resolve_data_dir()
                .context("Failed to get data directory")?,
        };

        let store = FlashbackStore::open(FileKeyValueStore::new(data_dir), config.open_options())
            .await
            .context("Failed to open flashbacks")?;

        Ok(Self { store })
    }

    pub fn data_dir(&self) -> &Path {
        self.store.kv().base_path()
    }

    pub fn flashbacks(&self) -> &[Flashback] {
        self.store.flashbacks()
    }

    /// Find a flashback by 1-based position or by id (exact match, then unique prefix)
    pub fn find(&self, target: &str) -> Result<Flashback> {
        let flashbacks = self.flashbacks();
        let target = target.trim();

        if let Ok(position) = target.parse::<usize>() {
            if position == 0 || position > flashbacks.len() {
                bail!(
                    "No flashback at position {} ({} flashbacks)",
                    position,
                    flashbacks.len()
                );
            }
            return Ok(flashbacks[position - 1].clone());
        }

        let needle = target.to_lowercase().replace('-', "");
        if needle.is_empty() {
            bail!("Empty flashback id");
        }

        // Exact match first
        if let Some(card) = flashbacks.iter().find(|f| f.id.simple().to_string() == needle) {
            return Ok(card.clone());
        }

        // Prefix match
        let matches: Vec<&Flashback> = flashbacks
            .iter()
            .filter(|f| f.id.simple().to_string().starts_with(&needle))
            .collect();

        match matches.len() {
            0 => bail!("No flashback matching '{}'", target),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous flashback id '{}'. Matches:\n{}",
                target,
                matches
                    .iter()
                    .map(|f| format!("  - {} {}", f.short_id(), f.question))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use flashback_lib::flashbacks::OpenOptions;
    use tempfile::TempDir;

    /// App over a fresh temporary data directory, pre-filled with `cards`
    pub async fn app_with(cards: &[(&str, &str)]) -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let kv = FileKeyValueStore::new(temp_dir.path().to_path_buf());
        let mut store = FlashbackStore::open(kv, OpenOptions::default()).await.unwrap();
        for (q, a) in cards {
            store.add(*q, *a).await.unwrap();
        }
        (App { store }, temp_dir)
    }

    /// App over a data directory whose stored list is `json`
    pub async fn app_from_json(json: &str) -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("flashbacks.json"), json).unwrap();
        let kv = FileKeyValueStore::new(temp_dir.path().to_path_buf());
        let store = FlashbackStore::open(kv, OpenOptions::default()).await.unwrap();
        (App { store }, temp_dir)
    }
}
