//! The flashback repository
//!
//! The whole collection lives in memory and is persisted as one JSON array
//! under a single key:
//! ```text
//! flashbacks -> [{"id": "...", "question": "...", "answer": "...", "days": 0}, ...]
//! ```
//!
//! Every mutation builds the next collection on a copy, writes the full array
//! back to storage and only then replaces the in-memory list. A failed write
//! therefore leaves both memory and storage at their previous value.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use super::models::{is_valid_entry, Flashback, FlashbackStats};
use crate::kv::{KeyValueStore, KvError};

/// Key the collection is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "flashbacks";

/// Message shown when a question or answer is left blank
pub const VALIDATION_MESSAGE: &str = "Both question and answer fields must be filled out.";

#[derive(Error, Debug)]
pub enum FlashbackError {
    #[error("Invalid input: {}", VALIDATION_MESSAGE)]
    Validation,

    #[error("Failed to read flashbacks: {0}")]
    StorageRead(#[source] KvError),

    #[error("Failed to save flashbacks: {0}")]
    StorageWrite(#[source] KvError),

    #[error("Stored flashbacks could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode flashbacks: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Position {index} is out of range ({len} flashbacks)")]
    Index { index: usize, len: usize },

    #[error("Flashback not found: {0}")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, FlashbackError>;

/// A store shared between several owners; the mutex serializes mutations
pub type SharedFlashbackStore<S> = Arc<Mutex<FlashbackStore<S>>>;

/// Options for opening a store
#[derive(Debug, Clone)]
pub struct OpenOptions {
    pub key: String,
    /// Start empty (with a warning) instead of failing when the stored value is corrupt
    pub recover_corrupt: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            recover_corrupt: true,
        }
    }
}

/// Namespace for ids derived from lists written before records carried one
const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1d_2c8a_94b3_4e57_a0c2_5b7e_3d91_f04a);

/// Persisted record; `id` is absent in lists written by older versions
#[derive(Deserialize)]
struct StoredFlashback {
    #[serde(default)]
    id: Option<Uuid>,
    question: String,
    answer: String,
    days: u32,
}

impl StoredFlashback {
    fn into_flashback(self, index: usize) -> Flashback {
        let id = self.id.unwrap_or_else(|| {
            let name = format!("{}\n{}\n{}", index, self.question, self.answer);
            Uuid::new_v5(&LEGACY_ID_NAMESPACE, name.as_bytes())
        });
        Flashback {
            id,
            question: self.question,
            answer: self.answer,
            days: self.days,
        }
    }
}

/// Read and decode the collection stored under `key`
///
/// An absent or blank value is an empty collection. Records without an id get
/// one derived from their position and text, so the same stored list always
/// yields the same ids until it is rewritten.
pub async fn load<S: KeyValueStore + ?Sized>(kv: &S, key: &str) -> Result<Vec<Flashback>> {
    let content = kv.get(key).await.map_err(FlashbackError::StorageRead)?;
    match content {
        Some(content) if !content.trim().is_empty() => {
            let stored: Vec<StoredFlashback> =
                serde_json::from_str(&content).map_err(FlashbackError::Decode)?;
            Ok(stored
                .into_iter()
                .enumerate()
                .map(|(index, record)| record.into_flashback(index))
                .collect())
        }
        _ => Ok(Vec::new()),
    }
}

fn validate(question: &str, answer: &str) -> Result<()> {
    if is_valid_entry(question, answer) {
        Ok(())
    } else {
        Err(FlashbackError::Validation)
    }
}

/// Owner of the authoritative flashback list
pub struct FlashbackStore<S> {
    kv: S,
    key: String,
    flashbacks: Vec<Flashback>,
    snapshots: watch::Sender<Vec<Flashback>>,
}

impl<S: KeyValueStore> FlashbackStore<S> {
    /// Load the collection from `kv` and take ownership of it
    pub async fn open(kv: S, options: OpenOptions) -> Result<Self> {
        let flashbacks = match load(&kv, &options.key).await {
            Ok(flashbacks) => flashbacks,
            Err(FlashbackError::Decode(e)) if options.recover_corrupt => {
                log::warn!(
                    "Stored flashbacks under key {} are corrupt, starting empty: {}",
                    options.key,
                    e
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        log::info!(
            "Loaded {} flashbacks from key {}",
            flashbacks.len(),
            options.key
        );

        let (snapshots, _) = watch::channel(flashbacks.clone());
        Ok(Self {
            kv,
            key: options.key,
            flashbacks,
            snapshots,
        })
    }

    pub fn into_shared(self) -> SharedFlashbackStore<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // ==================== Reads ====================

    pub fn flashbacks(&self) -> &[Flashback] {
        &self.flashbacks
    }

    pub fn len(&self) -> usize {
        self.flashbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flashbacks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Flashback> {
        self.flashbacks.iter().find(|f| f.id == id)
    }

    pub fn get_at(&self, index: usize) -> Result<&Flashback> {
        self.flashbacks.get(index).ok_or(FlashbackError::Index {
            index,
            len: self.flashbacks.len(),
        })
    }

    /// Current position of a card, which shifts as earlier cards are removed
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.flashbacks.iter().position(|f| f.id == id)
    }

    pub fn stats(&self) -> FlashbackStats {
        FlashbackStats::from_flashbacks(&self.flashbacks)
    }

    /// Receive a snapshot of the collection after every successful mutation
    pub fn subscribe(&self) -> watch::Receiver<Vec<Flashback>> {
        self.snapshots.subscribe()
    }

    // ==================== Mutations ====================

    /// Append a new card with a zero streak
    pub async fn add(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<&[Flashback]> {
        let (question, answer) = (question.into(), answer.into());
        validate(&question, &answer)?;

        let mut next = self.flashbacks.clone();
        next.push(Flashback::new(question, answer));
        self.commit(next).await
    }

    /// Replace a card's question and answer and reset its streak
    pub async fn update(
        &mut self,
        id: Uuid,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<&[Flashback]> {
        let (question, answer) = (question.into(), answer.into());
        validate(&question, &answer)?;
        let pos = self.require(id)?;

        let mut next = self.flashbacks.clone();
        next[pos].edit(question, answer);
        self.commit(next).await
    }

    pub async fn update_at(
        &mut self,
        index: usize,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<&[Flashback]> {
        let id = self.get_at(index)?.id;
        self.update(id, question, answer).await
    }

    /// Delete a card; later cards move up one position
    pub async fn remove(&mut self, id: Uuid) -> Result<&[Flashback]> {
        let pos = self.require(id)?;

        let mut next = self.flashbacks.clone();
        next.remove(pos);
        self.commit(next).await
    }

    pub async fn remove_at(&mut self, index: usize) -> Result<&[Flashback]> {
        let id = self.get_at(index)?.id;
        self.remove(id).await
    }

    /// Apply a review outcome: a correct recall extends the streak, a miss resets it
    pub async fn record_review(&mut self, id: Uuid, was_correct: bool) -> Result<&[Flashback]> {
        let pos = self.require(id)?;

        let mut next = self.flashbacks.clone();
        next[pos].record_review(was_correct);
        self.commit(next).await
    }

    pub async fn record_review_at(
        &mut self,
        index: usize,
        was_correct: bool,
    ) -> Result<&[Flashback]> {
        let id = self.get_at(index)?.id;
        self.record_review(id, was_correct).await
    }

    fn require(&self, id: Uuid) -> Result<usize> {
        self.position(id).ok_or(FlashbackError::NotFound(id))
    }

    /// Persist `next` in full, then make it the current collection
    async fn commit(&mut self, next: Vec<Flashback>) -> Result<&[Flashback]> {
        let json = serde_json::to_string(&next).map_err(FlashbackError::Encode)?;

        if let Err(e) = self.kv.set(&self.key, json).await {
            log::error!("Failed to save flashbacks under key {}: {}", self.key, e);
            return Err(FlashbackError::StorageWrite(e));
        }

        log::debug!("Saved {} flashbacks under key {}", next.len(), self.key);
        self.flashbacks = next;
        self.snapshots.send_replace(self.flashbacks.clone());
        Ok(&self.flashbacks)
    }
}
