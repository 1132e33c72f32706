//! Flashback cards and their streak counters
//!
//! This module provides:
//! - The `Flashback` record (question, answer, consecutive-correct `days`)
//! - `FlashbackStore`, the single owner of the persisted collection
//! - Review outcome handling (extend or reset a streak)

pub mod models;
pub mod store;

pub use models::*;
pub use store::{
    load, FlashbackError, FlashbackStore, OpenOptions, SharedFlashbackStore, DEFAULT_STORAGE_KEY,
    VALIDATION_MESSAGE,
};
