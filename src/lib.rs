//! Flashback: question/answer cards with a streak counter
//!
//! `FlashbackStore` owns the collection and persists it as a single JSON
//! value in a `KeyValueStore`. The `flashback-cli` binary is a thin
//! presentation layer over it.

pub mod config;
pub mod flashbacks;
pub mod kv;

pub use config::Config;
pub use flashbacks::{Flashback, FlashbackError, FlashbackStore};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
