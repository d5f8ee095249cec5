//! Memory Storage - A bounded in-memory storage backend
//!
//! Provides capacity-limited key/value storage with per-object expiry, meant
//! to sit as the memory tier under a multi-tier cache.

pub mod config;
pub mod error;
pub mod storage;
pub mod tasks;

pub use config::MemoryConfig;
pub use error::{Result, StorageError};
pub use storage::{BoundedMemoryStore, Entry, Expiry, StorageAware};
pub use tasks::spawn_sweep_task;
