//! Storage Module
//!
//! Provides bounded in-memory storage with per-object expiry and a live key
//! index.

mod capsule;
mod container;
mod entry;
mod expiry;
mod key_index;
mod stats;
mod store;
mod traits;


// Re-export public types
pub use capsule::Capsule;
pub use container::{BoundedContainer, LruContainer};
pub use entry::Entry;
pub use expiry::Expiry;
pub use key_index::KeyIndex;
pub use stats::MemoryStats;
pub use store::BoundedMemoryStore;
pub use traits::StorageAware;
