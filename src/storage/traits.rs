//! Storage Backend Trait
//!
//! The narrow interface a multi-tier coordinator uses to drive one backend.

use crate::error::Result;
use crate::storage::{Entry, Expiry};

// == Storage Aware ==
/// Operations every storage backend offers to the tier above it.
pub trait StorageAware<K, V> {
    /// Looks up the entry for `key`, expired or not.
    fn entry(&self, key: &K) -> Result<Entry<V>>;

    /// Removes `key`. Absent keys are a no-op.
    fn remove_object(&self, key: &K);

    /// Stores `object` under `key`. `None` uses the backend's default expiry.
    fn set_object(&self, object: V, key: K, expiry: Option<Expiry>);

    fn remove_all(&self);

    /// Purges every expired object, returning how many were removed.
    fn remove_expired(&self) -> usize;

    // == Provided ==
    /// Looks up only the value for `key`.
    fn object(&self, key: &K) -> Result<V> {
        self.entry(key).map(|entry| entry.object)
    }

    /// Returns true if `key` resolves to an object of this backend's type.
    fn exists_object(&self, key: &K) -> bool {
        self.entry(key).is_ok()
    }

    /// Checks whether the object stored under `key` has expired.
    fn is_expired_object(&self, key: &K) -> Result<bool> {
        self.entry(key).map(|entry| entry.expiry.is_expired())
    }
}
