//! Memory Store Module
//!
//! Bounded in-memory storage combining a capacity-limited container with a
//! key index and per-object expiry.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::config::MemoryConfig;
use crate::error::{Result, StorageError};
use crate::storage::{
    BoundedContainer, Capsule, Entry, Expiry, KeyIndex, LruContainer, MemoryStats, StorageAware,
};

// == Bounded Memory Store ==
/// In-memory storage backend with bounded capacity and expiry.
///
/// The container may evict capsules on its own under capacity pressure
/// without telling the store, so the key index can list keys that no longer
/// resolve. `all_objects` skips those keys and `entry` reports `NotFound`.
///
/// Reads never purge expired objects. Use `remove_object_if_expired` or
/// `remove_expired` for that.
pub struct BoundedMemoryStore<K, V> {
    /// Capsule storage with its own eviction policy
    container: Arc<dyn BoundedContainer<K>>,
    /// Keys believed live
    keys: KeyIndex<K>,
    config: MemoryConfig,
    _value: PhantomData<fn() -> V>,
}

impl<K, V> BoundedMemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty store backed by an LRU container with the configured
    /// count and cost limits.
    pub fn new(config: MemoryConfig) -> Self {
        let container = LruContainer::<K>::new(config.count_limit, config.total_cost_limit);
        Self::with_container(config, Arc::new(container))
    }

    /// Creates an empty key index over a caller-supplied container.
    ///
    /// The container may be shared with other stores, including stores of a
    /// different value type. Reads of a capsule stored by such a store fail
    /// with `TypeMismatch`.
    pub fn with_container(config: MemoryConfig, container: Arc<dyn BoundedContainer<K>>) -> Self {
        Self {
            container,
            keys: KeyIndex::new(),
            config,
            _value: PhantomData,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    // == Enumeration ==
    /// Returns a snapshot of the key index, in no particular order.
    ///
    /// Keys evicted by the container may still be listed.
    pub fn all_keys(&self) -> Vec<K> {
        self.keys.snapshot()
    }

    /// Returns the values of every key in `all_keys` that still resolves.
    ///
    /// Listing does not count as a use: eviction priority is left as is.
    /// Best effort: concurrent mutation may yield a mix that never existed at
    /// a single instant.
    pub fn all_objects(&self) -> Vec<V> {
        self.all_keys()
            .iter()
            .filter_map(|key| self.container.peek(key))
            .filter_map(|capsule| capsule.object::<V>().cloned())
            .collect()
    }

    // == Set ==
    /// Stores `object` under `key`, overwriting any previous object.
    ///
    /// Inserting can make the container evict other keys.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `object` - The value to store
    /// * `expiry` - When the value becomes stale
    /// * `cost` - Weight counted against the total cost limit
    pub fn set(&self, key: K, object: V, expiry: Expiry, cost: u64) {
        self.container.insert(key.clone(), Capsule::new(object, expiry, cost));
        self.keys.insert(key);
        debug!(cost, "stored object in memory");
    }

    // == Entry ==
    /// Looks up the entry for `key`.
    ///
    /// Expired entries are returned as-is; check `Entry::expiry` to decide
    /// whether the value is still usable.
    pub fn entry(&self, key: &K) -> Result<Entry<V>> {
        let capsule = self.container.get(key).ok_or(StorageError::NotFound)?;
        let object = capsule.object::<V>().ok_or(StorageError::TypeMismatch)?;
        Ok(Entry::new(object.clone(), capsule.expiry()))
    }

    // == Remove ==
    /// Removes `key` from the container and the index. Absent keys are a no-op.
    pub fn remove_object(&self, key: &K) {
        let removed = self.container.remove(key).is_some();
        self.keys.remove(key);
        debug!(removed, "removed object from memory");
    }

    /// Same as `remove_object`, for callers expecting a fallible removal.
    pub fn remove_in_memory_object(&self, key: &K) -> Result<()> {
        self.remove_object(key);
        Ok(())
    }

    /// Clears the container and the index.
    pub fn remove_all(&self) {
        self.container.clear();
        self.keys.clear();
        debug!("cleared memory storage");
    }

    // == Expiry Purge ==
    /// Removes `key` only if it holds an expired object.
    ///
    /// Returns true if an object was removed. The check does not refresh the
    /// key's eviction priority.
    pub fn remove_object_if_expired(&self, key: &K) -> bool {
        match self.container.peek(key) {
            Some(capsule) if capsule.is_expired() => {
                self.remove_object(key);
                true
            }
            _ => false,
        }
    }

    /// Removes every expired object listed in the key index.
    ///
    /// Works on a snapshot of the index; keys added during the sweep may be
    /// skipped until the next one. Returns the number of objects removed.
    pub fn remove_expired(&self) -> usize {
        let mut removed = 0;
        for key in self.all_keys() {
            if self.remove_object_if_expired(&key) {
                removed += 1;
            }
        }
        debug!(removed, "swept expired objects");
        removed
    }

    // == Transform ==
    /// Creates a new, empty store with the same configuration for another
    /// value type. Existing objects are not carried over.
    pub fn transform<U>(&self) -> BoundedMemoryStore<K, U>
    where
        U: Clone + Send + Sync + 'static,
    {
        BoundedMemoryStore::new(self.config)
    }

    // == Stats ==
    /// Returns current occupancy of the index and the container.
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            tracked_keys: self.keys.len(),
            live_entries: self.container.len(),
            total_cost: self.container.total_cost(),
            evictions: self.container.evictions(),
        }
    }
}

impl<K, V> StorageAware<K, V> for BoundedMemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn entry(&self, key: &K) -> Result<Entry<V>> {
        BoundedMemoryStore::entry(self, key)
    }

    fn remove_object(&self, key: &K) {
        BoundedMemoryStore::remove_object(self, key)
    }

    fn set_object(&self, object: V, key: K, expiry: Option<Expiry>) {
        let expiry = expiry.unwrap_or_else(|| self.config.default_expiry());
        self.set(key, object, expiry, 0)
    }

    fn remove_all(&self) {
        BoundedMemoryStore::remove_all(self)
    }

    fn remove_expired(&self) -> usize {
        BoundedMemoryStore::remove_expired(self)
    }
}

impl<K, V> fmt::Debug for BoundedMemoryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedMemoryStore")
            .field("config", &self.config)
            .field("tracked_keys", &self.keys.len())
            .field("live_entries", &self.container.len())
            .finish()
    }
}
