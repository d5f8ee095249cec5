//! Key Index Module
//!
//! Tracks which keys the store believes are live.

use std::collections::HashSet;
use std::hash::Hash;

use parking_lot::Mutex;

// == Key Index ==
/// Mutex-guarded set of keys.
///
/// Every method holds the lock for exactly one set operation. The index is not
/// told about container evictions, so it may hold keys whose capsule is gone.
#[derive(Debug)]
pub struct KeyIndex<K> {
    keys: Mutex<HashSet<K>>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            keys: Mutex::new(HashSet::new()),
        }
    }

    pub fn insert(&self, key: K) {
        self.keys.lock().insert(key);
    }

    pub fn remove(&self, key: &K) {
        self.keys.lock().remove(key);
    }

    pub fn clear(&self) {
        self.keys.lock().clear();
    }

    // == Snapshot ==
    /// Copies the current keys out so callers can iterate without the lock.
    pub fn snapshot(&self) -> Vec<K> {
        self.keys.lock().iter().cloned().collect()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

impl<K> Default for KeyIndex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
