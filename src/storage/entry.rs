//! Entry Module
//!
//! Defines the snapshot handed to callers on lookup.

use crate::storage::Expiry;

// == Entry ==
/// A stored object together with its expiry.
///
/// Entries are owned copies; holding one does not keep anything alive inside
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The stored value
    pub object: V,
    /// When the value becomes stale
    pub expiry: Expiry,
}

impl<V> Entry<V> {
    pub fn new(object: V, expiry: Expiry) -> Self {
        Self { object, expiry }
    }

    /// Returns true if the entry's expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expiry.is_expired()
    }
}
