//! Capsule Module
//!
//! The payload stored inside a bounded container. The value is type-erased so
//! containers stay independent of the store's value type; the store recovers
//! it with a typed downcast on read.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::storage::Expiry;

// == Capsule ==
/// Type-erased value plus the metadata the container and the store need.
///
/// Cloning a capsule clones the handle, not the value.
#[derive(Clone)]
pub struct Capsule {
    object: Arc<dyn Any + Send + Sync>,
    expiry: Expiry,
    cost: u64,
}

impl Capsule {
    pub fn new<V>(object: V, expiry: Expiry, cost: u64) -> Self
    where
        V: Send + Sync + 'static,
    {
        Self {
            object: Arc::new(object),
            expiry,
            cost,
        }
    }

    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Weight counted against the container's total cost limit.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn is_expired(&self) -> bool {
        self.expiry.is_expired()
    }

    // == Downcast ==
    /// Borrows the payload as `V`, or None if it holds another type.
    pub fn object<V: 'static>(&self) -> Option<&V> {
        self.object.downcast_ref::<V>()
    }
}

impl fmt::Debug for Capsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capsule")
            .field("expiry", &self.expiry)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}
