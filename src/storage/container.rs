//! Bounded Container Module
//!
//! The capacity-limited bulk storage behind a memory store. Containers evict
//! on their own when full and do not report which keys they dropped.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

use crate::storage::Capsule;

// == Bounded Container ==
/// Internally synchronized capsule storage with implementation-defined
/// eviction under its configured limits.
pub trait BoundedContainer<K>: Send + Sync {
    /// Returns a handle to the capsule stored for `key`.
    fn get(&self, key: &K) -> Option<Capsule>;

    /// Like `get`, but leaves the key's eviction priority untouched.
    fn peek(&self, key: &K) -> Option<Capsule>;

    /// Stores `capsule` under `key`, replacing any previous capsule.
    ///
    /// May evict other keys, or the inserted key itself, to stay within limits.
    fn insert(&self, key: K, capsule: Capsule);

    fn remove(&self, key: &K) -> Option<Capsule>;

    fn clear(&self);

    /// Number of capsules currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the costs of all held capsules.
    fn total_cost(&self) -> u64;

    /// Number of capsules dropped to satisfy the limits so far.
    fn evictions(&self) -> u64;
}

// == LRU Container ==
/// Count- and cost-limited container evicting the least recently used capsule
/// first. A limit of 0 disables that limit.
///
/// Recency is tracked with a monotonically increasing tick:
/// - `order` maps tick -> key, smallest tick = least recently used
/// - each slot remembers its current tick so it can be moved in O(log n)
pub struct LruContainer<K> {
    count_limit: u64,
    total_cost_limit: u64,
    state: Mutex<LruState<K>>,
}

struct Slot {
    capsule: Capsule,
    tick: u64,
}

struct LruState<K> {
    slots: HashMap<K, Slot>,
    order: BTreeMap<u64, K>,
    tick: u64,
    total_cost: u64,
    evictions: u64,
}

impl<K> LruState<K> {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

impl<K> LruContainer<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty container.
    ///
    /// # Arguments
    /// * `count_limit` - Maximum number of capsules, 0 for unlimited
    /// * `total_cost_limit` - Maximum summed cost, 0 for unlimited
    pub fn new(count_limit: u64, total_cost_limit: u64) -> Self {
        Self {
            count_limit,
            total_cost_limit,
            state: Mutex::new(LruState {
                slots: HashMap::new(),
                order: BTreeMap::new(),
                tick: 0,
                total_cost: 0,
                evictions: 0,
            }),
        }
    }

    pub fn count_limit(&self) -> u64 {
        self.count_limit
    }

    pub fn total_cost_limit(&self) -> u64 {
        self.total_cost_limit
    }

    fn over_limits(&self, state: &LruState<K>) -> bool {
        let over_count = self.count_limit > 0 && state.slots.len() as u64 > self.count_limit;
        let over_cost = self.total_cost_limit > 0 && state.total_cost > self.total_cost_limit;
        over_count || over_cost
    }

    // == Evict ==
    /// Drops least recently used capsules until both limits hold.
    fn evict_over_limits(&self, state: &mut LruState<K>) {
        while self.over_limits(state) {
            let Some((_, key)) = state.order.pop_first() else {
                break;
            };
            if let Some(slot) = state.slots.remove(&key) {
                state.total_cost = state.total_cost.saturating_sub(slot.capsule.cost());
                state.evictions += 1;
                trace!(
                    cost = slot.capsule.cost(),
                    remaining = state.slots.len(),
                    "evicted least recently used capsule"
                );
            }
        }
    }
}

impl<K> BoundedContainer<K> for LruContainer<K>
where
    K: Eq + Hash + Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<Capsule> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let tick = state.next_tick();

        let slot = state.slots.get_mut(key)?;
        let previous = std::mem::replace(&mut slot.tick, tick);
        let capsule = slot.capsule.clone();

        // Touch: move to most recently used
        if let Some(key) = state.order.remove(&previous) {
            state.order.insert(tick, key);
        }
        Some(capsule)
    }

    fn peek(&self, key: &K) -> Option<Capsule> {
        let state = self.state.lock();
        state.slots.get(key).map(|slot| slot.capsule.clone())
    }

    fn insert(&self, key: K, capsule: Capsule) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let tick = state.next_tick();
        let cost = capsule.cost();

        if let Some(old) = state.slots.insert(key.clone(), Slot { capsule, tick }) {
            state.order.remove(&old.tick);
            state.total_cost = state.total_cost.saturating_sub(old.capsule.cost());
        }
        state.total_cost = state.total_cost.saturating_add(cost);
        state.order.insert(tick, key);

        self.evict_over_limits(state);
    }

    fn remove(&self, key: &K) -> Option<Capsule> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let slot = state.slots.remove(key)?;
        state.order.remove(&slot.tick);
        state.total_cost = state.total_cost.saturating_sub(slot.capsule.cost());
        Some(slot.capsule)
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.slots.clear();
        state.order.clear();
        state.total_cost = 0;
    }

    fn len(&self) -> usize {
        self.state.lock().slots.len()
    }

    fn total_cost(&self) -> u64 {
        self.state.lock().total_cost
    }

    fn evictions(&self) -> u64 {
        self.state.lock().evictions
    }
}

impl<K> fmt::Debug for LruContainer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LruContainer")
            .field("count_limit", &self.count_limit)
            .field("total_cost_limit", &self.total_cost_limit)
            .field("len", &state.slots.len())
            .field("total_cost", &state.total_cost)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Expiry;

    fn capsule(cost: u64) -> Capsule {
        Capsule::new(cost, Expiry::Never, cost)
    }

    #[test]
    fn test_container_new() {
        let container: LruContainer<&str> = LruContainer::new(10, 100);
        assert_eq!(container.count_limit(), 10);
        assert_eq!(container.total_cost_limit(), 100);
        assert!(container.is_empty());
        assert_eq!(container.total_cost(), 0);
        assert_eq!(container.evictions(), 0);
    }

    #[test]
    fn test_container_count_limit_evicts_oldest() {
        let container = LruContainer::new(3, 0);

        container.insert("key1", capsule(0));
        container.insert("key2", capsule(0));
        container.insert("key3", capsule(0));
        container.insert("key4", capsule(0));

        assert_eq!(container.len(), 3);
        assert_eq!(container.evictions(), 1);
        assert!(container.get(&"key1").is_none());
        assert!(container.get(&"key4").is_some());
    }

    #[test]
    fn test_container_get_touches_key() {
        let container = LruContainer::new(3, 0);

        container.insert("key1", capsule(0));
        container.insert("key2", capsule(0));
        container.insert("key3", capsule(0));

        // key1 becomes most recently used, key2 is now oldest
        assert!(container.get(&"key1").is_some());
        container.insert("key4", capsule(0));

        assert!(container.get(&"key1").is_some());
        assert!(container.get(&"key2").is_none());
    }

    #[test]
    fn test_container_peek_does_not_touch_key() {
        let container = LruContainer::new(3, 0);

        container.insert("key1", capsule(0));
        container.insert("key2", capsule(0));
        container.insert("key3", capsule(0));

        // key1 stays least recently used
        assert!(container.peek(&"key1").is_some());
        assert!(container.peek(&"missing").is_none());
        container.insert("key4", capsule(0));

        assert!(container.peek(&"key1").is_none());
        assert!(container.peek(&"key2").is_some());
        assert_eq!(container.evictions(), 1);
    }

    #[test]
    fn test_container_cost_limit() {
        let container = LruContainer::new(0, 10);

        container.insert("a", capsule(4));
        container.insert("b", capsule(4));
        assert_eq!(container.total_cost(), 8);

        container.insert("c", capsule(4));

        assert_eq!(container.len(), 2);
        assert_eq!(container.total_cost(), 8);
        assert!(container.get(&"a").is_none());
    }

    #[test]
    fn test_container_oversized_capsule_is_dropped() {
        let container = LruContainer::new(0, 10);

        container.insert("small", capsule(2));
        container.insert("huge", capsule(50));

        assert!(container.is_empty());
        assert_eq!(container.total_cost(), 0);
        assert_eq!(container.evictions(), 2);
    }

    #[test]
    fn test_container_overwrite_adjusts_cost() {
        let container = LruContainer::new(0, 0);

        container.insert("key", capsule(5));
        container.insert("key", capsule(2));

        assert_eq!(container.len(), 1);
        assert_eq!(container.total_cost(), 2);
    }

    #[test]
    fn test_container_overwrite_at_capacity_does_not_evict() {
        let container = LruContainer::new(2, 0);

        container.insert("a", capsule(0));
        container.insert("b", capsule(0));
        container.insert("a", capsule(0));

        assert_eq!(container.len(), 2);
        assert_eq!(container.evictions(), 0);
    }

    #[test]
    fn test_container_remove_and_clear() {
        let container = LruContainer::new(0, 0);

        container.insert(1, capsule(3));
        container.insert(2, capsule(4));

        assert!(container.remove(&1).is_some());
        assert!(container.remove(&1).is_none());
        assert_eq!(container.total_cost(), 4);

        container.clear();
        assert!(container.is_empty());
        assert_eq!(container.total_cost(), 0);
    }

    #[test]
    fn test_container_unlimited() {
        let container = LruContainer::new(0, 0);
        for i in 0..1000u64 {
            container.insert(i, capsule(i));
        }
        assert_eq!(container.len(), 1000);
        assert_eq!(container.evictions(), 0);
    }
}
