//! Storage Statistics Module
//!
//! Point-in-time view of a memory store's index and container.

use serde::Serialize;

// == Memory Stats ==
/// Snapshot of store occupancy.
///
/// `tracked_keys` can exceed `live_entries` when the container has evicted
/// capsules the index still lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    /// Keys currently held by the key index
    pub tracked_keys: usize,
    /// Capsules currently held by the container
    pub live_entries: usize,
    /// Summed cost of the held capsules
    pub total_cost: u64,
    /// Capsules dropped by the container to satisfy its limits
    pub evictions: u64,
}

impl MemoryStats {
    // == Stale Keys ==
    /// Lower bound on index keys whose capsule is already gone.
    pub fn stale_keys(&self) -> usize {
        self.tracked_keys.saturating_sub(self.live_entries)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = MemoryStats::default();
        assert_eq!(stats.tracked_keys, 0);
        assert_eq!(stats.live_entries, 0);
        assert_eq!(stats.stale_keys(), 0);
    }

    #[test]
    fn test_stale_keys() {
        let stats = MemoryStats {
            tracked_keys: 5,
            live_entries: 3,
            total_cost: 0,
            evictions: 2,
        };
        assert_eq!(stats.stale_keys(), 2);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = MemoryStats {
            tracked_keys: 1,
            live_entries: 1,
            total_cost: 10,
            evictions: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_cost"], 10);
        assert_eq!(json["tracked_keys"], 1);
    }
}
