//! Expiry Sweep Task
//!
//! Background task that periodically purges expired objects from a store.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::storage::BoundedMemoryStore;

/// Spawns a background task that calls `remove_expired` on `store` every
/// `interval`.
///
/// The task runs until aborted through the returned handle.
///
/// # Example
/// ```ignore
/// let store = Arc::new(BoundedMemoryStore::<String, String>::new(MemoryConfig::default()));
/// let sweep_handle = spawn_sweep_task(store.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<K, V>(
    store: Arc<BoundedMemoryStore<K, V>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.remove_expired();
            if removed > 0 {
                info!("Expiry sweep: removed {} expired objects", removed);
            } else {
                debug!("Expiry sweep: no expired objects found");
            }
        }
    })
}
