//! Snapshot cache for discovered tools
//!
//! The cache has two states: never populated, and holding one snapshot
//! (possibly empty). A snapshot is swapped in whole and never edited, so a
//! reader holding an `Arc` keeps a consistent view across refreshes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::RegistrySnapshot;

/// Holds the latest registry snapshot
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<Arc<RegistrySnapshot>>>,
}

impl SnapshotCache {
    /// Create an unpopulated cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, or `None` if nothing has been fetched yet
    pub fn current(&self) -> Option<Arc<RegistrySnapshot>> {
        self.slot.read().clone()
    }

    /// Install a new snapshot and hand back the shared handle to it
    pub fn install(&self, snapshot: RegistrySnapshot) -> Arc<RegistrySnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.slot.write() = Some(Arc::clone(&snapshot));
        snapshot
    }
}
