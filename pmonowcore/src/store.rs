//! Single-slot atomic snapshot store.
//!
//! The poller (1 Hz task) and the render side (per-frame) share exactly one
//! mutable resource: the current [`Snapshot`]. The store holds it in an
//! [`ArcSwap`], so readers always get a fully consistent value without
//! taking a lock, and writers replace it wholesale.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::model::Snapshot;

/// Thread-safe holder for the current [`Snapshot`].
#[derive(Debug)]
pub struct SnapshotStore {
    current: ArcSwap<Snapshot>,
}

impl SnapshotStore {
    /// New store seeded with the loading placeholder.
    pub fn new() -> Self {
        SnapshotStore {
            current: ArcSwap::from_pointee(Snapshot::loading()),
        }
    }

    /// Current snapshot. Cheap, lock-free, safe from any thread.
    pub fn load(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the snapshot wholesale.
    pub fn publish(&self, snapshot: Snapshot) {
        self.current.store(Arc::new(snapshot));
    }

    /// Update only the image fields of whatever snapshot is current at
    /// completion time.
    ///
    /// Image registration finishes asynchronously and may race with a
    /// concurrent text/playback publish from the poller; the read-modify-
    /// write loop guarantees neither side clobbers the other's fields.
    pub fn update_image(&self, loaded: bool, width: u32, height: u32) {
        self.current
            .rcu(|current| current.with_image(loaded, width, height));
    }

    /// Drop the image fields if an image is currently recorded.
    pub fn clear_image(&self) {
        self.current.rcu(|current| {
            if current.image_loaded || current.cover_tex_w != 0 || current.cover_tex_h != 0 {
                Arc::new(current.with_image(false, 0, 0))
            } else {
                Arc::clone(current)
            }
        });
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
