//! Published tracking results and the slot readers take them from.

use std::sync::Arc;

use bevy::math::Vec3;

use crate::data::{TargetId, TargetSample};

/// One update cycle's view. Never mutated after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingSnapshot {
    pub cycle: u64,
    /// Scan origin the cycle ran from.
    pub origin: Vec3,
    pub all: Vec<TargetSample>,
    /// Unobstructed subset of `all`, in the same relative order.
    pub visible: Vec<TargetSample>,
}

impl TrackingSnapshot {
    pub fn total_count(&self) -> usize {
        self.all.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, id: TargetId) -> bool {
        self.visible.iter().any(|sample| sample.id == id)
    }
}

/// Latest-snapshot handoff between the update and render cycles.
///
/// Publishing swaps in a new `Arc`; readers keep whatever `Arc` they cloned,
/// so a reader never observes a half-written snapshot.
#[derive(Clone, Debug, Default)]
pub enum SnapshotSlot {
    #[default]
    Stale,
    Published(Arc<TrackingSnapshot>),
}

impl SnapshotSlot {
    pub fn publish(&mut self, snapshot: TrackingSnapshot) -> Arc<TrackingSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self = SnapshotSlot::Published(Arc::clone(&snapshot));
        snapshot
    }

    pub fn latest(&self) -> Option<Arc<TrackingSnapshot>> {
        match self {
            SnapshotSlot::Stale => None,
            SnapshotSlot::Published(snapshot) => Some(Arc::clone(snapshot)),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, SnapshotSlot::Stale)
    }

    /// Drop the published view, e.g. when the host unloads its world.
    pub fn reset(&mut self) {
        *self = SnapshotSlot::Stale;
    }
}
