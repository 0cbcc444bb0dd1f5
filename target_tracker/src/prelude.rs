//! Minimal prelude for SDK consumers.

pub use crate::config::{tracker_settings, TrackerSettings};
pub use crate::data::{
    ObserverContext, ObserverPose, OcclusionProbe, ProbeHit, SpatialIndex, TargetId,
    TargetSample, Voxel, VoxelGrid, WorldObject,
};
pub use crate::plugin::{tracker_plugin, Trackable, Viewpoint};
pub use crate::render::{ChannelBackend, DrawPrimitive, OverlayComposer, RenderBackend};
pub use crate::sdk::TrackerBuilder;
pub use crate::tracking::{OverlayRenderer, Tracker, TrackingSnapshot};
