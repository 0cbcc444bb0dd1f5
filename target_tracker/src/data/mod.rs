mod model;
pub mod voxel;

use bevy::math::Vec3;

use crate::error::ProbeError;

pub use model::{ObserverPose, ProbeHit, SearchRegion, TargetId, TargetSample, WorldObject};
pub(crate) use model::aim_point;
pub use voxel::{Voxel, VoxelGrid};

/// In-memory, synchronous lookup of world objects by region.
pub trait SpatialIndex {
    /// Every object whose position lies inside `region`. May contain
    /// duplicates and objects of any kind; the scanner filters both.
    fn query(&self, region: &SearchRegion) -> Vec<WorldObject>;
}

impl SpatialIndex for [WorldObject] {
    fn query(&self, region: &SearchRegion) -> Vec<WorldObject> {
        self.iter()
            .filter(|object| region.contains(object.position))
            .cloned()
            .collect()
    }
}

impl SpatialIndex for Vec<WorldObject> {
    fn query(&self, region: &SearchRegion) -> Vec<WorldObject> {
        self.as_slice().query(region)
    }
}

/// Line-of-sight query against the world's solid voxels.
pub trait OcclusionProbe: Send + Sync + 'static {
    /// First solid voxel between `from` and `to`. Fluids never count as a hit.
    fn cast(&self, from: Vec3, to: Vec3) -> Result<ProbeHit, ProbeError>;
}

/// Source of the observer's viewpoint. Every accessor returns `None` while
/// there is no observer (e.g. between world loads).
pub trait ObserverContext {
    fn position(&self) -> Option<Vec3>;
    fn eye_position(&self) -> Option<Vec3>;
    fn look_direction(&self) -> Option<Vec3>;

    fn pose(&self) -> Option<ObserverPose> {
        Some(ObserverPose {
            position: self.position()?,
            eye: self.eye_position()?,
            look: self.look_direction()?,
        })
    }
}

impl ObserverContext for Option<ObserverPose> {
    fn position(&self) -> Option<Vec3> {
        self.map(|pose| pose.position)
    }

    fn eye_position(&self) -> Option<Vec3> {
        self.map(|pose| pose.eye)
    }

    fn look_direction(&self) -> Option<Vec3> {
        self.map(|pose| pose.look)
    }

    fn pose(&self) -> Option<ObserverPose> {
        *self
    }
}
