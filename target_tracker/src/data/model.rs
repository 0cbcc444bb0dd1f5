// Host-agnostic value types shared by the tracker, the smoother and the composer.
// Bevy math types are used for vectors only; nothing here touches the ECS.

use bevy::math::{Vec2, Vec3};

/// Stable identity of a world object for as long as it exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl TargetId {
    /// Reserved key under which the smoother tracks the observer's aim point.
    pub const OBSERVER_AIM: TargetId = TargetId(u64::MAX);
}

/// One update cycle's read of a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSample {
    pub id: TargetId,
    pub position: Vec3,
    pub bounding_width: f32,
    pub bounding_height: f32,
}

impl TargetSample {
    /// Point the line of sight is aimed at: halfway up the bounding box.
    pub fn aim_point(&self) -> Vec3 {
        aim_point(self.position, self.bounding_height)
    }
}

pub(crate) fn aim_point(position: Vec3, bounding_height: f32) -> Vec3 {
    position + Vec3::Y * (bounding_height * 0.5)
}

/// Raw entry returned by a [`SpatialIndex`](crate::data::SpatialIndex).
#[derive(Clone, Debug, PartialEq)]
pub struct WorldObject {
    pub id: TargetId,
    pub kind: String,
    pub position: Vec3,
    /// Bounding box width (x) and height (y).
    pub bounding_size: Vec2,
}

impl WorldObject {
    pub fn to_sample(&self) -> TargetSample {
        TargetSample {
            id: self.id,
            position: self.position,
            bounding_width: self.bounding_size.x,
            bounding_height: self.bounding_size.y,
        }
    }
}

/// Axis-aligned query region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchRegion {
    pub min: Vec3,
    pub max: Vec3,
}

impl SearchRegion {
    /// Cube of half-extent `half_extent` around `center`.
    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        let half = Vec3::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Where the observer stands and looks during one cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverPose {
    /// Foot position; scans are centered here.
    pub position: Vec3,
    /// Eye position; rays start here.
    pub eye: Vec3,
    /// Unit look direction.
    pub look: Vec3,
}

impl ObserverPose {
    /// The observer's projected look point, `distance` units along the view ray.
    pub fn aim_point(&self, distance: f32) -> Vec3 {
        self.eye + self.look.normalize_or_zero() * distance
    }
}

/// Result of a single occlusion ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbeHit {
    /// First solid voxel along the segment and the point where the ray entered it.
    Hit { voxel: bevy::math::IVec3, point: Vec3 },
    Miss,
}

impl ProbeHit {
    pub fn is_miss(&self) -> bool {
        matches!(self, ProbeHit::Miss)
    }
}
