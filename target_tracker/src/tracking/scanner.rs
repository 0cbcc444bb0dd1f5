//! Spatial scan: cube query, category filter, dedup by id, spherical cut.

use std::collections::HashSet;

use bevy::math::Vec3;

use crate::data::{SearchRegion, SpatialIndex, TargetSample, WorldObject};

/// Category predicate deciding which world objects are targets.
pub type TargetFilter = Box<dyn Fn(&WorldObject) -> bool + Send + Sync>;

pub struct SpatialScanner {
    filter: TargetFilter,
}

impl SpatialScanner {
    pub fn new(filter: impl Fn(&WorldObject) -> bool + Send + Sync + 'static) -> Self {
        Self {
            filter: Box::new(filter),
        }
    }

    /// Track objects whose `kind` equals `kind`.
    pub fn for_kind(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self::new(move |object| object.kind == kind)
    }

    /// Targets within `radius` of `origin`, in index order, each id once.
    pub fn scan(&self, origin: Vec3, radius: f32, index: &dyn SpatialIndex) -> Vec<TargetSample> {
        let region = SearchRegion::cube(origin, radius);
        let mut seen = HashSet::new();

        index
            .query(&region)
            .into_iter()
            .filter(|object| (self.filter)(object))
            .filter(|object| seen.insert(object.id))
            .filter(|object| object.position.distance(origin) <= radius)
            .map(|object| object.to_sample())
            .collect()
    }
}
