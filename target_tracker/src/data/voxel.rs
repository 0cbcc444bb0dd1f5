//! Sparse voxel occluder field with a segment traversal probe.
//!
//! Traversal follows Amanatides & Woo: step voxel by voxel along the segment,
//! always crossing the nearest cell boundary next, so every voxel the segment
//! touches is visited exactly once.

use std::collections::HashMap;

use bevy::math::{IVec3, Vec3};

use crate::data::{OcclusionProbe, ProbeHit};
use crate::error::ProbeError;

const DEFAULT_MAX_STEPS: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Voxel {
    Air,
    Solid,
    /// Water, lava and the like. Rays pass through.
    Fluid,
}

/// Unit voxels keyed by integer coordinate; absent cells are air.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    cells: HashMap<IVec3, Voxel>,
    max_steps: u32,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self {
            cells: HashMap::new(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on voxels visited per ray; longer traversals are reported as unevaluable.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn set(&mut self, coord: IVec3, voxel: Voxel) {
        match voxel {
            Voxel::Air => {
                self.cells.remove(&coord);
            }
            other => {
                self.cells.insert(coord, other);
            }
        }
    }

    /// Fill the inclusive box `min..=max`.
    pub fn fill(&mut self, min: IVec3, max: IVec3, voxel: Voxel) {
        let (lo, hi) = (min.min(max), min.max(max));
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    self.set(IVec3::new(x, y, z), voxel);
                }
            }
        }
    }

    pub fn get(&self, coord: IVec3) -> Voxel {
        self.cells.get(&coord).copied().unwrap_or(Voxel::Air)
    }

    pub fn is_solid(&self, coord: IVec3) -> bool {
        self.get(coord) == Voxel::Solid
    }

    /// Non-air cells, for building meshes of the field.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, Voxel)> + '_ {
        self.cells.iter().map(|(coord, voxel)| (*coord, *voxel))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Walk the segment `from -> to` and report the first solid voxel.
    pub fn traverse(&self, from: Vec3, to: Vec3) -> Result<ProbeHit, ProbeError> {
        if !from.is_finite() || !to.is_finite() {
            return Err(ProbeError::Unevaluable("non-finite ray endpoint".into()));
        }

        let mut voxel = from.floor().as_ivec3();
        let end_voxel = to.floor().as_ivec3();
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return Ok(self.hit_or_miss(voxel, from));
        }

        let dir = delta / length;
        let step = IVec3::new(axis_step(dir.x), axis_step(dir.y), axis_step(dir.z));
        let t_delta = Vec3::new(axis_delta(dir.x), axis_delta(dir.y), axis_delta(dir.z));
        let mut t_max = Vec3::new(
            first_boundary(from.x, dir.x, voxel.x),
            first_boundary(from.y, dir.y, voxel.y),
            first_boundary(from.z, dir.z, voxel.z),
        );
        let mut t_entry = 0.0_f32;

        for _ in 0..self.max_steps {
            if self.is_solid(voxel) {
                return Ok(ProbeHit::Hit {
                    voxel,
                    point: from + dir * t_entry,
                });
            }
            if voxel == end_voxel {
                return Ok(ProbeHit::Miss);
            }

            if t_max.x < t_max.y && t_max.x < t_max.z {
                voxel.x += step.x;
                t_entry = t_max.x;
                t_max.x += t_delta.x;
            } else if t_max.y < t_max.z {
                voxel.y += step.y;
                t_entry = t_max.y;
                t_max.y += t_delta.y;
            } else {
                voxel.z += step.z;
                t_entry = t_max.z;
                t_max.z += t_delta.z;
            }

            if t_entry > length {
                return Ok(ProbeHit::Miss);
            }
        }

        Err(ProbeError::Unevaluable(format!(
            "traversal exceeded {} voxels",
            self.max_steps
        )))
    }

    fn hit_or_miss(&self, voxel: IVec3, point: Vec3) -> ProbeHit {
        if self.is_solid(voxel) {
            ProbeHit::Hit { voxel, point }
        } else {
            ProbeHit::Miss
        }
    }
}

impl OcclusionProbe for VoxelGrid {
    fn cast(&self, from: Vec3, to: Vec3) -> Result<ProbeHit, ProbeError> {
        self.traverse(from, to)
    }
}

fn axis_step(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

fn axis_delta(d: f32) -> f32 {
    if d == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / d).abs()
    }
}

/// Ray distance from `origin` to the first cell boundary on this axis.
fn first_boundary(origin: f32, d: f32, cell: i32) -> f32 {
    if d > 0.0 {
        (cell as f32 + 1.0 - origin) / d
    } else if d < 0.0 {
        (origin - cell as f32) / -d
    } else {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_segment_misses() {
        let mut grid = VoxelGrid::new();
        grid.fill(IVec3::new(-5, -1, -5), IVec3::new(5, -1, 5), Voxel::Solid);

        let hit = grid
            .cast(Vec3::new(0.5, 1.6, 0.5), Vec3::new(4.5, 0.2, 4.5))
            .unwrap();
        assert_eq!(hit, ProbeHit::Miss);
    }

    #[test]
    fn wall_between_endpoints_is_reported() {
        let mut grid = VoxelGrid::new();
        grid.fill(IVec3::new(3, 0, -2), IVec3::new(3, 3, 2), Voxel::Solid);

        match grid.cast(Vec3::new(0.5, 1.5, 0.5), Vec3::new(8.5, 0.5, 0.5)) {
            Ok(ProbeHit::Hit { voxel, point }) => {
                assert_eq!(voxel.x, 3);
                assert!((point.x - 3.0).abs() < 1e-4);
            }
            other => panic!("expected a hit, got {other:?}"),
        }
    }

    #[test]
    fn fluid_does_not_occlude() {
        let mut grid = VoxelGrid::new();
        grid.fill(IVec3::new(2, 0, -2), IVec3::new(4, 3, 2), Voxel::Fluid);

        let hit = grid
            .cast(Vec3::new(0.5, 1.5, 0.5), Vec3::new(8.5, 0.5, 0.5))
            .unwrap();
        assert!(hit.is_miss());
    }

    #[test]
    fn traversal_works_in_negative_directions() {
        let mut grid = VoxelGrid::new();
        grid.set(IVec3::new(-4, -3, -2), Voxel::Solid);

        let hit = grid
            .cast(Vec3::new(0.5, 0.5, 0.5), Vec3::new(-7.5, -5.5, -3.5))
            .unwrap();
        assert!(matches!(hit, ProbeHit::Hit { voxel, .. } if voxel == IVec3::new(-4, -3, -2)));
    }

    #[test]
    fn step_cap_reports_unevaluable() {
        let grid = VoxelGrid::new().with_max_steps(4);
        let result = grid.cast(Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0));
        assert!(matches!(result, Err(ProbeError::Unevaluable(_))));
    }

    #[test]
    fn non_finite_endpoint_is_unevaluable() {
        let grid = VoxelGrid::new();
        let result = grid.cast(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(matches!(result, Err(ProbeError::Unevaluable(_))));
    }

    #[test]
    fn setting_air_clears_a_cell() {
        let mut grid = VoxelGrid::new();
        grid.set(IVec3::ONE, Voxel::Solid);
        grid.set(IVec3::ONE, Voxel::Air);
        assert!(grid.is_empty());
    }
}
