//! Per-identity exponential smoothing with immediate eviction.
//!
//! The smoother is owned by the render cycle. Each call to
//! [`PositionSmoother::update`] is one smoothing cycle: every visible id (and
//! the observer aim point, under [`TargetId::OBSERVER_AIM`]) is pulled toward
//! its raw position, and anything not refreshed in that cycle is dropped.

use std::collections::HashMap;

use bevy::math::Vec3;

use crate::data::{TargetId, TargetSample};

const MIN_FACTOR: f32 = 1.0e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedEntry {
    pub id: TargetId,
    pub position: Vec3,
    pub last_seen_cycle: u64,
}

/// Smoothed positions produced by one smoothing cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothedPositions(HashMap<TargetId, Vec3>);

impl SmoothedPositions {
    pub fn get(&self, id: TargetId) -> Option<Vec3> {
        self.0.get(&id).copied()
    }

    pub fn observer_aim(&self) -> Option<Vec3> {
        self.get(TargetId::OBSERVER_AIM)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TargetId, Vec3)> for SmoothedPositions {
    fn from_iter<I: IntoIterator<Item = (TargetId, Vec3)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Default)]
pub struct PositionSmoother {
    entries: HashMap<TargetId, SmoothedEntry>,
    cycle: u64,
}

impl PositionSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one smoothing cycle. `factor` is clamped into `(0, 1]`.
    pub fn update(
        &mut self,
        visible: &[TargetSample],
        observer_aim: Option<Vec3>,
        factor: f32,
    ) -> SmoothedPositions {
        self.cycle += 1;
        let factor = clamp_factor(factor);

        for sample in visible {
            self.blend(sample.id, sample.position, factor);
        }
        if let Some(aim) = observer_aim {
            self.blend(TargetId::OBSERVER_AIM, aim, factor);
        }

        let cycle = self.cycle;
        self.entries.retain(|_, entry| entry.last_seen_cycle == cycle);

        self.entries
            .values()
            .map(|entry| (entry.id, entry.position))
            .collect()
    }

    pub fn entry(&self, id: TargetId) -> Option<&SmoothedEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn blend(&mut self, id: TargetId, raw: Vec3, factor: f32) {
        let cycle = self.cycle;
        self.entries
            .entry(id)
            .and_modify(|entry| {
                entry.position += (raw - entry.position) * factor;
                entry.last_seen_cycle = cycle;
            })
            .or_insert(SmoothedEntry {
                id,
                position: raw,
                last_seen_cycle: cycle,
            });
    }
}

/// Per-frame factor that converges at the same wall-clock rate as `base`
/// applied once per `1 / reference_hz` seconds.
pub fn frame_factor(base: f32, dt_secs: f32, reference_hz: f32) -> f32 {
    let base = clamp_factor(base);
    if !(dt_secs.is_finite() && reference_hz.is_finite()) || reference_hz <= 0.0 {
        return base;
    }
    let frames = (dt_secs * reference_hz).max(0.0);
    clamp_factor(1.0 - (1.0 - base).powf(frames))
}

fn clamp_factor(factor: f32) -> f32 {
    if factor.is_nan() {
        1.0
    } else {
        factor.clamp(MIN_FACTOR, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, position: Vec3) -> TargetSample {
        TargetSample {
            id: TargetId(id),
            position,
            bounding_width: 1.2,
            bounding_height: 0.4,
        }
    }

    #[test]
    fn first_sighting_uses_raw_position() {
        let mut smoother = PositionSmoother::new();
        let raw = Vec3::new(12.25, 63.0, -4.5);

        let smoothed = smoother.update(&[sample(1, raw)], None, 0.15);

        assert_eq!(smoothed.get(TargetId(1)), Some(raw));
    }

    #[test]
    fn error_shrinks_by_one_minus_factor_and_converges() {
        let factor = 0.15;
        let mut smoother = PositionSmoother::new();
        let start = Vec3::ZERO;
        let target = Vec3::new(1.0, 0.0, 0.0);
        smoother.update(&[sample(1, start)], None, factor);

        let mut previous_error = target.distance(start);
        for _ in 0..30 {
            let smoothed = smoother.update(&[sample(1, target)], None, factor);
            let error = smoothed.get(TargetId(1)).unwrap().distance(target);
            assert!((error - previous_error * (1.0 - factor)).abs() < 1e-5);
            previous_error = error;
        }

        assert!(previous_error < 0.01);
    }

    #[test]
    fn absent_id_is_evicted_and_restarts_from_raw() {
        let mut smoother = PositionSmoother::new();
        smoother.update(&[sample(1, Vec3::ZERO)], None, 0.15);
        smoother.update(&[sample(1, Vec3::X * 4.0)], None, 0.15);

        let smoothed = smoother.update(&[sample(2, Vec3::Y)], None, 0.15);
        assert!(smoothed.get(TargetId(1)).is_none());
        assert!(smoother.entry(TargetId(1)).is_none());

        let back = Vec3::new(-3.0, 1.0, 2.0);
        let smoothed = smoother.update(&[sample(1, back)], None, 0.15);
        assert_eq!(smoothed.get(TargetId(1)), Some(back));
    }

    #[test]
    fn observer_aim_is_smoothed_and_evicted_like_targets() {
        let mut smoother = PositionSmoother::new();
        let first = smoother.update(&[], Some(Vec3::ZERO), 0.5);
        assert_eq!(first.observer_aim(), Some(Vec3::ZERO));

        let second = smoother.update(&[], Some(Vec3::new(2.0, 0.0, 0.0)), 0.5);
        assert_eq!(second.observer_aim(), Some(Vec3::new(1.0, 0.0, 0.0)));

        let third = smoother.update(&[], None, 0.5);
        assert!(third.observer_aim().is_none());
        assert!(smoother.is_empty());
    }

    #[test]
    fn last_seen_cycle_tracks_refreshes() {
        let mut smoother = PositionSmoother::new();
        smoother.update(&[sample(9, Vec3::ZERO)], None, 0.15);
        smoother.update(&[sample(9, Vec3::ZERO)], None, 0.15);

        assert_eq!(smoother.entry(TargetId(9)).unwrap().last_seen_cycle, 2);
        assert_eq!(smoother.cycle(), 2);
    }

    #[test]
    fn factor_is_clamped() {
        let mut smoother = PositionSmoother::new();
        smoother.update(&[sample(1, Vec3::ZERO)], None, 1.0);
        let smoothed = smoother.update(&[sample(1, Vec3::X)], None, 7.0);
        assert_eq!(smoothed.get(TargetId(1)), Some(Vec3::X));

        let smoothed = smoother.update(&[sample(1, Vec3::ZERO)], None, f32::NAN);
        assert_eq!(smoothed.get(TargetId(1)), Some(Vec3::ZERO));
    }

    #[test]
    fn frame_factor_matches_base_at_reference_rate() {
        let f = frame_factor(0.15, 1.0 / 60.0, 60.0);
        assert!((f - 0.15).abs() < 1e-5);

        // Two frames at 120 Hz land where one frame at 60 Hz does.
        let half = frame_factor(0.15, 1.0 / 120.0, 60.0);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!((remaining - 0.85).abs() < 1e-5);
    }
}
