//! The two cadence entry points: the fixed-rate update cycle and the
//! per-frame render cycle.

use std::sync::Arc;

use bevy::log::debug;

use crate::config::TrackerSettings;
use crate::data::{ObserverContext, OcclusionProbe, SpatialIndex};
use crate::error::{CycleError, SubmitError};
use crate::render::{DrawPrimitive, OverlayComposer, OverlayStyle, RenderBackend};
use crate::tracking::smoother::frame_factor;
use crate::tracking::{
    PositionSmoother, SnapshotSlot, SpatialScanner, TrackingSnapshot, VisibilityClassifier,
};

/// Update-cycle state: scanner, classifier and the published snapshot.
pub struct Tracker {
    scanner: SpatialScanner,
    classifier: VisibilityClassifier,
    radius: f32,
    cycle: u64,
    slot: SnapshotSlot,
}

impl Tracker {
    pub fn new(scanner: SpatialScanner, radius: f32) -> Self {
        Self {
            scanner,
            classifier: VisibilityClassifier,
            radius,
            cycle: 0,
            slot: SnapshotSlot::Stale,
        }
    }

    pub fn from_settings(settings: &TrackerSettings) -> Self {
        Self::new(
            SpatialScanner::for_kind(settings.target_kind.clone()),
            settings.search_radius,
        )
    }

    /// Scan, classify and publish. Without an observer nothing is published
    /// and the previous snapshot stays current.
    pub fn update_cycle(
        &mut self,
        observer: &dyn ObserverContext,
        index: &dyn SpatialIndex,
        probe: &dyn OcclusionProbe,
    ) -> Result<Arc<TrackingSnapshot>, CycleError> {
        let pose = observer.pose().ok_or(CycleError::TransientAbsence)?;

        let samples = self.scanner.scan(pose.position, self.radius, index);
        let classification = self.classifier.classify(samples, pose.eye, probe)?;

        self.cycle += 1;
        let snapshot = TrackingSnapshot {
            cycle: self.cycle,
            origin: pose.position,
            all: classification.all,
            visible: classification.visible,
        };
        if !snapshot.all.is_empty() {
            debug!(
                "sightline: cycle {} found {} targets ({} visible)",
                snapshot.cycle,
                snapshot.total_count(),
                snapshot.visible_count()
            );
        }
        Ok(self.slot.publish(snapshot))
    }

    pub fn latest(&self) -> Option<Arc<TrackingSnapshot>> {
        self.slot.latest()
    }

    pub fn slot(&self) -> &SnapshotSlot {
        &self.slot
    }

    /// Forget the published snapshot so the overlay draws nothing.
    pub fn reset(&mut self) {
        self.slot.reset();
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }
}

/// Render-cycle state: the smoother cache and the composer.
pub struct OverlayRenderer {
    smoother: PositionSmoother,
    composer: OverlayComposer,
    smoothing_factor: f32,
    /// When set, the factor is rescaled for the frame's delta time.
    reference_hz: Option<f32>,
    aim_distance: f32,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle, smoothing_factor: f32, aim_distance: f32) -> Self {
        Self {
            smoother: PositionSmoother::new(),
            composer: OverlayComposer::new(style),
            smoothing_factor,
            reference_hz: None,
            aim_distance,
        }
    }

    pub fn from_settings(settings: &TrackerSettings) -> Self {
        Self::new(
            OverlayStyle::from(settings),
            settings.smoothing_factor,
            settings.aim_projection_distance,
        )
        .with_reference_hz(settings.smoothing_reference_hz)
    }

    pub fn with_reference_hz(mut self, hz: f32) -> Self {
        self.reference_hz = Some(hz);
        self
    }

    /// Smooth and compose one frame without submitting it.
    pub fn compose_frame(
        &mut self,
        snapshot: Option<&TrackingSnapshot>,
        observer: &dyn ObserverContext,
        dt_secs: f32,
    ) -> Vec<DrawPrimitive> {
        let visible = snapshot.map(|s| s.visible.as_slice()).unwrap_or(&[]);
        let raw_aim = observer.pose().map(|pose| pose.aim_point(self.aim_distance));
        let factor = match self.reference_hz {
            Some(hz) => frame_factor(self.smoothing_factor, dt_secs, hz),
            None => self.smoothing_factor,
        };

        let smoothed = self.smoother.update(visible, raw_aim, factor);
        self.composer
            .compose(visible, &smoothed, smoothed.observer_aim())
    }

    /// Compose a frame and hand it to `backend`. A backend failure is returned
    /// to the caller; smoother state is kept either way.
    pub fn render_cycle(
        &mut self,
        snapshot: Option<&TrackingSnapshot>,
        observer: &dyn ObserverContext,
        dt_secs: f32,
        backend: &mut dyn RenderBackend,
    ) -> Result<usize, SubmitError> {
        let primitives = self.compose_frame(snapshot, observer, dt_secs);
        backend.submit(&primitives)?;
        Ok(primitives.len())
    }

    pub fn smoother(&self) -> &PositionSmoother {
        &self.smoother
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.composer.style
    }
}
