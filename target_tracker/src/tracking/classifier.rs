//! Line-of-sight split of scanned samples into all / visible.

use bevy::log::debug;
use bevy::math::Vec3;

use crate::data::{OcclusionProbe, ProbeHit, TargetSample};
use crate::error::{CycleError, ProbeError};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub all: Vec<TargetSample>,
    pub visible: Vec<TargetSample>,
}

#[derive(Default)]
pub struct VisibilityClassifier;

impl VisibilityClassifier {
    /// One ray per sample from `observer_eye` to the sample's aim point.
    ///
    /// A ray the probe cannot evaluate marks only its sample occluded. A
    /// probe reporting that the observer is gone aborts the whole cycle.
    pub fn classify(
        &self,
        samples: Vec<TargetSample>,
        observer_eye: Vec3,
        probe: &dyn OcclusionProbe,
    ) -> Result<Classification, CycleError> {
        let mut visible = Vec::with_capacity(samples.len());

        for sample in &samples {
            match probe.cast(observer_eye, sample.aim_point()) {
                Ok(ProbeHit::Miss) => visible.push(*sample),
                Ok(ProbeHit::Hit { .. }) => {}
                Err(ProbeError::ObserverUnavailable) => return Err(CycleError::TransientAbsence),
                Err(err) => {
                    debug!("sightline: target {:?} treated as occluded: {err}", sample.id);
                }
            }
        }

        Ok(Classification {
            all: samples,
            visible,
        })
    }
}
