//! Snapshot + smoothed positions -> highlight boxes and tracer lines.

use bevy::color::Srgba;
use bevy::math::Vec3;

use crate::config::{TrackerSettings, TracerBand};
use crate::data::{aim_point, TargetSample};
use crate::render::DrawPrimitive;
use crate::tracking::SmoothedPositions;

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub highlight_expansion: f32,
    pub highlight_color: Srgba,
    pub min_tracer_distance: f32,
    pub max_tracer_distance: f32,
    pub alpha_floor: f32,
    pub bands: Vec<TracerBand>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&TrackerSettings::default())
    }
}

impl From<&TrackerSettings> for OverlayStyle {
    fn from(settings: &TrackerSettings) -> Self {
        let [r, g, b, a] = settings.highlight_color;
        Self {
            highlight_expansion: settings.highlight_expansion,
            highlight_color: Srgba::new(r, g, b, a),
            min_tracer_distance: settings.min_tracer_distance,
            max_tracer_distance: settings.max_tracer_distance,
            alpha_floor: settings.tracer_alpha_floor,
            bands: settings.tracer_bands.clone(),
        }
    }
}

impl OverlayStyle {
    /// Linear falloff with a floor: `max(floor, 1 - distance / max)`.
    pub fn tracer_alpha(&self, distance: f32) -> f32 {
        (1.0 - distance / self.max_tracer_distance).max(self.alpha_floor)
    }

    /// RGB of the first band covering `distance`; the last band covers the rest.
    pub fn tracer_rgb(&self, distance: f32) -> [f32; 3] {
        let fraction = distance / self.max_tracer_distance;
        self.bands
            .iter()
            .find(|band| fraction <= band.up_to)
            .or_else(|| self.bands.last())
            .map(|band| band.color)
            .unwrap_or([1.0, 1.0, 0.0])
    }

    pub fn tracer_in_range(&self, distance: f32) -> bool {
        distance > self.min_tracer_distance && distance <= self.max_tracer_distance
    }
}

#[derive(Clone, Debug, Default)]
pub struct OverlayComposer {
    pub style: OverlayStyle,
}

impl OverlayComposer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    /// One box per visible sample, followed by its tracer when the observer
    /// aim is known and the target is within tracer range.
    pub fn compose(
        &self,
        visible: &[TargetSample],
        smoothed: &SmoothedPositions,
        observer_aim: Option<Vec3>,
    ) -> Vec<DrawPrimitive> {
        let style = &self.style;
        let mut primitives = Vec::with_capacity(visible.len() * 2);

        for sample in visible {
            let position = smoothed.get(sample.id).unwrap_or(sample.position);

            primitives.push(DrawPrimitive::Box {
                center: position,
                half_width: sample.bounding_width * style.highlight_expansion * 0.5,
                height: sample.bounding_height * style.highlight_expansion,
                color: style.highlight_color,
            });

            let Some(from) = observer_aim else {
                continue;
            };
            let to = aim_point(position, sample.bounding_height);
            let distance = from.distance(to);
            if !style.tracer_in_range(distance) {
                continue;
            }

            let [r, g, b] = style.tracer_rgb(distance);
            primitives.push(DrawPrimitive::Line {
                from,
                to,
                color: Srgba::new(r, g, b, style.tracer_alpha(distance)),
            });
        }

        primitives
    }
}
