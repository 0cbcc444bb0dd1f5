//! Tracker settings: defaults, JSON file and env overrides.

use std::path::{Path, PathBuf};

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "SIGHTLINE_CONFIG";

const TARGET_KIND_ENV: &str = "SIGHTLINE_TARGET_KIND";
const SEARCH_RADIUS_ENV: &str = "SIGHTLINE_SEARCH_RADIUS";
const TRACER_MAX_ENV: &str = "SIGHTLINE_TRACER_MAX_DISTANCE";
const SMOOTHING_ENV: &str = "SIGHTLINE_SMOOTHING";
const UPDATE_HZ_ENV: &str = "SIGHTLINE_UPDATE_HZ";

/// Tracer color for one distance band. `up_to` is a fraction of the max tracer distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracerBand {
    pub up_to: f32,
    pub color: [f32; 3],
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Kind string a world object must carry to be tracked.
    pub target_kind: String,
    pub search_radius: f32,
    /// Fixed update cadence (scans per second).
    pub update_hz: f64,
    pub smoothing_factor: f32,
    /// Frame rate at which `smoothing_factor` applies unscaled.
    pub smoothing_reference_hz: f32,
    /// How far in front of the eye the tracer origin sits.
    pub aim_projection_distance: f32,
    pub min_tracer_distance: f32,
    pub max_tracer_distance: f32,
    pub tracer_alpha_floor: f32,
    pub highlight_expansion: f32,
    pub highlight_color: [f32; 4],
    pub tracer_bands: Vec<TracerBand>,
    pub line_width: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            target_kind: "turtle".to_string(),
            search_radius: 64.0,
            update_hz: 20.0,
            smoothing_factor: 0.15,
            smoothing_reference_hz: 60.0,
            aim_projection_distance: 0.5,
            min_tracer_distance: 2.0,
            max_tracer_distance: 48.0,
            tracer_alpha_floor: 0.3,
            highlight_expansion: 1.2,
            highlight_color: [0.0, 1.0, 0.0, 1.0],
            tracer_bands: vec![TracerBand {
                up_to: 1.0,
                color: [1.0, 1.0, 0.0],
            }],
            line_width: 2.0,
        }
    }
}

impl TrackerSettings {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_kind.trim().is_empty() {
            return Err(invalid("target_kind", "must not be empty"));
        }
        if !(self.search_radius.is_finite() && self.search_radius > 0.0) {
            return Err(invalid("search_radius", "must be a positive number"));
        }
        if !(self.update_hz.is_finite() && self.update_hz > 0.0) {
            return Err(invalid("update_hz", "must be a positive number"));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(invalid("smoothing_factor", "must be in (0, 1]"));
        }
        if !(self.smoothing_reference_hz.is_finite() && self.smoothing_reference_hz > 0.0) {
            return Err(invalid("smoothing_reference_hz", "must be a positive number"));
        }
        if !(self.min_tracer_distance >= 0.0 && self.min_tracer_distance < self.max_tracer_distance)
        {
            return Err(invalid(
                "max_tracer_distance",
                "must exceed min_tracer_distance",
            ));
        }
        if !(0.0..=1.0).contains(&self.tracer_alpha_floor) {
            return Err(invalid("tracer_alpha_floor", "must be in [0, 1]"));
        }
        if !(self.highlight_expansion.is_finite() && self.highlight_expansion > 0.0) {
            return Err(invalid("highlight_expansion", "must be a positive number"));
        }
        if self.tracer_bands.is_empty() {
            return Err(invalid("tracer_bands", "at least one band is required"));
        }
        Ok(())
    }

    /// Override fields from `SIGHTLINE_*` env vars. Unparsable values are
    /// reported and skipped.
    pub fn apply_env(&mut self) {
        if let Ok(kind) = std::env::var(TARGET_KIND_ENV) {
            if !kind.trim().is_empty() {
                self.target_kind = kind.trim().to_string();
            }
        }
        if let Some(radius) = env_number(SEARCH_RADIUS_ENV) {
            self.search_radius = radius;
        }
        if let Some(max) = env_number(TRACER_MAX_ENV) {
            self.max_tracer_distance = max;
        }
        if let Some(factor) = env_number(SMOOTHING_ENV) {
            self.smoothing_factor = factor;
        }
        if let Some(hz) = env_number(UPDATE_HZ_ENV) {
            self.update_hz = hz;
        }
    }
}

/// Resolve settings: defaults, then the JSON file named by `SIGHTLINE_CONFIG`,
/// then individual env overrides. The result is validated.
pub fn tracker_settings() -> Result<TrackerSettings, ConfigError> {
    let mut settings = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            TrackerSettings::from_json_file(&PathBuf::from(path.trim()))?
        }
        _ => TrackerSettings::default(),
    };
    settings.apply_env();
    settings.validate()?;
    Ok(settings)
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("sightline: ignoring unparsable {key}: {raw:?}");
            None
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
