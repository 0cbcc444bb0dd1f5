//! Sightline: finds targets of one kind around an observer, keeps the ones
//! with a clear line of sight, and overlays boxes and tracers on them.
//!
//! Scanning and classification run at a fixed rate and publish an immutable
//! snapshot; rendering smooths positions per frame and composes primitives.

pub mod config;
pub mod data;
pub mod error;
pub mod plugin;
pub mod render;
pub mod scene;
pub mod tracking;
mod ui;

pub mod prelude;
pub mod sdk;

pub use error::{ConfigError, CycleError, ProbeError, SubmitError};
pub use render::{BackendResource, ChannelBackend, DrawPrimitive, OverlayComposer, RenderBackend};
pub use tracking::{OverlayRenderer, Tracker, TrackingSnapshot};
pub use ui::HudSettings;
