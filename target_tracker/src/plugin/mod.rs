//! Bevy host: drives the update cycle on `FixedUpdate` and the render cycle
//! on `Update`.

mod components;
mod systems;

use bevy::prelude::*;

use crate::config::TrackerSettings;
use crate::data::{OcclusionProbe, VoxelGrid};
use crate::render::DrawPrimitive;
use crate::tracking::{OverlayRenderer, Tracker};

pub use components::{Trackable, Viewpoint};

#[derive(Resource)]
pub struct TrackerResource(pub Tracker);

#[derive(Resource)]
pub struct OverlayResource(pub OverlayRenderer);

/// Occlusion probe the update cycle casts against.
#[derive(Resource)]
pub struct OccluderResource(pub Box<dyn OcclusionProbe>);

impl OccluderResource {
    pub fn new(probe: impl OcclusionProbe) -> Self {
        Self(Box::new(probe))
    }
}

/// Primitives composed this frame, read by the submit systems.
#[derive(Resource, Default, Debug)]
pub struct OverlayFrame(pub Vec<DrawPrimitive>);

/// Registers tracker resources and the cycle systems. Uses the
/// `TrackerSettings` resource when present, defaults otherwise; an
/// `OccluderResource` inserted beforehand is kept.
pub fn tracker_plugin(app: &mut App) {
    let settings = app
        .world()
        .get_resource::<TrackerSettings>()
        .cloned()
        .unwrap_or_default();

    info!(
        "sightline: tracking {:?} within {} at {} Hz",
        settings.target_kind, settings.search_radius, settings.update_hz
    );

    if !app.world().contains_resource::<OccluderResource>() {
        app.insert_resource(OccluderResource::new(VoxelGrid::new()));
    }

    app.insert_resource(TrackerResource(Tracker::from_settings(&settings)))
        .insert_resource(OverlayResource(OverlayRenderer::from_settings(&settings)))
        .insert_resource(Time::<Fixed>::from_hz(settings.update_hz))
        .insert_resource(settings)
        .init_resource::<OverlayFrame>()
        .add_systems(FixedUpdate, systems::update_cycle_system)
        .add_systems(
            Update,
            (
                systems::reset_on_viewpoint_removed,
                systems::render_cycle_system,
                systems::submit_backend_system,
            )
                .chain(),
        );

    #[cfg(feature = "gizmos")]
    app.add_systems(Startup, systems::configure_gizmos).add_systems(
        Update,
        systems::submit_gizmos_system.after(systems::render_cycle_system),
    );
}
