//! Demo world for the standalone binary.

pub(crate) mod camera;
pub(crate) mod targets;
pub(crate) mod world;

use bevy::prelude::*;

pub use camera::{orbit_camera_plugin, OrbitCamera};
pub use targets::{spawn_demo_targets, wander_plugin, Wander};
pub use world::{demo_grid, setup_scene, DemoWorld};

pub fn demo_scene_plugin(app: &mut App) {
    app.init_resource::<DemoWorld>()
        .add_systems(Startup, setup_scene)
        .add_plugins((wander_plugin, orbit_camera_plugin));
}
