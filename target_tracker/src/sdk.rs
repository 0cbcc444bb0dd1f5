//! Builder for composing the tracker app.

use bevy::prelude::*;

use crate::config::{self, TrackerSettings};
use crate::data::{OcclusionProbe, VoxelGrid};
use crate::plugin::{tracker_plugin, OccluderResource};
use crate::render::{BackendResource, RenderBackend};
use crate::scene::{demo_scene_plugin, DemoWorld};
use crate::ui::hud_plugin;

/// Builder for a windowed app with the tracker wired in.
pub struct TrackerBuilder {
    settings: Option<TrackerSettings>,
    probe: Option<Box<dyn OcclusionProbe>>,
    backend: Option<BackendResource>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_hud: bool,
    enable_demo_scene: bool,
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self {
            settings: None,
            probe: None,
            backend: None,
            window_title: "Sightline".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.55, 0.7, 0.9),
            enable_hud: true,
            enable_demo_scene: true,
        }
    }
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: TrackerSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Load settings from `SIGHTLINE_*` environment variables, falling back to
    /// defaults if they do not validate.
    pub fn settings_from_env(mut self) -> Self {
        let settings = config::tracker_settings().unwrap_or_else(|err| {
            warn!("sightline: {err}, using default settings");
            TrackerSettings::default()
        });
        self.settings = Some(settings);
        self
    }

    /// Voxel field (or any other probe) the visibility test casts against.
    pub fn probe(mut self, probe: impl OcclusionProbe) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Extra sink for composed frames, alongside the gizmo overlay.
    pub fn backend(mut self, backend: impl RenderBackend + Send + Sync + 'static) -> Self {
        self.backend = Some(BackendResource::new(backend));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_demo_scene(mut self) -> Self {
        self.enable_demo_scene = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let settings = self.settings.unwrap_or_default();

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(settings);

        if self.enable_demo_scene {
            app.insert_resource(DemoWorld::default());
        }
        let probe = match (self.probe, app.world().get_resource::<DemoWorld>()) {
            (Some(probe), _) => OccluderResource(probe),
            (None, Some(world)) => OccluderResource::new(world.0.clone()),
            (None, None) => OccluderResource::new(VoxelGrid::new()),
        };
        app.insert_resource(probe);
        if let Some(backend) = self.backend {
            app.insert_resource(backend);
        }

        app.add_plugins(tracker_plugin);

        if self.enable_demo_scene {
            app.add_plugins(demo_scene_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }

        app
    }
}
