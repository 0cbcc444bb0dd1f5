//! Target count panel, middle-left of the screen.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::plugin::TrackerResource;

const X_OFFSET: f32 = 20.0;

#[derive(Resource)]
pub struct HudSettings {
    /// Show the visible count under the total.
    pub detailed: bool,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self { detailed: true }
    }
}

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<HudSettings>()
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    tracker: Res<TrackerResource>,
    settings: Res<HudSettings>,
) {
    let Some(snapshot) = tracker.0.latest() else {
        return;
    };

    egui::Window::new("Targets")
        .anchor(egui::Align2::LEFT_CENTER, [X_OFFSET, 0.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 128))
                .stroke(egui::Stroke::new(2.0, egui::Color32::from_rgb(0, 255, 0)))
                .inner_margin(egui::Margin::same(8)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::WHITE);

            ui.label(format!("Targets: {}", snapshot.total_count()));
            if settings.detailed {
                ui.label(format!("Visible: {}", snapshot.visible_count()));
            }
        });
}
