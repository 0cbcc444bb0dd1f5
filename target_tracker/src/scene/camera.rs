//! Slow orbit around the scene origin so targets cross behind the wall.

use bevy::prelude::*;

#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
    /// Radians per second.
    pub speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 20.0,
            height: 6.0,
            speed: 0.12,
        }
    }
}

impl OrbitCamera {
    pub fn transform_at(&self, elapsed: f32) -> Transform {
        let angle = elapsed * self.speed;
        let eye = self.center
            + Vec3::new(angle.cos() * self.radius, self.height, angle.sin() * self.radius);
        Transform::from_translation(eye).looking_at(self.center, Vec3::Y)
    }
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.add_systems(Update, orbit_camera_system);
}

fn orbit_camera_system(time: Res<Time>, mut query: Query<(&OrbitCamera, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (orbit, mut transform) in &mut query {
        *transform = orbit.transform_at(elapsed);
    }
}
