//! Wandering demo targets; the entity sits on the floor and the mesh is a
//! child lifted by half its height. Turtles are tracked. Crabs are
//! a different kind and never show up in the overlay.

use bevy::prelude::*;

use crate::plugin::Trackable;

const TURTLE_SIZE: Vec2 = Vec2::new(1.2, 0.4);
const CRAB_SIZE: Vec2 = Vec2::new(0.8, 0.5);

/// Closed loop around an anchor point.
#[derive(Component, Clone, Debug)]
pub struct Wander {
    pub anchor: Vec3,
    pub radius: f32,
    pub speed: f32,
    pub phase: f32,
}

impl Wander {
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let t = elapsed * self.speed + self.phase;
        self.anchor + Vec3::new(t.cos() * self.radius, 0.0, (t * 0.7).sin() * self.radius)
    }
}

pub fn wander_plugin(app: &mut App) {
    app.add_systems(Startup, spawn_demo_targets)
        .add_systems(Update, wander_system);
}

pub fn spawn_demo_targets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shell = meshes.add(Cuboid::new(TURTLE_SIZE.x, TURTLE_SIZE.y, TURTLE_SIZE.x));
    let shell_material = materials.add(Color::srgb(0.2, 0.6, 0.3));
    let crab = meshes.add(Cuboid::new(CRAB_SIZE.x, CRAB_SIZE.y, CRAB_SIZE.x));
    let crab_material = materials.add(Color::srgb(0.85, 0.3, 0.2));

    let anchors = [
        (Vec3::new(9.0, 0.0, 3.0), 3.0),
        (Vec3::new(10.0, 0.0, -6.0), 2.5),
        (Vec3::new(-3.0, 0.0, 8.0), 4.0),
        (Vec3::new(-8.0, 0.0, 0.0), 3.0),
        (Vec3::new(0.0, 0.0, -10.0), 5.0),
        (Vec3::new(14.0, 0.0, 12.0), 2.0),
    ];
    for (i, (anchor, radius)) in anchors.into_iter().enumerate() {
        let wander = Wander {
            anchor,
            radius,
            speed: 0.4 + 0.1 * i as f32,
            phase: i as f32 * 1.3,
        };
        commands
            .spawn((
                Transform::from_translation(wander.position_at(0.0)),
                Visibility::default(),
                Trackable::new("turtle", TURTLE_SIZE.x, TURTLE_SIZE.y),
                wander,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(shell.clone()),
                    MeshMaterial3d(shell_material.clone()),
                    Transform::from_xyz(0.0, TURTLE_SIZE.y / 2.0, 0.0),
                ));
            });
    }

    for (i, anchor) in [Vec3::new(6.0, 0.0, 10.0), Vec3::new(-12.0, 0.0, -12.0)]
        .into_iter()
        .enumerate()
    {
        let wander = Wander {
            anchor,
            radius: 2.0,
            speed: 0.9,
            phase: i as f32,
        };
        commands
            .spawn((
                Transform::from_translation(wander.position_at(0.0)),
                Visibility::default(),
                Trackable::new("crab", CRAB_SIZE.x, CRAB_SIZE.y),
                wander,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(crab.clone()),
                    MeshMaterial3d(crab_material.clone()),
                    Transform::from_xyz(0.0, CRAB_SIZE.y / 2.0, 0.0),
                ));
            });
    }
}

fn wander_system(time: Res<Time>, mut query: Query<(&Wander, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (wander, mut transform) in &mut query {
        transform.translation = wander.position_at(elapsed);
    }
}
