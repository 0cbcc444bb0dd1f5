//! Demo voxel world: floor, a stone wall and a water pool.

use bevy::prelude::*;

use crate::data::{Voxel, VoxelGrid};
use crate::plugin::Viewpoint;
use crate::scene::OrbitCamera;

const HALF_EXTENT: i32 = 20;

/// The voxel field the demo renders and casts against.
#[derive(Resource, Clone)]
pub struct DemoWorld(pub VoxelGrid);

impl Default for DemoWorld {
    fn default() -> Self {
        Self(demo_grid())
    }
}

pub fn demo_grid() -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    grid.fill(
        IVec3::new(-HALF_EXTENT, -1, -HALF_EXTENT),
        IVec3::new(HALF_EXTENT - 1, -1, HALF_EXTENT - 1),
        Voxel::Solid,
    );
    // wall with a doorway
    grid.fill(IVec3::new(4, 0, -8), IVec3::new(4, 3, 8), Voxel::Solid);
    grid.fill(IVec3::new(4, 0, -1), IVec3::new(4, 1, 1), Voxel::Air);
    // pool sunk into the floor with a raised water column
    grid.fill(IVec3::new(-10, -1, -4), IVec3::new(-6, 1, 4), Voxel::Fluid);
    grid
}

pub fn setup_scene(
    mut commands: Commands,
    world: Res<DemoWorld>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.45, 0.5),
        ..default()
    });
    let water = materials.add(StandardMaterial {
        base_color: Color::srgba(0.1, 0.35, 0.9, 0.45),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let grass = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.5, 0.2),
        ..default()
    });

    // The floor layer is drawn as one slab; every other cell gets its own cube.
    let extent = (HALF_EXTENT * 2) as f32;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(extent, 1.0, extent))),
        MeshMaterial3d(grass),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));
    for (coord, voxel) in world.0.iter() {
        let material = match voxel {
            Voxel::Solid if coord.y < 0 => continue,
            Voxel::Solid => stone.clone(),
            Voxel::Fluid => water.clone(),
            Voxel::Air => continue,
        };
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(coord.as_vec3() + Vec3::splat(0.5)),
        ));
    }

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-14.0, 6.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
        Viewpoint::default(),
        OrbitCamera::default(),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4., 8., 4.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
