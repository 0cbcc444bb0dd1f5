use std::collections::HashSet;

use bevy::math::{IVec3, Vec2, Vec3};
use target_tracker::prelude::*;
use target_tracker::tracking::SpatialScanner;

const FRAME: f32 = 1.0 / 60.0;

fn object(id: u64, kind: &str, position: Vec3) -> WorldObject {
    WorldObject {
        id: TargetId(id),
        kind: kind.into(),
        position,
        bounding_size: Vec2::new(1.2, 0.4),
    }
}

fn observer() -> Option<ObserverPose> {
    Some(ObserverPose {
        position: Vec3::ZERO,
        eye: Vec3::new(0.5, 0.5, 0.5),
        look: Vec3::X,
    })
}

/// A clear target at ~10, one behind a wall at ~20 and one out of range at 70.
fn scenario() -> (Vec<WorldObject>, VoxelGrid) {
    let world = vec![
        object(1, "turtle", Vec3::new(10.5, 0.3, 0.5)),
        object(2, "turtle", Vec3::new(-19.5, 0.3, 0.5)),
        object(3, "turtle", Vec3::new(70.0, 0.3, 0.5)),
    ];
    let mut grid = VoxelGrid::new();
    grid.set(IVec3::new(-10, 0, 0), Voxel::Solid);
    (world, grid)
}

#[test]
fn end_to_end_frame_has_one_box_and_one_tracer() {
    let settings = TrackerSettings::default();
    let (world, grid) = scenario();
    let mut tracker = Tracker::from_settings(&settings);
    let mut overlay = OverlayRenderer::from_settings(&settings);

    let snapshot = tracker
        .update_cycle(&observer(), &world, &grid)
        .expect("observer present");
    assert_eq!(snapshot.total_count(), 2);
    assert_eq!(snapshot.visible_count(), 1);
    assert!(snapshot.is_visible(TargetId(1)));
    assert!(!snapshot.is_visible(TargetId(2)));

    let (mut backend, rx) = ChannelBackend::bounded(4);
    let submitted = overlay
        .render_cycle(Some(&*snapshot), &observer(), FRAME, &mut backend)
        .expect("channel has room");
    let frame = rx.try_recv().expect("frame submitted");

    assert_eq!(submitted, 2);
    let boxes = frame
        .iter()
        .filter(|p| matches!(p, DrawPrimitive::Box { .. }))
        .count();
    let lines = frame
        .iter()
        .filter(|p| matches!(p, DrawPrimitive::Line { .. }))
        .count();
    assert_eq!((boxes, lines), (1, 1));
}

#[test]
fn visible_targets_are_a_subset_of_all_and_unique() {
    let mut world = vec![
        object(7, "turtle", Vec3::new(3.5, 0.0, 3.5)),
        object(8, "turtle", Vec3::new(-5.5, 0.0, 2.5)),
        object(9, "crab", Vec3::new(2.5, 0.0, -1.5)),
        object(10, "turtle", Vec3::new(0.5, 0.0, -12.5)),
    ];
    world.push(world[0].clone());
    world.push(world[3].clone());
    let mut grid = VoxelGrid::new();
    grid.fill(IVec3::new(-3, 0, -3), IVec3::new(-3, 3, 5), Voxel::Solid);

    let mut tracker = Tracker::from_settings(&TrackerSettings::default());
    let snapshot = tracker.update_cycle(&observer(), &world, &grid).unwrap();

    let all: Vec<TargetId> = snapshot.all.iter().map(|s| s.id).collect();
    let unique: HashSet<TargetId> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len());
    assert_eq!(unique, HashSet::from([TargetId(7), TargetId(8), TargetId(10)]));
    assert!(snapshot.visible.iter().all(|s| unique.contains(&s.id)));
    assert!(!snapshot.is_visible(TargetId(8)));
}

#[test]
fn scanner_keeps_first_duplicate_within_radius() {
    let scanner = SpatialScanner::for_kind("turtle");
    let first = object(4, "turtle", Vec3::new(1.0, 0.0, 0.0));
    let mut moved = first.clone();
    moved.position = Vec3::new(2.0, 0.0, 0.0);
    let index = vec![first.clone(), moved, object(5, "turtle", Vec3::new(0.0, 0.0, 30.0))];

    let samples = scanner.scan(Vec3::ZERO, 16.0, &index);

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].position, first.position);
}

#[test]
fn hidden_target_disappears_from_next_frame() {
    let settings = TrackerSettings::default();
    let (mut world, grid) = scenario();
    let mut tracker = Tracker::from_settings(&settings);
    let mut overlay = OverlayRenderer::from_settings(&settings);

    let snapshot = tracker.update_cycle(&observer(), &world, &grid).unwrap();
    overlay.compose_frame(Some(&*snapshot), &observer(), FRAME);
    assert!(overlay.smoother().entry(TargetId(1)).is_some());

    // walk the clear target behind the wall
    world[0].position = Vec3::new(-14.5, 0.3, 0.5);
    let snapshot = tracker.update_cycle(&observer(), &world, &grid).unwrap();
    let frame = overlay.compose_frame(Some(&*snapshot), &observer(), FRAME);

    assert_eq!(snapshot.visible_count(), 0);
    assert!(frame.is_empty());
    assert!(overlay.smoother().entry(TargetId(1)).is_none());
}
