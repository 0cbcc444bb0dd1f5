use bevy::prelude::*;

use crate::data::{ObserverPose, TargetId, WorldObject};
use crate::error::CycleError;
use crate::plugin::{
    OccluderResource, OverlayFrame, OverlayResource, Trackable, TrackerResource, Viewpoint,
};
use crate::render::BackendResource;

fn viewpoint_pose(viewpoints: &Query<(&GlobalTransform, &Viewpoint)>) -> Option<ObserverPose> {
    let (transform, viewpoint) = viewpoints.get_single().ok()?;
    let eye = transform.translation();
    Some(ObserverPose {
        position: eye - Vec3::Y * viewpoint.eye_height,
        eye,
        look: *transform.forward(),
    })
}

pub(crate) fn update_cycle_system(
    mut tracker: ResMut<TrackerResource>,
    occluder: Res<OccluderResource>,
    viewpoints: Query<(&GlobalTransform, &Viewpoint)>,
    targets: Query<(Entity, &GlobalTransform, &Trackable)>,
) {
    let observer = viewpoint_pose(&viewpoints);
    let index: Vec<WorldObject> = targets
        .iter()
        .map(|(entity, transform, trackable)| WorldObject {
            id: TargetId(entity.to_bits()),
            kind: trackable.kind.clone(),
            position: transform.translation(),
            bounding_size: Vec2::new(trackable.width, trackable.height),
        })
        .collect();

    if let Err(CycleError::TransientAbsence) =
        tracker.0.update_cycle(&observer, &index, occluder.0.as_ref())
    {
        debug!("sightline: no observer this cycle, keeping previous snapshot");
    }
}

/// A despawned viewpoint means the world went away; stop drawing the old view.
pub(crate) fn reset_on_viewpoint_removed(
    mut removed: RemovedComponents<Viewpoint>,
    viewpoints: Query<(), With<Viewpoint>>,
    mut tracker: ResMut<TrackerResource>,
) {
    if removed.read().count() > 0 && viewpoints.is_empty() {
        tracker.0.reset();
        info!("sightline: viewpoint removed, tracking reset");
    }
}

pub(crate) fn render_cycle_system(
    time: Res<Time>,
    tracker: Res<TrackerResource>,
    mut overlay: ResMut<OverlayResource>,
    viewpoints: Query<(&GlobalTransform, &Viewpoint)>,
    mut frame: ResMut<OverlayFrame>,
) {
    let observer = viewpoint_pose(&viewpoints);
    let snapshot = tracker.0.latest();
    frame.0 = overlay
        .0
        .compose_frame(snapshot.as_deref(), &observer, time.delta_secs());
}

pub(crate) fn submit_backend_system(
    frame: Res<OverlayFrame>,
    backend: Option<ResMut<BackendResource>>,
) {
    let Some(mut backend) = backend else {
        return;
    };
    if let Err(err) = backend.0.submit(&frame.0) {
        warn!("sightline: overlay submission failed: {err}");
    }
}

#[cfg(feature = "gizmos")]
pub(crate) fn submit_gizmos_system(mut gizmos: Gizmos, frame: Res<OverlayFrame>) {
    use crate::render::{GizmoBackend, RenderBackend};

    if let Err(err) = GizmoBackend::new(&mut gizmos).submit(&frame.0) {
        warn!("sightline: gizmo submission failed: {err}");
    }
}

/// Overlay lines draw on top of the world, like the highlight they replace.
#[cfg(feature = "gizmos")]
pub(crate) fn configure_gizmos(
    mut store: ResMut<GizmoConfigStore>,
    settings: Res<crate::config::TrackerSettings>,
) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = settings.line_width;
    config.depth_bias = -1.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerSettings;
    use crate::data::{Voxel, VoxelGrid};
    use crate::render::{ChannelBackend, DrawPrimitive};
    use crate::tracking::{OverlayRenderer, Tracker};

    fn test_app(grid: VoxelGrid) -> App {
        let settings = TrackerSettings::default();
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(TrackerResource(Tracker::from_settings(&settings)))
            .insert_resource(OverlayResource(OverlayRenderer::from_settings(&settings)))
            .insert_resource(OccluderResource::new(grid))
            .init_resource::<OverlayFrame>()
            .add_systems(
                Update,
                (
                    update_cycle_system,
                    reset_on_viewpoint_removed,
                    render_cycle_system,
                    submit_backend_system,
                )
                    .chain(),
            );
        app
    }

    fn spawn_viewpoint(app: &mut App) -> Entity {
        let transform = Transform::from_xyz(0.5, 1.62, 0.5).looking_to(Vec3::X, Vec3::Y);
        app.world_mut()
            .spawn((
                transform,
                GlobalTransform::from(transform),
                Viewpoint::default(),
            ))
            .id()
    }

    fn spawn_target(app: &mut App, kind: &str, position: Vec3) -> Entity {
        app.world_mut()
            .spawn((
                Transform::from_translation(position),
                GlobalTransform::from_translation(position),
                Trackable::new(kind, 1.2, 0.4),
            ))
            .id()
    }

    #[test]
    fn update_cycle_publishes_tracked_entities() {
        let mut grid = VoxelGrid::new();
        grid.fill(IVec3::new(0, 0, 4), IVec3::new(0, 3, 4), Voxel::Solid);
        let mut app = test_app(grid);
        spawn_viewpoint(&mut app);
        let clear = spawn_target(&mut app, "turtle", Vec3::new(8.5, 0.0, 0.5));
        let hidden = spawn_target(&mut app, "turtle", Vec3::new(0.5, 0.0, 9.5));
        spawn_target(&mut app, "zombie", Vec3::new(3.5, 0.0, 0.5));

        app.update();

        let tracker = app.world().resource::<TrackerResource>();
        let snapshot = tracker.0.latest().unwrap();
        assert_eq!(snapshot.total_count(), 2);
        assert!(snapshot.is_visible(TargetId(clear.to_bits())));
        assert!(!snapshot.is_visible(TargetId(hidden.to_bits())));

        let frame = app.world().resource::<OverlayFrame>();
        let boxes = frame
            .0
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::Box { .. }))
            .count();
        assert_eq!(boxes, 1);
    }

    #[test]
    fn no_viewpoint_means_no_snapshot() {
        let mut app = test_app(VoxelGrid::new());
        spawn_target(&mut app, "turtle", Vec3::new(4.0, 0.0, 0.0));

        app.update();

        assert!(app.world().resource::<TrackerResource>().0.latest().is_none());
        assert!(app.world().resource::<OverlayFrame>().0.is_empty());
    }

    #[test]
    fn despawning_the_viewpoint_resets_tracking() {
        let mut app = test_app(VoxelGrid::new());
        let viewpoint = spawn_viewpoint(&mut app);
        spawn_target(&mut app, "turtle", Vec3::new(6.5, 0.0, 0.5));
        app.update();
        assert!(app.world().resource::<TrackerResource>().0.latest().is_some());

        app.world_mut().despawn(viewpoint);
        app.update();

        assert!(app.world().resource::<TrackerResource>().0.latest().is_none());
    }

    #[test]
    fn frames_reach_an_extra_backend() {
        let mut app = test_app(VoxelGrid::new());
        let (backend, rx) = ChannelBackend::bounded(8);
        app.insert_resource(BackendResource::new(backend));
        spawn_viewpoint(&mut app);
        spawn_target(&mut app, "turtle", Vec3::new(10.5, 0.0, 0.5));

        app.update();

        let frame = rx.try_recv().unwrap();
        assert_eq!(frame.len(), 2);
    }
}
