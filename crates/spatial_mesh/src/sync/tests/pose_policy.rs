//! Pose application gating under both policies

use super::{pose_at, Harness};
use crate::config::{PosePolicy, SyncConfig};
use crate::foundation::math::{Quat, Vec3};
use crate::scene::SceneGraph;
use crate::sensing::simulated::SimulatedFrame;
use crate::sensing::{DetectedSurface, RigidTransform};
use approx::assert_relative_eq;

const EPSILON: f32 = 1e-5;

#[test]
fn test_pose_applied_on_create() {
    let mut harness = Harness::new();
    let surface = harness.triangle();
    let pose = RigidTransform::new(
        Vec3::new(0.0, 1.5, -2.0),
        Quat::from_axis_angle(&Vec3::y_axis(), 0.6),
    );

    let report = harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose));

    assert_eq!(report.posed, 1);
    let node = harness.engine.tracked(surface.key()).unwrap().node;
    let world = harness.scene.world_transform(node).unwrap();
    assert_relative_eq!(world.position, pose.position, epsilon = EPSILON);
    assert_relative_eq!(world.rotation, pose.orientation, epsilon = EPSILON);
}

#[test]
fn test_changed_only_keeps_stale_pose_for_unchanged_surface() {
    let mut harness = Harness::new();
    let surface = harness.triangle();
    harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(1.0, 0.0, 0.0)));

    // Surface moved but its geometry did not change
    let report = harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(5.0, 0.0, 0.0)));

    assert_eq!(report.skipped, 1);
    assert_eq!(report.posed, 0);
    let node = harness.engine.tracked(surface.key()).unwrap().node;
    let world = harness.scene.world_transform(node).unwrap();
    assert_relative_eq!(world.position, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
}

#[test]
fn test_changed_only_reapplies_pose_on_update() {
    let mut harness = Harness::new();
    let mut surface = harness.triangle();
    harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(1.0, 0.0, 0.0)));

    let stamp = harness.later();
    surface.touch(stamp);
    let report = harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(5.0, 0.0, 0.0)));

    assert_eq!(report.updated, 1);
    assert_eq!(report.posed, 1);
    let node = harness.engine.tracked(surface.key()).unwrap().node;
    let world = harness.scene.world_transform(node).unwrap();
    assert_relative_eq!(world.position, Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);
}

#[test]
fn test_every_tick_reapplies_pose_for_unchanged_surface() {
    let mut harness = Harness::with_config(SyncConfig::default().with_pose_policy(PosePolicy::EveryTick));
    let surface = harness.triangle();
    harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(1.0, 0.0, 0.0)));

    let report = harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(5.0, 0.0, 0.0)));

    assert_eq!(report.skipped, 1);
    assert_eq!(report.posed, 1);
    let node = harness.engine.tracked(surface.key()).unwrap().node;
    let world = harness.scene.world_transform(node).unwrap();
    assert_relative_eq!(world.position, Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);
}

#[test]
fn test_every_tick_poses_even_when_rewrite_fails() {
    let mut harness = Harness::with_config(SyncConfig::default().with_pose_policy(PosePolicy::EveryTick));
    let mut surface = harness.triangle();
    harness.step(&SimulatedFrame::new().with_surface(surface.clone()));

    let stamp = harness.later();
    surface.remesh(vec![0.0; 3], vec![0, 1, 2], stamp);
    let report = harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(0.0, 2.0, 0.0)));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.posed, 1);
    let node = harness.engine.tracked(surface.key()).unwrap().node;
    let world = harness.scene.world_transform(node).unwrap();
    assert_relative_eq!(world.position, Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
}

#[test]
fn test_unresolved_pose_leaves_previous_transform() {
    let mut harness = Harness::with_config(SyncConfig::default().with_pose_policy(PosePolicy::EveryTick));
    let surface = harness.triangle();
    harness.step(&SimulatedFrame::new().with_posed_surface(surface.clone(), pose_at(3.0, 0.0, 0.0)));

    let report = harness.step(&SimulatedFrame::new().with_surface(surface.clone()));

    assert_eq!(report.posed, 0);
    let node = harness.engine.tracked(surface.key()).unwrap().node;
    let world = harness.scene.world_transform(node).unwrap();
    assert_relative_eq!(world.position, Vec3::new(3.0, 0.0, 0.0), epsilon = EPSILON);
}
