// Host-side tests for the camera rig transition state machine.

use std::time::Duration;

use glam::{Quat, Vec3};
use viewer_core::{CameraRig, Pose, Transition, CAMERA_TRANSITION_SECS};

fn pose(position: Vec3, yaw: f32) -> Pose {
    Pose {
        position,
        orientation: Quat::from_rotation_y(yaw),
        target: Vec3::ZERO,
    }
}

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

#[test]
fn advance_is_noop_while_idle() {
    let mut rig = CameraRig::default();
    rig.snap_to(&pose(Vec3::new(1.0, 2.0, 3.0), 0.4));
    let before = rig.position;
    rig.advance(secs(0.5));
    assert_eq!(rig.position, before);
    assert!(!rig.is_transitioning());
}

#[test]
fn transition_starts_at_from_pose_and_ends_at_target() {
    let from = pose(Vec3::ZERO, 0.0);
    let to = pose(Vec3::new(10.0, 0.0, 0.0), 1.2);
    let mut rig = CameraRig::default();
    rig.snap_to(&from);
    rig.begin_transition(&to);

    rig.advance(Duration::ZERO);
    assert_eq!(rig.position, from.position);

    rig.advance(secs(CAMERA_TRANSITION_SECS + 0.01));
    assert_eq!(rig.position, to.position);
    assert!(rig.orientation.dot(to.orientation).abs() > 1.0 - 1e-6);
    assert!(!rig.is_transitioning());
}

#[test]
fn exact_duration_lands_on_target() {
    let to = pose(Vec3::new(-3.0, 4.0, 1.0), -0.7);
    let mut rig = CameraRig::default();
    rig.begin_transition(&to);
    rig.advance(secs(CAMERA_TRANSITION_SECS));
    assert_eq!(rig.position, to.position);
    assert!(!rig.is_transitioning());
}

#[test]
fn midpoint_is_eased_not_linear() {
    let to = pose(Vec3::new(10.0, 0.0, 0.0), 0.0);
    let mut rig = CameraRig::default();
    rig.begin_transition(&to);
    // Quarter of the duration: smoothstep(0.25) = 0.15625
    rig.advance(secs(CAMERA_TRANSITION_SECS * 0.25));
    assert!((rig.position.x - 1.5625).abs() < 1e-3, "x = {}", rig.position.x);
}

#[test]
fn retarget_mid_flight_restarts_from_live_pose() {
    let first = pose(Vec3::new(8.0, 0.0, 0.0), 0.0);
    let mut rig = CameraRig::default();
    rig.begin_transition(&first);
    rig.advance(secs(CAMERA_TRANSITION_SECS * 0.5));
    let live = rig.position;
    assert!(live.x > 0.0 && live.x < 8.0);

    let second = pose(Vec3::new(0.0, 5.0, 0.0), 0.3);
    rig.begin_transition(&second);
    match &rig.transition {
        Transition::Active { from_position, .. } => {
            assert_eq!(*from_position, live, "restart must use the interpolated pose");
        }
        Transition::Idle => panic!("expected an active transition"),
    }

    // And it still converges to the new target.
    rig.advance(secs(CAMERA_TRANSITION_SECS));
    assert_eq!(rig.position, second.position);
}

#[test]
fn retarget_to_same_view_converges() {
    let target = pose(Vec3::new(4.0, 4.0, 4.0), 0.9);
    let mut rig = CameraRig::default();
    rig.begin_transition(&target);
    rig.advance(secs(0.4));
    rig.begin_transition(&target);
    rig.advance(secs(CAMERA_TRANSITION_SECS));
    assert_eq!(rig.position, target.position);
}

#[test]
fn many_small_steps_converge_to_target() {
    let to = pose(Vec3::new(2.0, -1.0, 6.0), 2.0);
    let mut rig = CameraRig::default();
    rig.begin_transition(&to);
    for _ in 0..120 {
        rig.advance(secs(1.0 / 120.0));
    }
    assert!(rig.position.distance(to.position) < 1e-3);
    assert!(!rig.is_transitioning());
}
