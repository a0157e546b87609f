// Host-side tests for the free-look orbit controller math.

use glam::{Quat, Vec3};
use viewer_core::{CameraRig, OrbitController, Pose, ORBIT_PITCH_LIMIT};

fn pose_at(position: Vec3, target: Vec3) -> Pose {
    Pose {
        position,
        orientation: Quat::IDENTITY,
        target,
    }
}

#[test]
fn sync_then_write_round_trips_the_eye() {
    let pose = pose_at(Vec3::new(2.0, 1.5, 4.0), Vec3::new(0.5, 0.0, -1.0));
    let mut orbit = OrbitController::default();
    orbit.sync_to_pose(&pose);

    let mut rig = CameraRig::default();
    orbit.write_rig(&mut rig);
    assert!(rig.position.distance(pose.position) < 1e-4);
}

#[test]
fn written_orientation_looks_at_the_target() {
    let pose = pose_at(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO);
    let mut orbit = OrbitController::default();
    orbit.sync_to_pose(&pose);

    let mut rig = CameraRig::default();
    orbit.write_rig(&mut rig);
    let forward = rig.orientation * Vec3::NEG_Z;
    let expected = (pose.target - pose.position).normalize();
    assert!(forward.distance(expected) < 1e-4);
}

#[test]
fn drag_preserves_distance_to_target() {
    let pose = pose_at(Vec3::new(3.0, 1.0, 3.0), Vec3::ZERO);
    let mut orbit = OrbitController::default();
    orbit.sync_to_pose(&pose);
    let distance = orbit.distance;

    orbit.apply_drag(123.0, -45.0);
    assert!((orbit.eye().length() - distance).abs() < 1e-4);
}

#[test]
fn pitch_is_clamped_shy_of_the_poles() {
    let pose = pose_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
    let mut orbit = OrbitController::default();
    orbit.sync_to_pose(&pose);

    orbit.apply_drag(0.0, 1e6);
    assert!(orbit.pitch <= ORBIT_PITCH_LIMIT);
    orbit.apply_drag(0.0, -1e6);
    assert!(orbit.pitch >= -ORBIT_PITCH_LIMIT);
}
