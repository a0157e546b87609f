// Host-side tests for the interpolation helpers.

use glam::{Quat, Vec3};
use viewer_core::{eased_lerp, eased_slerp, smoothstep01};

#[test]
fn smoothstep_endpoints() {
    assert_eq!(smoothstep01(0.0), 0.0);
    assert_eq!(smoothstep01(1.0), 1.0);
    assert!((smoothstep01(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn smoothstep_clamps_outside_unit_interval() {
    assert_eq!(smoothstep01(-3.0), 0.0);
    assert_eq!(smoothstep01(2.5), 1.0);
}

#[test]
fn smoothstep_is_monotonic_non_decreasing() {
    let mut prev = smoothstep01(0.0);
    for i in 1..=100 {
        let t = i as f32 / 100.0;
        let v = smoothstep01(t);
        assert!(v >= prev, "easing decreased at t={t}");
        prev = v;
    }
}

#[test]
fn eased_lerp_hits_endpoints_exactly() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 0.5, 9.0);
    assert_eq!(eased_lerp(a, b, 0.0), a);
    assert_eq!(eased_lerp(a, b, 1.0), b);
}

#[test]
fn eased_slerp_hits_endpoints() {
    let a = Quat::from_rotation_y(0.3);
    let b = Quat::from_rotation_y(2.1);
    let at0 = eased_slerp(a, b, 0.0);
    let at1 = eased_slerp(a, b, 1.0);
    assert!(at0.dot(a).abs() > 1.0 - 1e-5);
    assert!(at1.dot(b).abs() > 1.0 - 1e-5);
}

#[test]
fn eased_slerp_takes_shortest_arc() {
    // 350 degrees about Y should interpolate through the -10 degree side,
    // never swinging past 90.
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(350.0_f32.to_radians());
    let mid = eased_slerp(a, b, 0.5);
    let angle = mid.angle_between(a).to_degrees();
    assert!(angle < 10.0, "midpoint swung {angle} degrees from start");
}
