//! Interpolation helpers shared by the camera transition and the glass pulse.

use glam::{Quat, Vec3};

/// Hermite smoothstep on the unit interval: `t²(3 − 2t)` after clamping.
///
/// Monotonic non-decreasing with `smoothstep01(0) == 0` and
/// `smoothstep01(1) == 1`.
#[inline]
pub fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Position lerp with smoothstep easing applied to `t`.
#[inline]
pub fn eased_lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, smoothstep01(t))
}

/// Shortest-arc orientation slerp with smoothstep easing applied to `t`.
///
/// glam's slerp already negates one endpoint when the quaternions sit on
/// opposite hemispheres, so the rotation never takes the long way around.
#[inline]
pub fn eased_slerp(a: Quat, b: Quat, t: f32) -> Quat {
    a.slerp(b, smoothstep01(t)).normalize()
}
