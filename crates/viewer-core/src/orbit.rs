//! Free-look orbit math. Pointer wiring lives in the web crate; this half is
//! pure so the drag behavior is testable on the host.

use glam::{Mat4, Quat, Vec3};

use crate::constants::{ORBIT_PITCH_LIMIT, ORBIT_RADIANS_PER_PIXEL};
use crate::transition::CameraRig;
use crate::views::Pose;

#[derive(Clone, Debug)]
pub struct OrbitController {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 1.0,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl OrbitController {
    /// Derive yaw/pitch/distance from a pose so free-look picks up exactly
    /// where the scripted camera left the rig.
    pub fn sync_to_pose(&mut self, pose: &Pose) {
        let offset = pose.position - pose.target;
        self.target = pose.target;
        self.distance = offset.length().max(1e-4);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
    }

    /// Apply a pointer delta in pixels. Pitch is clamped shy of the poles so
    /// the look-at basis stays well defined.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ORBIT_RADIANS_PER_PIXEL;
        self.pitch =
            (self.pitch + dy * ORBIT_RADIANS_PER_PIXEL).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    pub fn eye(&self) -> Vec3 {
        let (ys, yc) = self.yaw.sin_cos();
        let (ps, pc) = self.pitch.sin_cos();
        self.target + Vec3::new(self.distance * pc * ys, self.distance * ps, self.distance * pc * yc)
    }

    /// Write the orbit pose onto the rig. Called by the frame driver only
    /// while the rig has drag enabled, after any transition update.
    pub fn write_rig(&self, rig: &mut CameraRig) {
        let eye = self.eye();
        rig.position = eye;
        rig.orientation = Quat::from_mat4(&Mat4::look_at_rh(eye, self.target, Vec3::Y).inverse());
    }
}
