//! Camera rig and the view-to-view transition state machine.
//!
//! At most one transition is in flight; requesting a view while one is active
//! overwrites it, restarting from the rig's current live pose. "No
//! transition" is the `Idle` variant, not a flag.

use std::time::Duration;

use glam::{Mat4, Quat, Vec3};

use crate::constants::CAMERA_TRANSITION_SECS;
use crate::math::{eased_lerp, eased_slerp};
use crate::views::Pose;

#[derive(Clone, Debug, Default)]
pub enum Transition {
    #[default]
    Idle,
    Active {
        from_position: Vec3,
        from_orientation: Quat,
        to_position: Vec3,
        to_orientation: Quat,
        elapsed: f32,
        duration: f32,
    },
}

/// The live camera: current pose, the selected view name, and whether the
/// user's orbit drag is allowed to write the pose this frame.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub orientation: Quat,
    pub active_view: Option<String>,
    pub drag_enabled: bool,
    pub transition: Transition,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            active_view: None,
            drag_enabled: false,
            transition: Transition::Idle,
        }
    }
}

impl CameraRig {
    /// Set the pose immediately, cancelling any in-flight transition. Used
    /// for the free-look view and the post-load framing fallback.
    pub fn snap_to(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
        self.transition = Transition::Idle;
    }

    /// Begin a timed move from the current live pose (which may itself be
    /// mid-transition) to `pose`. Overwrites any active transition.
    pub fn begin_transition(&mut self, pose: &Pose) {
        self.transition = Transition::Active {
            from_position: self.position,
            from_orientation: self.orientation,
            to_position: pose.position,
            to_orientation: pose.orientation,
            elapsed: 0.0,
            duration: CAMERA_TRANSITION_SECS,
        };
    }

    /// Advance the active transition by `dt`; no-op while `Idle`. At `t >= 1`
    /// the rig lands on the exact target pose and the transition terminates.
    pub fn advance(&mut self, dt: Duration) {
        let Transition::Active {
            from_position,
            from_orientation,
            to_position,
            to_orientation,
            elapsed,
            duration,
        } = &mut self.transition
        else {
            return;
        };
        *elapsed += dt.as_secs_f32();
        let t = (*elapsed / *duration).clamp(0.0, 1.0);
        if t >= 1.0 {
            self.position = *to_position;
            self.orientation = *to_orientation;
            self.transition = Transition::Idle;
        } else {
            self.position = eased_lerp(*from_position, *to_position, t);
            self.orientation = eased_slerp(*from_orientation, *to_orientation, t);
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.transition, Transition::Active { .. })
    }

    /// World-to-view matrix for the renderer.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }
}
