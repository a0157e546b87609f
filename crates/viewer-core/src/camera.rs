//! Projection-side camera description shared with the web frontend.
//!
//! The rig (position/orientation) lives in `transition`; this type only
//! carries the lens parameters needed to build the projection matrix.

use glam::Mat4;

use crate::constants::DEFAULT_FOVY_RADIANS;

/// Simple right-handed perspective lens.
#[derive(Clone, Debug)]
pub struct CameraLens {
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            aspect: 1.0,
            fovy_radians: DEFAULT_FOVY_RADIANS,
            znear: 0.01,
            zfar: 1000.0,
        }
    }
}

impl CameraLens {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Re-derive near/far planes from the framing distance so depth precision
    /// tracks the model scale.
    pub fn fit_clip_planes(&mut self, framing_distance: f32) {
        if framing_distance > 0.0 {
            self.znear = framing_distance / 100.0;
            self.zfar = framing_distance * 100.0;
        }
    }
}
