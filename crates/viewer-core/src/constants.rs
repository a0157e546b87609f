use glam::Vec3;

// Shared tuning constants used by the core state machines and the web frontend.

// Camera
pub const CAMERA_TRANSITION_SECS: f32 = 0.8; // scripted view-to-view moves
pub const DEFAULT_FOVY_RADIANS: f32 = 50.0 * std::f32::consts::PI / 180.0;
pub const FRAMING_MARGIN: f32 = 1.4; // extra distance so the model never touches the frame

// Glass pulse
pub const PULSE_HOLD_SECS: f32 = 2.0; // hold at either end of the cycle
pub const PULSE_FADE_SECS: f32 = 1.5; // colored <-> neutral fade
pub const PULSE_NEUTRAL: [f32; 3] = [1.0, 1.0, 1.0];

// Glass material
pub const GLASS_IOR: f32 = 1.45;
pub const GLASS_TRANSMISSION: f32 = 0.0;
pub const LOGO_EMISSIVE_INTENSITY: f32 = 0.35; // fixed logo overlay brightness

// Free-look orbit
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;
pub const ORBIT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.05;

#[inline]
pub fn pulse_neutral_vec3() -> Vec3 {
    Vec3::new(PULSE_NEUTRAL[0], PULSE_NEUTRAL[1], PULSE_NEUTRAL[2])
}
