// Host-side tests for the glass pulse animator.

use std::time::Duration;

use glam::Vec3;
use viewer_core::{
    pulse_neutral_vec3, GlassHandle, GlassParams, GlassPulse, PhysicalMaterial, PulsePhase,
    PULSE_FADE_SECS, PULSE_HOLD_SECS,
};

const OLIVE: [f32; 3] = [0.12, 0.13, 0.05];

fn make_handles(count: usize) -> Vec<GlassHandle> {
    let params = GlassParams {
        color: OLIVE,
        roughness: 0.03,
        metalness: 0.0,
        opacity: 0.9,
    };
    (0..count)
        .map(|i| {
            let material = PhysicalMaterial::glass(&params);
            GlassHandle {
                node_index: i,
                material,
                original_color: material.base_color,
            }
        })
        .collect()
}

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

#[test]
fn stays_reset_outside_inspection_view() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(2);
    for _ in 0..10 {
        pulse.advance(secs(1.0), false, &mut handles);
    }
    assert_eq!(pulse.phase, PulsePhase::WaitColored);
    assert_eq!(pulse.timer, 0.0);
    for h in &handles {
        assert_eq!(h.material.base_color, Vec3::from(OLIVE));
    }
}

#[test]
fn entering_inspection_starts_at_wait_colored() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(1);
    pulse.advance(secs(5.0), false, &mut handles);
    pulse.advance(secs(0.5), true, &mut handles);
    assert_eq!(pulse.phase, PulsePhase::WaitColored);
    assert!((pulse.timer - 0.5).abs() < 1e-6);
    assert_eq!(handles[0].material.base_color, Vec3::from(OLIVE));
}

#[test]
fn hold_then_fade_reaches_neutral_at_boundary() {
    // 2.0s wait + 1.5s fade: at exactly 3.5s the fade phase is still current
    // and the color is fully neutral.
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(3);
    pulse.advance(secs(PULSE_HOLD_SECS + PULSE_FADE_SECS), true, &mut handles);
    assert_eq!(pulse.phase, PulsePhase::ToNeutral);
    for h in &handles {
        assert!(h.material.base_color.distance(pulse_neutral_vec3()) < 1e-5);
    }
}

#[test]
fn fade_midpoint_is_between_colors() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(1);
    pulse.advance(secs(PULSE_HOLD_SECS + PULSE_FADE_SECS * 0.5), true, &mut handles);
    assert_eq!(pulse.phase, PulsePhase::ToNeutral);
    let c = handles[0].material.base_color;
    let original = Vec3::from(OLIVE);
    assert!(c.distance(original) > 1e-3);
    assert!(c.distance(pulse_neutral_vec3()) > 1e-3);
}

#[test]
fn large_dt_carries_excess_into_next_phase() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(1);
    // 4.0s = 2.0 wait + 1.5 fade + 0.5 into the neutral hold
    pulse.advance(secs(4.0), true, &mut handles);
    assert_eq!(pulse.phase, PulsePhase::WaitNeutral);
    assert!((pulse.timer - 0.5).abs() < 1e-5);
    assert!(handles[0].material.base_color.distance(pulse_neutral_vec3()) < 1e-5);
}

#[test]
fn full_cycle_returns_to_original_color() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(2);
    let cycle = 2.0 * PULSE_HOLD_SECS + 2.0 * PULSE_FADE_SECS;
    // Step in small increments through slightly more than one full cycle
    let steps = 800;
    for _ in 0..steps {
        pulse.advance(secs((cycle + 0.4) / steps as f32), true, &mut handles);
    }
    assert_eq!(pulse.phase, PulsePhase::WaitColored);
    for h in &handles {
        assert!(h.material.base_color.distance(Vec3::from(OLIVE)) < 1e-4);
    }
}

#[test]
fn leaving_mid_fade_is_a_hard_reset() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(2);
    pulse.advance(secs(PULSE_HOLD_SECS + 0.7), true, &mut handles);
    assert_eq!(pulse.phase, PulsePhase::ToNeutral);
    assert!(handles[0]
        .material
        .base_color
        .distance(Vec3::from(OLIVE))
        > 1e-3);

    pulse.advance(secs(0.016), false, &mut handles);
    assert_eq!(pulse.phase, PulsePhase::WaitColored);
    assert_eq!(pulse.timer, 0.0);
    for h in &handles {
        assert_eq!(h.material.base_color, Vec3::from(OLIVE));
    }
}

#[test]
fn shared_timer_drives_all_handles_identically() {
    let mut pulse = GlassPulse::default();
    let mut handles = make_handles(4);
    pulse.advance(secs(PULSE_HOLD_SECS + 0.9), true, &mut handles);
    let first = handles[0].material.base_color;
    for h in &handles[1..] {
        assert_eq!(h.material.base_color, first);
    }
}
