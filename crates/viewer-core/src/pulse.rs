//! Glass pulse animator: a four-phase color cycle on the glass materials,
//! active only while the inspection view is selected.
//!
//! One shared timer drives every handle. Leaving the inspection view is a
//! hard reset: phase back to `WaitColored`, timer zeroed, every material
//! forced to its captured original color.

use std::time::Duration;

use crate::constants::{pulse_neutral_vec3, PULSE_FADE_SECS, PULSE_HOLD_SECS};
use crate::materials::GlassHandle;
use crate::math::smoothstep01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PulsePhase {
    #[default]
    WaitColored,
    ToNeutral,
    WaitNeutral,
    ToColored,
}

#[derive(Clone, Debug, Default)]
pub struct GlassPulse {
    pub phase: PulsePhase,
    pub timer: f32,
}

impl GlassPulse {
    pub fn reset(&mut self) {
        self.phase = PulsePhase::WaitColored;
        self.timer = 0.0;
    }

    /// Advance by `dt`. `in_inspection_view` gates the whole animator; while
    /// false the cycle stays reset and originals are restored.
    pub fn advance(&mut self, dt: Duration, in_inspection_view: bool, handles: &mut [GlassHandle]) {
        if !in_inspection_view {
            self.reset();
            for h in handles {
                h.material.base_color = h.original_color;
            }
            return;
        }

        self.timer += dt.as_secs_f32();
        // Phases exit strictly after their duration so a large dt rolls the
        // excess into the next phase.
        loop {
            let phase_len = self.phase_duration();
            if self.timer <= phase_len {
                break;
            }
            self.timer -= phase_len;
            self.phase = self.next_phase();
        }

        let neutral = pulse_neutral_vec3();
        for h in handles {
            h.material.base_color = match self.phase {
                PulsePhase::WaitColored => h.original_color,
                PulsePhase::WaitNeutral => neutral,
                PulsePhase::ToNeutral => {
                    h.original_color
                        .lerp(neutral, smoothstep01(self.timer / PULSE_FADE_SECS))
                }
                PulsePhase::ToColored => {
                    neutral.lerp(h.original_color, smoothstep01(self.timer / PULSE_FADE_SECS))
                }
            };
        }
    }

    fn phase_duration(&self) -> f32 {
        match self.phase {
            PulsePhase::WaitColored | PulsePhase::WaitNeutral => PULSE_HOLD_SECS,
            PulsePhase::ToNeutral | PulsePhase::ToColored => PULSE_FADE_SECS,
        }
    }

    fn next_phase(&self) -> PulsePhase {
        match self.phase {
            PulsePhase::WaitColored => PulsePhase::ToNeutral,
            PulsePhase::ToNeutral => PulsePhase::WaitNeutral,
            PulsePhase::WaitNeutral => PulsePhase::ToColored,
            PulsePhase::ToColored => PulsePhase::WaitColored,
        }
    }
}
