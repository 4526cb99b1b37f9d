//! Central glow geometry. Stateless; recomputed from time and parameters.

use crate::core::constants::*;
use crate::core::params::Parameters;
use crate::core::particles::Viewport;
use glam::Vec2;

/// Two slow, unrelated sinusoids in [0, 1]. Their beat keeps the pulse from
/// sounding or looking metronomic. The audio mapper rides on the same pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breathing {
    pub breathe: f32,
    pub breathe2: f32,
}

impl Breathing {
    /// Phases are taken in `f64` so days of uptime still advance per frame.
    pub fn at(t: f64, speed: f32) -> Self {
        let speed = speed as f64;
        let a = t * BREATHE_RATE * speed;
        let b = t * BREATHE2_RATE * speed + BREATHE2_PHASE;
        Self {
            breathe: 0.5 + 0.5 * a.sin() as f32,
            breathe2: 0.5 + 0.5 * b.sin() as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreGlow {
    pub center: Vec2,
    pub inner_radius: f32,
    pub aura_radius: f32,
    pub ring_radius: f32,
    pub ring_alpha: f32,
    pub breathing: Breathing,
}

impl CoreGlow {
    pub fn compute(t: f64, params: &Parameters, viewport: &Viewport) -> Self {
        let breathing = Breathing::at(t, params.speed);
        let Breathing { breathe, breathe2 } = breathing;
        let r_base = viewport.min_dim() * CORE_RADIUS;
        let inner_radius = r_base * (0.86 + 0.22 * breathe + 0.08 * breathe2);
        Self {
            center: viewport.center(),
            inner_radius,
            aura_radius: r_base * (3.4 + 1.35 * params.glow + 0.6 * params.burst),
            ring_radius: inner_radius * (1.6 + 0.6 * breathe2),
            ring_alpha: 0.05 + 0.09 * params.glow + 0.08 * params.burst,
            breathing,
        }
    }
}
