//! Continuous parameters and their exponential follower.

use crate::core::constants::*;
use crate::core::mode::Mode;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep of `t` clamped into [0, 1].
#[inline]
pub fn smoothstep01(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Fixed per-mode destination for the live parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetVector {
    pub speed: f32,
    pub glow: f32,
    pub drift: f32,
    pub burst: f32,
}

impl TargetVector {
    const fn from_array(v: [f32; 4]) -> Self {
        Self {
            speed: v[0],
            glow: v[1],
            drift: v[2],
            burst: v[3],
        }
    }

    pub const CALM: TargetVector = TargetVector::from_array(CALM_TARGET);
    pub const ACTIVE: TargetVector = TargetVector::from_array(ACTIVE_TARGET);
    pub const SURGE: TargetVector = TargetVector::from_array(SURGE_TARGET);

    pub fn for_mode(mode: Mode) -> TargetVector {
        match mode {
            Mode::Calm => TargetVector::CALM,
            Mode::Active => TargetVector::ACTIVE,
            Mode::Surge => TargetVector::SURGE,
        }
    }
}

/// Live, continuously interpolated state read by every downstream component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    pub speed: f32,
    pub glow: f32,
    pub drift: f32,
    pub burst: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        TargetVector::CALM.into()
    }
}

impl From<TargetVector> for Parameters {
    fn from(t: TargetVector) -> Self {
        Self {
            speed: t.speed,
            glow: t.glow,
            drift: t.drift,
            burst: t.burst,
        }
    }
}

impl Parameters {
    /// Particle energy in [0, 1] derived from glow.
    #[inline]
    pub fn bias(&self) -> f32 {
        smoothstep01((self.glow - BIAS_GLOW_OFFSET) / BIAS_GLOW_SPAN)
    }
}

/// Frame-rate independent smoothing factor for a step of `dt_sec`.
#[inline]
pub fn follow_factor(dt_sec: f32) -> f32 {
    1.0 - FOLLOW_BASE.powf(dt_sec.max(0.0))
}

/// Owns the single `Parameters` instance and walks it toward the target of
/// the active mode. A mode change only swaps the target, never the value.
#[derive(Clone, Debug, Default)]
pub struct ParameterInterpolator {
    current: Parameters,
}

impl ParameterInterpolator {
    pub fn new(initial: Parameters) -> Self {
        Self { current: initial }
    }

    #[inline]
    pub fn parameters(&self) -> &Parameters {
        &self.current
    }

    pub fn advance(&mut self, dt_sec: f32, mode: Mode) -> &Parameters {
        let target = TargetVector::for_mode(mode);
        let follow = follow_factor(dt_sec);
        let p = &mut self.current;
        p.speed = lerp(p.speed, target.speed, follow);
        p.glow = lerp(p.glow, target.glow, follow);
        p.drift = lerp(p.drift, target.drift, follow);
        p.burst = lerp(p.burst, target.burst, follow);
        &self.current
    }
}
