//! Particle bag: spawning, motion, culling and per-frame sprite output.

use crate::core::constants::*;
use crate::core::flow::flow_angle;
use crate::core::params::{clamp01, lerp, smoothstep01, Parameters};
use crate::core::rng::Mulberry32;
use glam::Vec2;
use std::f32::consts::TAU;

/// Logical drawing area in CSS pixels plus its device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    /// Dimensions are floored to whole pixels and never drop below 1; the
    /// pixel ratio is kept in [1, 2].
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let floor1 = |v: f64| if v.is_finite() { v.floor().max(1.0) } else { 1.0 };
        let dpr = if dpr.is_finite() { dpr.clamp(1.0, 2.0) } else { 1.0 };
        Self {
            width: floor1(width) as f32,
            height: floor1(height) as f32,
            dpr: dpr as f32,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn max_dim(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            ((self.width * self.dpr).floor() as u32).max(1),
            ((self.height * self.dpr).floor() as u32).max(1),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1280.0, 720.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hue: f32,
    pub size: f32,
    pub age: f32,
    pub life: f32,
    pub phase: f32,
}

/// Visual attributes derived for one live particle in one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub hue: f32,
    pub alpha: f32,
}

#[inline]
fn sanitize_bias(bias: f32) -> f32 {
    if bias.is_nan() {
        0.0
    } else {
        clamp01(bias)
    }
}

/// Population the bag is topped up to for a given bias.
pub fn population_target(bias: f32) -> usize {
    let b = smoothstep01(sanitize_bias(bias));
    lerp(MIN_PARTICLES as f32, MAX_PARTICLES as f32, b).round() as usize
}

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Add an already-built particle. Refused once the bag holds the
    /// population ceiling.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= MAX_PARTICLES {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Spawn until the live count reaches the target for `bias`. Never
    /// removes. Returns how many were added.
    pub fn ensure_population(
        &mut self,
        bias: f32,
        viewport: &Viewport,
        rng: &mut Mulberry32,
    ) -> usize {
        let bias = sanitize_bias(bias);
        let target = population_target(bias);
        let before = self.particles.len();
        while self.particles.len() < target {
            self.spawn(bias, viewport, rng);
        }
        self.particles.len() - before
    }

    /// Place one particle on the halo ring around the viewport center. Does
    /// nothing at the population ceiling.
    pub fn spawn(&mut self, bias: f32, viewport: &Viewport, rng: &mut Mulberry32) {
        let bias = sanitize_bias(bias);
        let c = viewport.center();
        let min_dim = viewport.min_dim();

        let ring = min_dim * (SPAWN_RING_MIN + rng.unit_f32() * SPAWN_RING_SPAN);
        let ang = rng.unit_f32() * TAU;
        let jitter = ring * (SPAWN_JITTER_MIN + SPAWN_JITTER_SPAN * rng.unit_f32());
        let x = c.x + ang.cos() * ring + (rng.unit_f32() - 0.5) * jitter;
        let y = c.y + ang.sin() * ring + (rng.unit_f32() - 0.5) * jitter;

        let hue = rng.range(HUE_MIN, HUE_MAX);
        let size = rng.range(SIZE_RANGE.0, SIZE_RANGE.1) * (0.85 + bias * 0.7);
        let life = rng.range(LIFE_RANGE_SEC.0, LIFE_RANGE_SEC.1) / (0.85 + bias);
        let phase = rng.unit_f32() * TAU;
        let s = rng.range(SPEED_RANGE.0, SPEED_RANGE.1) * (0.7 + bias * 1.1);
        let vx = (rng.unit_f32() - 0.5) * s;
        let vy = (rng.unit_f32() - 0.5) * s;

        self.push(Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            hue,
            size,
            age: 0.0,
            life,
            phase,
        });
    }

    /// Roll for a surge micro-burst: with probability `chance`, spawn a batch
    /// of 10..=27 full-energy particles, never past the population ceiling.
    pub fn maybe_burst(&mut self, chance: f64, viewport: &Viewport, rng: &mut Mulberry32) -> usize {
        if rng.next_f64() >= chance {
            return 0;
        }
        let extra = SURGE_BURST_MIN + (rng.next_f64() * SURGE_BURST_SPAN).floor() as usize;
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        let n = extra.min(room);
        for _ in 0..n {
            self.spawn(1.0, viewport, rng);
        }
        log::debug!("[particles] surge burst +{} (rolled {})", n, extra);
        n
    }

    /// Advance every particle by `dt_sec`, cull expired ones and push one
    /// sprite per survivor into `out`.
    pub fn step(
        &mut self,
        dt_sec: f32,
        t: f64,
        params: &Parameters,
        viewport: &Viewport,
        out: &mut Vec<ParticleSprite>,
    ) {
        let dt = dt_sec.max(0.0);
        let c = viewport.center();
        let min_dim = viewport.min_dim();
        let pull_r = min_dim * PULL_RADIUS;
        let fade_edge = min_dim * FADE_EDGE;
        let (w, h) = (viewport.width, viewport.height);

        let energy = params.drift;
        let speed = params.speed;
        let glow = params.glow;
        let flow_t = t * FLOW_TIME_SCALE;
        let max_v = MAX_SPEED_GAIN * speed * (0.75 + energy * 0.7);
        let advance = dt * FRAME_RATE_REF * (0.55 + speed * 0.65);
        let pulse_rate = (0.9 + energy * 0.7) as f64;

        self.particles.retain_mut(|p| {
            p.age += dt;
            if p.age > p.life {
                return false;
            }

            let d = p.pos - c;
            let dist = d.length() + 1e-6;
            let radial = d / dist;
            let tangent = radial.perp();

            let swirl = flow_angle(p.pos, w, h, flow_t, energy);
            let pull = smoothstep01(1.0 - dist / pull_r) * PULL_GAIN * energy;
            let tang = TANGENT_GAIN * energy;
            let acc = tangent * (swirl * tang) - radial * pull;

            p.vel = p.vel.lerp(p.vel + acc, VELOCITY_BLEND);
            let v = p.vel.length();
            if v > max_v {
                p.vel *= max_v / v;
            }
            p.pos += p.vel * advance;

            let edge = (p.pos - c).length();
            if edge > fade_edge {
                let k = (edge - fade_edge) / (min_dim * FADE_EDGE_SPAN);
                p.age += dt * FADE_EDGE_AGING * clamp01(k);
                if p.age > p.life {
                    return false;
                }
            }

            if p.pos.x < -WRAP_MARGIN_PX {
                p.pos.x = w + WRAP_MARGIN_PX;
            }
            if p.pos.x > w + WRAP_MARGIN_PX {
                p.pos.x = -WRAP_MARGIN_PX;
            }
            if p.pos.y < -WRAP_MARGIN_PX {
                p.pos.y = h + WRAP_MARGIN_PX;
            }
            if p.pos.y > h + WRAP_MARGIN_PX {
                p.pos.y = -WRAP_MARGIN_PX;
            }

            let a = 1.0 - p.age / p.life;
            let pulse = 0.65 + 0.35 * (t * pulse_rate + p.phase as f64).sin() as f32;
            out.push(ParticleSprite {
                pos: p.pos,
                radius: p.size * (0.8 + 0.55 * (1.0 - a)) * (0.9 + 0.2 * glow),
                hue: p.hue,
                alpha: 0.06 + 0.28 * a * a * glow * pulse,
            });
            true
        });
    }
}
