//! Immediate-mode drawing contract and the scene painter built on it.
//!
//! The painter only emits primitives; any 2D surface that can fill a
//! background, fill radial gradients, and fill/stroke circles can host the
//! indicator. Colors are kept symbolic and formatted as CSS on demand.

use crate::core::constants::RING_WIDTH;
use crate::core::glow::CoreGlow;
use crate::core::particles::{ParticleSprite, Viewport};
use glam::Vec2;
use smallvec::{smallvec, SmallVec};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// 0xRRGGBB
    Rgb(u32),
    Hsla { h: f32, s: f32, l: f32, a: f32 },
}

#[inline]
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Color {
    Color::Hsla { h, s, l, a }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgb(rgb) => write!(f, "#{:06x}", rgb & 0x00ff_ffff),
            Color::Hsla { h, s, l, a } => {
                write!(f, "hsla({} {}% {}% / {})", h, s, l, a.clamp(0.0, 1.0))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// Two-circle radial gradient, as canvas `createRadialGradient` takes it.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: SmallVec<[GradientStop; 4]>,
}

/// Region a gradient is painted into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillArea {
    Viewport,
    Circle { center: Vec2, radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Screen,
}

pub trait RenderSink {
    fn fill_background(&mut self, viewport: &Viewport, color: Color);
    fn draw_radial_gradient(&mut self, viewport: &Viewport, gradient: &RadialGradient, area: FillArea);
    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_stroked_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    fn set_blend(&mut self, mode: BlendMode);
}

fn stop(offset: f32, color: Color) -> GradientStop {
    GradientStop { offset, color }
}

/// Base fill plus the dark vignette.
pub fn paint_vignette<S: RenderSink + ?Sized>(sink: &mut S, viewport: &Viewport) {
    let (w, h) = (viewport.width, viewport.height);
    sink.fill_background(viewport, Color::Rgb(0x000108));
    let gradient = RadialGradient {
        inner_center: Vec2::new(w * 0.5, h * 0.46),
        inner_radius: 0.0,
        outer_center: Vec2::new(w * 0.5, h * 0.5),
        outer_radius: viewport.max_dim() * 0.75,
        stops: smallvec![
            stop(0.0, Color::Rgb(0x05060a)),
            stop(0.35, Color::Rgb(0x040513)),
            stop(0.72, Color::Rgb(0x02030a)),
            stop(1.0, Color::Rgb(0x000108)),
        ],
    };
    sink.draw_radial_gradient(viewport, &gradient, FillArea::Viewport);
}

/// Three large, slowly drifting gradients behind everything else.
pub fn paint_mist<S: RenderSink + ?Sized>(sink: &mut S, viewport: &Viewport, t: f64, intensity: f32) {
    let c = viewport.center();
    let r0 = viewport.max_dim() * 0.75;
    let drift = 0.06 * intensity;
    for i in 0..3 {
        let fi = i as f32;
        let a = t * (0.07 + i as f64 * 0.015) + i as f64 * 1.7;
        let reach = r0 * drift * (0.7 + fi * 0.25);
        let center = c + Vec2::new(a.cos() as f32 * reach, (a * 1.13).sin() as f32 * reach);
        let hue = 195.0 + fi * 25.0;
        let gradient = RadialGradient {
            inner_center: center,
            inner_radius: 0.0,
            outer_center: center,
            outer_radius: r0 * (0.55 + fi * 0.18),
            stops: smallvec![
                stop(0.0, hsla(hue, 85.0, 10.0, 0.22 * intensity)),
                stop(0.35, hsla(hue + 10.0, 90.0, 9.0, 0.12 * intensity)),
                stop(1.0, hsla(hue + 20.0, 90.0, 7.0, 0.0)),
            ],
        };
        sink.draw_radial_gradient(viewport, &gradient, FillArea::Viewport);
    }
}

/// Particles under screen blending, restored to normal afterwards.
pub fn paint_particles<S: RenderSink + ?Sized>(sink: &mut S, sprites: &[ParticleSprite]) {
    sink.set_blend(BlendMode::Screen);
    for s in sprites {
        sink.draw_filled_circle(s.pos, s.radius, hsla(s.hue, 90.0, 60.0, s.alpha));
    }
    sink.set_blend(BlendMode::Normal);
}

/// Aura, inner core and the soft ring.
pub fn paint_core<S: RenderSink + ?Sized>(sink: &mut S, viewport: &Viewport, core: &CoreGlow, glow: f32) {
    let c = core.center;
    let r = core.inner_radius;

    let aura = RadialGradient {
        inner_center: c,
        inner_radius: r * 0.3,
        outer_center: c,
        outer_radius: core.aura_radius,
        stops: smallvec![
            stop(0.0, hsla(205.0, 92.0, 62.0, 0.26 * glow)),
            stop(0.22, hsla(220.0, 95.0, 55.0, 0.18 * glow)),
            stop(0.55, hsla(255.0, 95.0, 55.0, 0.12 * glow)),
            stop(1.0, hsla(270.0, 95.0, 55.0, 0.0)),
        ],
    };
    sink.draw_radial_gradient(
        viewport,
        &aura,
        FillArea::Circle {
            center: c,
            radius: core.aura_radius,
        },
    );

    let inner = RadialGradient {
        inner_center: c - Vec2::new(r * 0.12, r * 0.1),
        inner_radius: 0.0,
        outer_center: c,
        outer_radius: r * 1.35,
        stops: smallvec![
            stop(0.0, hsla(195.0, 90.0, 68.0, 0.95)),
            stop(0.35, hsla(215.0, 92.0, 60.0, 0.78)),
            stop(0.75, hsla(255.0, 90.0, 58.0, 0.42)),
            stop(1.0, hsla(275.0, 90.0, 55.0, 0.06)),
        ],
    };
    sink.draw_radial_gradient(viewport, &inner, FillArea::Circle { center: c, radius: r });

    sink.set_blend(BlendMode::Screen);
    sink.draw_stroked_circle(
        c,
        core.ring_radius,
        hsla(210.0, 95.0, 62.0, core.ring_alpha),
        RING_WIDTH,
    );
    sink.set_blend(BlendMode::Normal);
}
