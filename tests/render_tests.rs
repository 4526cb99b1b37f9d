// Host-side tests for the scene painter, using a recording sink.

use glam::Vec2;
use kehai_web::core::glow::CoreGlow;
use kehai_web::core::params::Parameters;
use kehai_web::core::particles::{ParticleSprite, Viewport};
use kehai_web::core::render::{
    paint_core, paint_mist, paint_particles, paint_vignette, BlendMode, Color, FillArea,
    RadialGradient, RenderSink,
};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Background(Color),
    Gradient(RadialGradient, FillArea),
    Fill(Vec2, f32, Color),
    Stroke(Vec2, f32, Color, f32),
    Blend(BlendMode),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl RenderSink for Recorder {
    fn fill_background(&mut self, _viewport: &Viewport, color: Color) {
        self.ops.push(Op::Background(color));
    }
    fn draw_radial_gradient(&mut self, _viewport: &Viewport, gradient: &RadialGradient, area: FillArea) {
        self.ops.push(Op::Gradient(gradient.clone(), area));
    }
    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ops.push(Op::Fill(center, radius, color));
    }
    fn draw_stroked_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.ops.push(Op::Stroke(center, radius, color, width));
    }
    fn set_blend(&mut self, mode: BlendMode) {
        self.ops.push(Op::Blend(mode));
    }
}

#[test]
fn vignette_paints_base_then_gradient() {
    let vp = Viewport::new(800.0, 600.0, 2.0);
    let mut rec = Recorder::default();
    paint_vignette(&mut rec, &vp);
    assert_eq!(rec.ops.len(), 2);
    assert!(matches!(rec.ops[0], Op::Background(_)));
    match &rec.ops[1] {
        Op::Gradient(g, FillArea::Viewport) => {
            assert_eq!(g.inner_center, Vec2::new(400.0, 276.0));
            assert_eq!(g.outer_radius, 600.0);
            assert_eq!(g.stops.len(), 4);
            assert_eq!(g.stops[0].color.to_string(), "#05060a");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn mist_draws_three_layers() {
    let vp = Viewport::default();
    let mut rec = Recorder::default();
    paint_mist(&mut rec, &vp, 4.0, 0.63);
    assert_eq!(rec.ops.len(), 3);
    assert!(rec.ops.iter().all(|op| matches!(op, Op::Gradient(_, FillArea::Viewport))));
}

#[test]
fn mist_keeps_drifting_after_a_week_of_uptime() {
    let vp = Viewport::default();
    let centers = |t: f64| {
        let mut rec = Recorder::default();
        paint_mist(&mut rec, &vp, t, 1.0);
        rec.ops
            .into_iter()
            .filter_map(|op| match op {
                Op::Gradient(g, _) => Some(g.inner_center),
                _ => None,
            })
            .collect::<Vec<_>>()
    };
    let base = 7.0 * 86_400.0;
    for i in 0..30 {
        let t = base + i as f64 * 0.016;
        let (a, b) = (centers(t), centers(t + 0.016));
        assert!(a.iter().zip(&b).all(|(p, q)| p != q), "frame {}", i);
    }
}

#[test]
fn particles_are_wrapped_in_screen_blend() {
    let sprites = vec![
        ParticleSprite {
            pos: Vec2::new(10.0, 20.0),
            radius: 1.5,
            hue: 200.0,
            alpha: 0.3,
        };
        5
    ];
    let mut rec = Recorder::default();
    paint_particles(&mut rec, &sprites);
    assert_eq!(rec.ops.len(), 7);
    assert_eq!(rec.ops[0], Op::Blend(BlendMode::Screen));
    assert_eq!(rec.ops[6], Op::Blend(BlendMode::Normal));
    match rec.ops[1] {
        Op::Fill(_, r, c) => {
            assert_eq!(r, 1.5);
            assert_eq!(c.to_string(), "hsla(200 90% 60% / 0.3)");
        }
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn core_draws_aura_inner_and_ring() {
    let vp = Viewport::default();
    let params = Parameters::default();
    let core = CoreGlow::compute(1.0, &params, &vp);
    let mut rec = Recorder::default();
    paint_core(&mut rec, &vp, &core, params.glow);
    let gradients = rec
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Gradient(_, FillArea::Circle { .. })))
        .count();
    assert_eq!(gradients, 2);
    let stroke = rec.ops.iter().find_map(|op| match op {
        Op::Stroke(c, r, _, w) => Some((*c, *r, *w)),
        _ => None,
    });
    assert_eq!(stroke, Some((core.center, core.ring_radius, 1.1)));
    assert_eq!(rec.ops.last(), Some(&Op::Blend(BlendMode::Normal)));
}
