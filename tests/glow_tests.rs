// Host-side tests for the core glow model.

use kehai_web::core::glow::{Breathing, CoreGlow};
use kehai_web::core::params::{Parameters, TargetVector};
use kehai_web::core::particles::Viewport;

#[test]
fn breathing_stays_in_unit_range() {
    for i in 0..1000 {
        let b = Breathing::at(i as f64 * 0.037, 1.55);
        assert!((0.0..=1.0).contains(&b.breathe));
        assert!((0.0..=1.0).contains(&b.breathe2));
    }
}

#[test]
fn geometry_follows_closed_form_at_time_zero() {
    let vp = Viewport::new(1000.0, 500.0, 1.0);
    let params = Parameters::default();
    let core = CoreGlow::compute(0.0, &params, &vp);
    let r_base = 500.0 * 0.06;
    let breathe2 = 0.5 + 0.5 * 1.7_f32.sin();
    let inner = r_base * (0.86 + 0.22 * 0.5 + 0.08 * breathe2);
    assert!((core.inner_radius - inner).abs() < 1e-4);
    assert!((core.ring_radius - inner * (1.6 + 0.6 * breathe2)).abs() < 1e-3);
    assert_eq!(core.center, vp.center());
}

#[test]
fn aura_and_ring_grow_with_intensity() {
    let vp = Viewport::default();
    let calm = CoreGlow::compute(3.0, &Parameters::default(), &vp);
    let surge = CoreGlow::compute(3.0, &TargetVector::SURGE.into(), &vp);
    assert!(surge.aura_radius > calm.aura_radius);
    assert!(surge.ring_alpha > calm.ring_alpha);
    assert!((calm.ring_alpha - (0.05 + 0.09 * 0.7 + 0.08 * 0.25)).abs() < 1e-6);
}

#[test]
fn recomputation_is_pure() {
    let vp = Viewport::default();
    let p: Parameters = TargetVector::ACTIVE.into();
    assert_eq!(CoreGlow::compute(12.5, &p, &vp), CoreGlow::compute(12.5, &p, &vp));
}

#[test]
fn breathing_advances_every_frame_after_a_week_of_uptime() {
    let vp = Viewport::default();
    let params = Parameters::default();
    let base = 7.0 * 86_400.0;
    let r_base = vp.min_dim() as f64 * 0.06;
    let mut prev = CoreGlow::compute(base, &params, &vp);
    for i in 1..60 {
        let t = base + i as f64 * 0.016;
        let core = CoreGlow::compute(t, &params, &vp);
        let speed = params.speed as f64;
        let breathe = 0.5 + 0.5 * (t * 0.62 * speed).sin();
        let breathe2 = 0.5 + 0.5 * (t * 0.37 * speed + 1.7).sin();
        let inner = r_base * (0.86 + 0.22 * breathe + 0.08 * breathe2);
        assert!((core.inner_radius as f64 - inner).abs() < 1e-3, "frame {}", i);
        assert_ne!(core.breathing, prev.breathing, "frame {}", i);
        prev = core;
    }
}
