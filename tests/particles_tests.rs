// Host-side tests for the particle bag.

use kehai_web::core::mode::Mode;
use kehai_web::core::params::{ParameterInterpolator, Parameters, TargetVector};
use glam::Vec2;
use kehai_web::core::particles::{population_target, Particle, ParticleSystem, Viewport};
use kehai_web::core::rng::Mulberry32;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0, 1.0)
}

fn still_particle(pos: Vec2) -> Particle {
    Particle {
        pos,
        vel: Vec2::ZERO,
        hue: 220.0,
        size: 1.0,
        age: 0.0,
        life: 10.0,
        phase: 0.0,
    }
}

fn max_speed(params: &Parameters) -> f32 {
    1.45 * params.speed * (0.75 + 0.7 * params.drift)
}

#[test]
fn population_target_spans_bounds() {
    assert_eq!(population_target(0.0), 260);
    assert_eq!(population_target(1.0), 650);
    assert_eq!(population_target(-3.0), 260);
    assert_eq!(population_target(7.0), 650);
    assert_eq!(population_target(0.5), 455);
    for i in 0..=100 {
        let n = population_target(i as f32 / 100.0);
        assert!((260..=650).contains(&n));
    }
}

#[test]
fn calm_ensure_reaches_minimum() {
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(1);
    let added = ps.ensure_population(Parameters::default().bias(), &viewport(), &mut rng);
    assert_eq!(added, 260);
    assert_eq!(ps.len(), 260);
}

#[test]
fn ensure_never_removes() {
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(2);
    ps.ensure_population(1.0, &viewport(), &mut rng);
    assert_eq!(ps.len(), 650);
    assert_eq!(ps.ensure_population(0.0, &viewport(), &mut rng), 0);
    assert_eq!(ps.len(), 650);
}

#[test]
fn spawn_lands_on_halo_ring_with_allowed_hue() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(3);
    for _ in 0..500 {
        ps.spawn(0.5, &vp, &mut rng);
    }
    let c = vp.center();
    let min_dim = vp.min_dim();
    for p in ps.particles() {
        let d = (p.pos - c).length();
        assert!(d >= 0.11 * min_dim * 0.66 && d <= 0.21 * min_dim * 1.34, "{}", d);
        assert!((185.0..=275.0).contains(&p.hue));
        assert!(p.life > 0.0 && p.age == 0.0);
    }
}

#[test]
fn busier_bias_means_shorter_lives() {
    let vp = viewport();
    let mut low = ParticleSystem::new();
    let mut high = ParticleSystem::new();
    let mut rng = Mulberry32::new(4);
    for _ in 0..400 {
        low.spawn(0.0, &vp, &mut rng);
    }
    let mut rng = Mulberry32::new(4);
    for _ in 0..400 {
        high.spawn(1.0, &vp, &mut rng);
    }
    let mean = |ps: &ParticleSystem| ps.particles().iter().map(|p| p.life).sum::<f32>() / ps.len() as f32;
    assert!(mean(&high) < mean(&low));
}

#[test]
fn step_leaves_no_expired_particles() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(5);
    let params: Parameters = TargetVector::SURGE.into();
    let mut sprites = Vec::new();
    for i in 0..400 {
        ps.ensure_population(params.bias(), &vp, &mut rng);
        sprites.clear();
        ps.step(0.05, i as f64 * 0.05, &params, &vp, &mut sprites);
        assert_eq!(sprites.len(), ps.len());
        for p in ps.particles() {
            assert!(p.age >= 0.0);
            assert!(p.age <= p.life);
        }
    }
}

#[test]
fn unfed_population_dies_out() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(6);
    ps.ensure_population(0.0, &vp, &mut rng);
    let params = Parameters::default();
    let mut sprites = Vec::new();
    for i in 0..240 {
        sprites.clear();
        ps.step(0.05, i as f64 * 0.05, &params, &vp, &mut sprites);
    }
    assert!(ps.is_empty());
}

#[test]
fn negative_dt_does_not_age_backwards() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(7);
    ps.ensure_population(0.0, &vp, &mut rng);
    let mut sprites = Vec::new();
    ps.step(-1.0, 0.0, &Parameters::default(), &vp, &mut sprites);
    assert!(ps.particles().iter().all(|p| p.age == 0.0));
    assert_eq!(ps.len(), 260);
}

#[test]
fn sprite_alpha_and_radius_are_sane() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(8);
    ps.ensure_population(0.0, &vp, &mut rng);
    let params = Parameters::default();
    let mut sprites = Vec::new();
    ps.step(0.016, 0.0, &params, &vp, &mut sprites);
    for s in &sprites {
        assert!(s.alpha >= 0.06 && s.alpha <= 0.06 + 0.28 * params.glow + 1e-6);
        assert!(s.radius > 0.0);
    }
}

#[test]
fn forced_burst_adds_ten_to_twenty_seven() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(9);
    let n = ps.maybe_burst(1.0, &vp, &mut rng);
    assert!((10..=27).contains(&n), "{}", n);
    assert_eq!(ps.len(), n);
    assert_eq!(ps.maybe_burst(0.0, &vp, &mut rng), 0);
}

#[test]
fn burst_respects_ceiling() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(10);
    ps.ensure_population(1.0, &vp, &mut rng);
    assert_eq!(ps.maybe_burst(1.0, &vp, &mut rng), 0);
    assert_eq!(ps.len(), 650);
}

#[test]
fn same_seed_same_trajectories() {
    let vp = viewport();
    let run = || {
        let mut ps = ParticleSystem::new();
        let mut rng = Mulberry32::new(0x6b65_6861);
        let mut interp = ParameterInterpolator::new(Parameters::default());
        let mut sprites = Vec::new();
        for i in 0..300 {
            let mode = if i < 150 { Mode::Calm } else { Mode::Surge };
            let params = *interp.advance(0.016, mode);
            ps.ensure_population(params.bias(), &vp, &mut rng);
            if mode == Mode::Surge {
                ps.maybe_burst(0.02, &vp, &mut rng);
            }
            sprites.clear();
            ps.step(0.016, i as f64 * 0.016, &params, &vp, &mut sprites);
        }
        ps.particles().to_vec()
    };
    assert_eq!(run(), run());
}

#[test]
fn push_stops_at_ceiling() {
    let vp = viewport();
    let mut ps = ParticleSystem::new();
    let mut rng = Mulberry32::new(11);
    ps.ensure_population(1.0, &vp, &mut rng);
    assert!(!ps.push(still_particle(vp.center())));
    assert_eq!(ps.len(), 650);
}

#[test]
fn step_clamps_speed() {
    let vp = viewport();
    let params: Parameters = TargetVector::SURGE.into();
    let max_v = max_speed(&params);
    let mut ps = ParticleSystem::new();
    for i in 0..32 {
        let mut p = still_particle(Vec2::new(200.0 + i as f32 * 25.0, 300.0));
        p.vel = Vec2::new(40.0, -25.0 + i as f32);
        assert!(ps.push(p));
    }
    let mut sprites = Vec::new();
    ps.step(0.016, 1.0, &params, &vp, &mut sprites);
    for p in ps.particles() {
        assert!(p.vel.length() <= max_v * (1.0 + 1e-5), "{} > {}", p.vel.length(), max_v);
    }

    let mut rng = Mulberry32::new(12);
    for i in 0..300 {
        ps.ensure_population(params.bias(), &vp, &mut rng);
        sprites.clear();
        ps.step(0.016, 1.0 + i as f64 * 0.016, &params, &vp, &mut sprites);
        for p in ps.particles() {
            assert!(p.vel.length() <= max_v * (1.0 + 1e-5));
        }
    }
}

#[test]
fn positions_wrap_within_margin() {
    for vp in [viewport(), Viewport::new(10.0, 10.0, 1.0)] {
        let params: Parameters = TargetVector::SURGE.into();
        let mut ps = ParticleSystem::new();
        let mut rng = Mulberry32::new(13);
        let mut sprites = Vec::new();
        for i in 0..600 {
            ps.ensure_population(params.bias(), &vp, &mut rng);
            sprites.clear();
            ps.step(0.05, i as f64 * 0.05, &params, &vp, &mut sprites);
            for p in ps.particles() {
                assert!(p.pos.x >= -60.0 && p.pos.x <= vp.width + 60.0, "{:?}", p.pos);
                assert!(p.pos.y >= -60.0 && p.pos.y <= vp.height + 60.0, "{:?}", p.pos);
            }
        }
    }
}

#[test]
fn leaving_the_left_margin_reenters_on_the_right() {
    let vp = viewport();
    let params = Parameters {
        speed: 1.0,
        glow: 1.0,
        drift: 0.0,
        burst: 0.0,
    };
    let mut ps = ParticleSystem::new();
    let mut p = still_particle(Vec2::new(-59.5, 360.0));
    p.vel = Vec2::new(-1.0, 0.0);
    ps.push(p);
    let mut sprites = Vec::new();
    ps.step(0.016, 0.0, &params, &vp, &mut sprites);
    assert_eq!(ps.particles()[0].pos.x, vp.width + 60.0);
}

#[test]
fn particles_past_the_fade_edge_age_faster() {
    let vp = viewport();
    let min_dim = vp.min_dim();
    let c = vp.center();
    // No drift: no swirl, no pull, so nothing moves.
    let params = Parameters {
        speed: 1.0,
        glow: 1.0,
        drift: 0.0,
        burst: 0.0,
    };
    let mut ps = ParticleSystem::new();
    ps.push(still_particle(c + Vec2::new(0.3 * min_dim, 0.0)));
    ps.push(still_particle(c + Vec2::new((0.62 + 0.125) * min_dim, 0.0)));
    ps.push(still_particle(c + Vec2::new((0.62 + 0.25) * min_dim, 0.0)));
    let dt = 0.016;
    let mut sprites = Vec::new();
    ps.step(dt, 0.0, &params, &vp, &mut sprites);
    let ages: Vec<f32> = ps.particles().iter().map(|p| p.age).collect();
    assert!((ages[0] - dt).abs() < 1e-6);
    assert!((ages[1] - dt * 1.9).abs() < 1e-5, "{}", ages[1]);
    assert!((ages[2] - dt * 2.8).abs() < 1e-5, "{}", ages[2]);
}

#[test]
fn edge_aging_can_expire_a_particle_in_the_same_step() {
    let vp = viewport();
    let params = Parameters {
        speed: 1.0,
        glow: 1.0,
        drift: 0.0,
        burst: 0.0,
    };
    let mut ps = ParticleSystem::new();
    let mut p = still_particle(vp.center() + Vec2::new(0.9 * vp.min_dim(), 0.0));
    p.life = 0.03;
    ps.push(p);
    let mut sprites = Vec::new();
    ps.step(0.016, 0.0, &params, &vp, &mut sprites);
    assert!(ps.is_empty());
    assert!(sprites.is_empty());
}

#[test]
fn pull_draws_particles_inside_the_pull_radius_inward() {
    let vp = viewport();
    let min_dim = vp.min_dim();
    let c = vp.center();
    let params = Parameters {
        speed: 1.0,
        glow: 1.0,
        drift: 1.0,
        burst: 0.0,
    };
    let smooth = |x: f32| {
        let x = x.clamp(0.0, 1.0);
        x * x * (3.0 - 2.0 * x)
    };
    let dt = 0.016;
    let advance = dt * 60.0 * (0.55 + 0.65 * params.speed);
    let pull_r = 0.26 * min_dim;

    for (k, frac) in [0.05_f32, 0.1, 0.18, 0.4].into_iter().enumerate() {
        let angle = k as f32 * 1.3;
        let radial = Vec2::new(angle.cos(), angle.sin());
        let start = c + radial * (frac * min_dim);
        let mut ps = ParticleSystem::new();
        ps.push(still_particle(start));
        let mut sprites = Vec::new();
        ps.step(dt, 2.0, &params, &vp, &mut sprites);

        let moved = ps.particles()[0].pos - start;
        let inward = moved.dot(radial);
        let dist = frac * min_dim;
        let expected = -smooth(1.0 - dist / pull_r) * 0.055 * params.drift * 0.35 * advance;
        assert!((inward - expected).abs() < 5e-4, "{}: {} vs {}", frac, inward, expected);
        if dist < pull_r {
            assert!(inward < 0.0);
        }
    }
}
