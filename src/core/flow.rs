use crate::core::constants::{FLOW_GAIN, FLOW_SPATIAL, FLOW_TEMPORAL};
use glam::Vec2;
use std::f64::consts::TAU;

/// Swirl signal at `pos` for a `width` x `height` viewport.
///
/// Three phase-shifted sinusoids over viewport-normalized coordinates stand in
/// for curl noise: smooth in space and time, bounded by `3 * 1.25 * energy`,
/// and used only as a tangential turn so particles circulate instead of
/// drifting outward. Time stays `f64`; only the summed signal is narrowed.
pub fn flow_angle(pos: Vec2, width: f32, height: f32, t: f64, energy: f32) -> f32 {
    let scale = width.max(height).max(1.0);
    let nx = ((pos.x - width * 0.5) / scale) as f64;
    let ny = ((pos.y - height * 0.5) / scale) as f64;
    let [k1, k2, k3] = FLOW_SPATIAL.map(f64::from);
    let [w1, w2, w3] = FLOW_TEMPORAL;
    let a = ((nx * k1 + ny * 0.7) * TAU + t * w1).sin()
        + ((ny * k2 - nx * 1.1) * TAU - t * w2).cos()
        + ((nx * k3 + ny * 1.6) * TAU + t * w3).sin();
    a as f32 * FLOW_GAIN * energy
}
