//! Run-time settings for one simulation instance.

use crate::core::constants::{DEFAULT_SEED, MASTER_LEVEL, MAX_FRAME_DT_SEC, SURGE_BURST_CHANCE};
use crate::core::mode::Mode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub seed: u32,
    /// Upper bound on the frame delta fed to physics, in seconds.
    pub max_frame_dt: f32,
    /// Nominal master gain the activation ramp settles at scale against.
    pub master_level: f32,
    pub surge_burst_chance: f64,
    pub initial_mode: Mode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_frame_dt: MAX_FRAME_DT_SEC,
            master_level: MASTER_LEVEL,
            surge_burst_chance: SURGE_BURST_CHANCE,
            initial_mode: Mode::Calm,
        }
    }
}

impl SimConfig {
    /// Overlay recognized keys from a URL query string (`?seed=7&mode=surge`).
    /// Unknown keys and malformed seeds are ignored; an unknown mode label
    /// selects `Calm`.
    pub fn from_query(query: &str) -> Self {
        let mut cfg = SimConfig::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => {
                    if let Some(seed) = parse_seed(value) {
                        cfg.seed = seed;
                    }
                }
                "mode" => cfg.initial_mode = Mode::parse_or_calm(value),
                _ => {}
            }
        }
        cfg
    }

    /// Clamp a raw frame delta into `[0, max_frame_dt]`. Non-finite deltas
    /// become zero.
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        }
    }
}

/// Decimal or `0x`-prefixed hexadecimal `u32`.
pub fn parse_seed(s: &str) -> Option<u32> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}
