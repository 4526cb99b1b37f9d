//! The simulation context: one instance owns every piece of mutable state
//! and advances it one tick at a time.

use crate::core::audio_map::{AudioError, AudioParameterMapper, GraphPlan, SynthBackend};
use crate::core::config::SimConfig;
use crate::core::glow::CoreGlow;
use crate::core::mode::Mode;
use crate::core::params::{ParameterInterpolator, Parameters};
use crate::core::particles::{ParticleSprite, ParticleSystem, Viewport};
use crate::core::render::{paint_core, paint_mist, paint_particles, paint_vignette, RenderSink};
use crate::core::rng::Mulberry32;

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub dt: f32,
    pub parameters: Parameters,
    /// Live count right after the population top-up.
    pub ensured: usize,
    /// Particles added by a surge micro-burst this tick.
    pub burst: usize,
    /// Live count after stepping and culling.
    pub live: usize,
}

pub struct Simulation<B: SynthBackend> {
    config: SimConfig,
    viewport: Viewport,
    interpolator: ParameterInterpolator,
    rng: Mulberry32,
    particles: ParticleSystem,
    sprites: Vec<ParticleSprite>,
    audio: AudioParameterMapper<B>,
}

impl<B: SynthBackend> Simulation<B> {
    pub fn new(config: SimConfig, viewport: Viewport) -> Self {
        let plan = GraphPlan::new(config.seed, config.master_level);
        log::info!(
            "[sim] seed={:#010x} viewport={}x{}@{}",
            config.seed,
            viewport.width,
            viewport.height,
            viewport.dpr
        );
        Self {
            config,
            viewport,
            interpolator: ParameterInterpolator::new(Parameters::default()),
            rng: Mulberry32::new(config.seed),
            particles: ParticleSystem::new(),
            sprites: Vec::new(),
            audio: AudioParameterMapper::new(plan, config.master_level),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn parameters(&self) -> &Parameters {
        self.interpolator.parameters()
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Sprites reported by the most recent tick.
    pub fn sprites(&self) -> &[ParticleSprite] {
        &self.sprites
    }

    pub fn audio(&self) -> &AudioParameterMapper<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioParameterMapper<B> {
        &mut self.audio
    }

    /// Build and start the synthesis graph. Call from a user gesture.
    pub fn arm_audio<F>(&mut self, open: F)
    where
        F: FnOnce(&GraphPlan) -> Result<B, AudioError>,
    {
        self.audio.start_with(open);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.audio.set_visible(visible);
    }

    /// Advance by one frame. `mode` is read once here; `t` is the frame
    /// timestamp in seconds.
    pub fn tick<S: RenderSink + ?Sized>(
        &mut self,
        dt_raw: f32,
        t: f64,
        mode: Mode,
        sink: &mut S,
    ) -> TickReport {
        let dt = self.config.clamp_dt(dt_raw);
        let params = *self.interpolator.advance(dt, mode);
        let viewport = self.viewport;

        paint_vignette(sink, &viewport);
        paint_mist(sink, &viewport, t, 0.9 * params.glow);

        self.particles
            .ensure_population(params.bias(), &viewport, &mut self.rng);
        let ensured = self.particles.len();

        let burst = if mode == Mode::Surge {
            self.particles
                .maybe_burst(self.config.surge_burst_chance, &viewport, &mut self.rng)
        } else {
            0
        };

        self.sprites.clear();
        self.particles
            .step(dt, t, &params, &viewport, &mut self.sprites);
        paint_particles(sink, &self.sprites);

        let core = CoreGlow::compute(t, &params, &viewport);
        paint_core(sink, &viewport, &core, params.glow);

        self.audio.update(t, mode, &params);

        TickReport {
            dt,
            parameters: params,
            ensured,
            burst,
            live: self.particles.len(),
        }
    }
}
