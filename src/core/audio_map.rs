//! Mapping from (time, mode, parameters) to synthesis-graph targets.
//!
//! The graph itself lives behind [`SynthBackend`]. The mapper builds it once,
//! after a user gesture, and from then on only pushes smoothed targets: every
//! change is handed to the backend with a time constant so transitions between
//! modes glide instead of stepping.

use crate::core::constants::*;
use crate::core::glow::Breathing;
use crate::core::mode::Mode;
use crate::core::params::Parameters;
use crate::core::rng::Mulberry32;
use smallvec::SmallVec;
use std::f64::consts::TAU;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to create {node} node: {detail}")]
    NodeCreation { node: &'static str, detail: String },
    #[error("failed to connect {from} -> {to}: {detail}")]
    Connect {
        from: &'static str,
        to: &'static str,
        detail: String,
    },
    #[error("failed to schedule source: {detail}")]
    Schedule { detail: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    Running,
    Suspended,
    Closed,
}

/// Every smoothly settable parameter of the pad graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    VoiceFrequency(usize),
    VoiceDetune(usize),
    VoiceGain(usize),
    VoiceFilterFrequency(usize),
    VoiceFilterQ(usize),
    LfoRate(usize),
    LfoDepth(usize),
    ShimmerGain,
    ShimmerFilterFrequency,
    TiltCutoff,
    EchoTime,
    EchoFeedback,
    EchoMix,
    MasterGain,
}

impl ParamId {
    pub fn time_constant(self) -> f32 {
        match self {
            ParamId::VoiceFrequency(_) => TAU_FREQUENCY,
            ParamId::VoiceDetune(_) => TAU_DETUNE,
            ParamId::VoiceGain(_) => TAU_VOICE_GAIN,
            ParamId::VoiceFilterFrequency(_) => TAU_FILTER,
            ParamId::VoiceFilterQ(_) => TAU_Q,
            ParamId::LfoRate(_) | ParamId::LfoDepth(_) => TAU_LFO,
            ParamId::ShimmerGain | ParamId::ShimmerFilterFrequency => TAU_SHIMMER,
            ParamId::TiltCutoff => TAU_TILT,
            ParamId::EchoTime => TAU_ECHO_TIME,
            ParamId::EchoFeedback | ParamId::EchoMix => TAU_ECHO,
            ParamId::MasterGain => TAU_MASTER,
        }
    }

    pub fn all() -> SmallVec<[ParamId; 28]> {
        let mut ids = SmallVec::new();
        for i in 0..VOICE_COUNT {
            ids.push(ParamId::VoiceFrequency(i));
            ids.push(ParamId::VoiceDetune(i));
            ids.push(ParamId::VoiceGain(i));
            ids.push(ParamId::VoiceFilterFrequency(i));
            ids.push(ParamId::VoiceFilterQ(i));
            ids.push(ParamId::LfoRate(i));
            ids.push(ParamId::LfoDepth(i));
        }
        ids.extend([
            ParamId::ShimmerGain,
            ParamId::ShimmerFilterFrequency,
            ParamId::TiltCutoff,
            ParamId::EchoTime,
            ParamId::EchoFeedback,
            ParamId::EchoMix,
            ParamId::MasterGain,
        ]);
        ids
    }
}

/// Oscillator shape for a pad voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

pub const VOICE_WAVEFORMS: [Waveform; VOICE_COUNT] =
    [Waveform::Sawtooth, Waveform::Triangle, Waveform::Sawtooth];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressorSettings {
    pub threshold_db: f32,
    pub knee_db: f32,
    pub ratio: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            threshold_db: COMP_THRESHOLD_DB,
            knee_db: COMP_KNEE_DB,
            ratio: COMP_RATIO,
            attack_sec: COMP_ATTACK_SEC,
            release_sec: COMP_RELEASE_SEC,
        }
    }
}

/// Static description of the graph a backend has to build.
///
/// Topology: three voices (oscillator -> bandpass -> gain, with a sine LFO
/// on the bandpass center) into a pad bus; a looping high-passed noise
/// shimmer; a feedback echo fed from the pad bus; then tilt low-pass ->
/// compressor -> master gain -> output.
#[derive(Clone, Debug)]
pub struct GraphPlan {
    pub waveforms: [Waveform; VOICE_COUNT],
    pub noise_seed: u32,
    pub noise_seconds: f32,
    pub echo_max_sec: f64,
    pub compressor: CompressorSettings,
    /// Values every parameter starts at before the first update.
    pub initial: AudioTargets,
    pub master_ramp_sec: f64,
}

impl GraphPlan {
    pub fn new(seed: u32, master_level: f32) -> Self {
        Self {
            waveforms: VOICE_WAVEFORMS,
            noise_seed: seed ^ 0x9E37_79B9,
            noise_seconds: NOISE_BUFFER_SEC,
            echo_max_sec: ECHO_MAX_SEC,
            compressor: CompressorSettings::default(),
            initial: AudioTargets::compute(0.0, Mode::Calm, &Parameters::default(), master_level),
            master_ramp_sec: MASTER_RAMP_SEC,
        }
    }
}

/// White noise in [-1, 1) for the shimmer loop, reproducible per seed.
pub fn noise_samples(seed: u32, len: usize) -> Vec<f32> {
    let mut rng = Mulberry32::new(seed);
    (0..len).map(|_| rng.unit_f32() * 2.0 - 1.0).collect()
}

pub fn chord_for(mode: Mode) -> &'static [f32] {
    match mode {
        Mode::Calm => CALM_CHORD_HZ,
        Mode::Active => ACTIVE_CHORD_HZ,
        Mode::Surge => SURGE_CHORD_HZ,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoiceTargets {
    pub frequency: f32,
    pub detune: f32,
    pub gain: f32,
    pub filter_frequency: f32,
    pub filter_q: f32,
    pub lfo_rate: f32,
    pub lfo_depth: f32,
}

/// One value per graph parameter for a single instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioTargets {
    pub voices: [VoiceTargets; VOICE_COUNT],
    pub shimmer_gain: f32,
    pub shimmer_filter_frequency: f32,
    pub tilt_cutoff: f32,
    pub echo_time: f32,
    pub echo_feedback: f32,
    pub echo_mix: f32,
    pub master_gain: f32,
}

impl AudioTargets {
    pub fn compute(t: f64, mode: Mode, params: &Parameters, master_level: f32) -> Self {
        let Parameters {
            speed,
            glow,
            drift,
            burst,
        } = *params;
        let breathing = Breathing::at(t, speed);
        let chord = chord_for(mode);
        let rotation = if chord.len() > VOICE_COUNT {
            (t.max(0.0) / CHORD_ROTATE_SEC).floor() as usize
        } else {
            0
        };

        let mut voices = [VoiceTargets::default(); VOICE_COUNT];
        for (i, v) in voices.iter_mut().enumerate() {
            let fi = i as f32;
            let tone = chord[(i + rotation) % chord.len()];
            let vib_rate = VIBRATO_RATE_HZ as f64 * (1.0 + 0.15 * i as f64);
            let vibrato = (TAU * vib_rate * t + 2.1 * i as f64).sin() as f32;
            let swell = if i % 2 == 0 {
                breathing.breathe
            } else {
                breathing.breathe2
            };
            *v = VoiceTargets {
                frequency: tone * (1.0 + VIBRATO_DEPTH * (0.6 + 0.4 * speed) * vibrato),
                detune: VOICE_DETUNE_CENTS[i] * (0.6 + 0.4 * drift),
                gain: VOICE_GAIN_BASE * (0.55 + 0.3 * glow) * (0.85 + 0.15 * swell),
                filter_frequency: (BANDPASS_BASE_HZ + BANDPASS_GLOW_HZ * glow)
                    * (1.0 + BANDPASS_VOICE_SPREAD * fi),
                filter_q: BANDPASS_Q_BASE + BANDPASS_Q_SPEED * speed,
                lfo_rate: LFO_RATE_BASE_HZ + LFO_RATE_SPEED_HZ * speed + 0.013 * fi,
                lfo_depth: LFO_DEPTH_BASE_HZ + LFO_DEPTH_GLOW_HZ * glow,
            };
        }

        let swell = MASTER_BREATHE * (breathing.breathe - 0.5)
            + MASTER_BREATHE2 * (breathing.breathe2 - 0.5);
        Self {
            voices,
            shimmer_gain: SHIMMER_BASE[mode.index()] * (0.5 + 0.5 * burst),
            shimmer_filter_frequency: SHIMMER_FILTER_BASE_HZ + SHIMMER_FILTER_GLOW_HZ * glow,
            tilt_cutoff: TILT_BASE_HZ + TILT_GLOW_HZ * glow,
            echo_time: (ECHO_TIME_BASE_SEC - ECHO_TIME_SPEED_SEC * speed)
                .clamp(0.05, ECHO_MAX_SEC as f32),
            echo_feedback: (ECHO_FEEDBACK_BASE
                + ECHO_FEEDBACK_BURST * burst
                + ECHO_FEEDBACK_GLOW * glow)
                .min(ECHO_FEEDBACK_MAX),
            echo_mix: ECHO_MIX_BASE + ECHO_MIX_GLOW * glow,
            master_gain: master_level
                * (MASTER_FLOOR + MASTER_GLOW * glow + MASTER_BURST * burst + swell).max(0.0),
        }
    }

    pub fn value(&self, id: ParamId) -> f32 {
        match id {
            ParamId::VoiceFrequency(i) => self.voices[i].frequency,
            ParamId::VoiceDetune(i) => self.voices[i].detune,
            ParamId::VoiceGain(i) => self.voices[i].gain,
            ParamId::VoiceFilterFrequency(i) => self.voices[i].filter_frequency,
            ParamId::VoiceFilterQ(i) => self.voices[i].filter_q,
            ParamId::LfoRate(i) => self.voices[i].lfo_rate,
            ParamId::LfoDepth(i) => self.voices[i].lfo_depth,
            ParamId::ShimmerGain => self.shimmer_gain,
            ParamId::ShimmerFilterFrequency => self.shimmer_filter_frequency,
            ParamId::TiltCutoff => self.tilt_cutoff,
            ParamId::EchoTime => self.echo_time,
            ParamId::EchoFeedback => self.echo_feedback,
            ParamId::EchoMix => self.echo_mix,
            ParamId::MasterGain => self.master_gain,
        }
    }
}

/// Sink side of the pad: a fully built graph whose parameters glide.
pub trait SynthBackend {
    /// Backend clock in seconds.
    fn current_time(&self) -> f64;
    fn state(&self) -> ContextState;
    /// Begin all periodic sources (oscillators, LFOs, noise loop).
    fn start_sources(&mut self) -> Result<(), AudioError>;
    /// Exponential approach to `value` from `start_time` with `time_constant`.
    fn set_target(&mut self, id: ParamId, value: f32, start_time: f64, time_constant: f32);
    /// Linear master fade used on activation.
    fn ramp_master(&mut self, from: f32, to: f32, start_time: f64, duration: f64);
    fn suspend(&mut self);
    fn resume(&mut self);
}

enum Engine<B> {
    Idle,
    Running { graph: B, master_live_at: f64 },
    Unavailable,
}

/// Keeps an external synthesis graph in lockstep with the live parameters.
pub struct AudioParameterMapper<B: SynthBackend> {
    engine: Engine<B>,
    plan: GraphPlan,
    master_level: f32,
}

impl<B: SynthBackend> AudioParameterMapper<B> {
    pub fn new(plan: GraphPlan, master_level: f32) -> Self {
        Self {
            engine: Engine::Idle,
            plan,
            master_level,
        }
    }

    pub fn plan(&self) -> &GraphPlan {
        &self.plan
    }

    pub fn is_running(&self) -> bool {
        matches!(self.engine, Engine::Running { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.engine, Engine::Unavailable)
    }

    pub fn graph(&self) -> Option<&B> {
        match &self.engine {
            Engine::Running { graph, .. } => Some(graph),
            _ => None,
        }
    }

    pub fn graph_mut(&mut self) -> Option<&mut B> {
        match &mut self.engine {
            Engine::Running { graph, .. } => Some(graph),
            _ => None,
        }
    }

    /// Build the graph once via `open` and fade the master in. Must be called
    /// from a user gesture on the web. Idempotent: later calls do nothing,
    /// including after a failed first attempt.
    pub fn start_with<F>(&mut self, open: F)
    where
        F: FnOnce(&GraphPlan) -> Result<B, AudioError>,
    {
        match self.engine {
            Engine::Running { .. } => {
                log::warn!("[audio] start ignored; already running");
                return;
            }
            Engine::Unavailable => return,
            Engine::Idle => {}
        }
        let built = open(&self.plan).and_then(|mut graph| {
            graph.start_sources()?;
            Ok(graph)
        });
        match built {
            Ok(mut graph) => {
                let now = graph.current_time();
                let nominal = self.plan.initial.master_gain;
                graph.ramp_master(0.0, nominal, now, self.plan.master_ramp_sec);
                log::info!(
                    "[audio] graph started at {:.3}s, master -> {:.3} over {:.1}s",
                    now,
                    nominal,
                    self.plan.master_ramp_sec
                );
                self.engine = Engine::Running {
                    graph,
                    master_live_at: now + self.plan.master_ramp_sec,
                };
            }
            Err(e) => {
                log::warn!("[audio] unavailable, continuing silently: {}", e);
                self.engine = Engine::Unavailable;
            }
        }
    }

    /// Push smoothed targets for every node. No-op before start, after a
    /// failed start, and while the context is suspended.
    pub fn update(&mut self, t: f64, mode: Mode, params: &Parameters) {
        let Engine::Running {
            graph,
            master_live_at,
        } = &mut self.engine
        else {
            return;
        };
        if graph.state() != ContextState::Running {
            return;
        }
        let now = graph.current_time();
        let targets = AudioTargets::compute(t, mode, params, self.master_level);
        for id in ParamId::all() {
            if id == ParamId::MasterGain && now < *master_live_at {
                continue;
            }
            graph.set_target(id, targets.value(id), now, id.time_constant());
        }
    }

    /// Suspend while the page is hidden; resume when it is shown again.
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(graph) = self.graph_mut() {
            match (visible, graph.state()) {
                (false, ContextState::Running) => {
                    graph.suspend();
                    log::info!("[audio] suspended (hidden)");
                }
                (true, ContextState::Suspended) => {
                    graph.resume();
                    log::info!("[audio] resumed (visible)");
                }
                _ => {}
            }
        }
    }
}
