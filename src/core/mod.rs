pub mod audio_map;
pub mod config;
pub mod constants;
pub mod flow;
pub mod glow;
pub mod mode;
pub mod offline;
pub mod params;
pub mod particles;
pub mod render;
pub mod rng;
pub mod sim;

pub use audio_map::{
    chord_for, AudioError, AudioParameterMapper, AudioTargets, ContextState, GraphPlan, ParamId,
    SynthBackend, Waveform,
};
pub use config::SimConfig;
pub use glow::{Breathing, CoreGlow};
pub use mode::{Mode, ModeController, ModeReport};
pub use offline::OfflineGraph;
pub use params::{ParameterInterpolator, Parameters, TargetVector};
pub use particles::{Particle, ParticleSprite, ParticleSystem, Viewport};
pub use render::{BlendMode, Color, FillArea, RadialGradient, RenderSink};
pub use rng::Mulberry32;
pub use sim::{Simulation, TickReport};
