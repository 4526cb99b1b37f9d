// Shared simulation/audio tuning constants.
//
// Everything here is consumed by the pure `core` tree so the web front-end and
// the host tests agree on the same numbers.

// Default generator seed ("keha")
pub const DEFAULT_SEED: u32 = 0x6b65_6861;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.05; // longest step applied after a stall
pub const FOLLOW_BASE: f32 = 0.001; // follow = 1 - FOLLOW_BASE^dt

// Per-mode targets: [speed, glow, drift, burst]
pub const CALM_TARGET: [f32; 4] = [0.55, 0.7, 0.55, 0.25];
pub const ACTIVE_TARGET: [f32; 4] = [1.0, 1.05, 1.0, 0.55];
pub const SURGE_TARGET: [f32; 4] = [1.55, 1.5, 1.65, 0.95];

// Bias derivation: smoothstep((glow - BIAS_GLOW_OFFSET) / BIAS_GLOW_SPAN)
pub const BIAS_GLOW_OFFSET: f32 = 0.65;
pub const BIAS_GLOW_SPAN: f32 = 1.0;

// Population
pub const MIN_PARTICLES: usize = 260;
pub const MAX_PARTICLES: usize = 650;

// Spawn ring (fractions of the smaller viewport dimension)
pub const SPAWN_RING_MIN: f32 = 0.11;
pub const SPAWN_RING_SPAN: f32 = 0.10;
pub const SPAWN_JITTER_MIN: f32 = 0.12;
pub const SPAWN_JITTER_SPAN: f32 = 0.35;

// Hue window: cyan -> blue -> purple
pub const HUE_MIN: f32 = 185.0;
pub const HUE_MAX: f32 = 275.0;

// Spawned attribute ranges
pub const SIZE_RANGE: (f32, f32) = (0.6, 2.2);
pub const LIFE_RANGE_SEC: (f32, f32) = (2.5, 7.5);
pub const SPEED_RANGE: (f32, f32) = (0.22, 0.9);

// Motion
pub const FLOW_TIME_SCALE: f64 = 0.55; // particles sample the field at t * this
pub const PULL_RADIUS: f32 = 0.26; // fraction of min dimension
pub const PULL_GAIN: f32 = 0.055;
pub const TANGENT_GAIN: f32 = 0.09;
pub const VELOCITY_BLEND: f32 = 0.35; // share of new acceleration taken per step
pub const MAX_SPEED_GAIN: f32 = 1.45;
pub const FRAME_RATE_REF: f32 = 60.0; // velocities are expressed per 1/60 s
pub const FADE_EDGE: f32 = 0.62; // fraction of min dimension
pub const FADE_EDGE_SPAN: f32 = 0.25; // fraction of min dimension for full edge aging
pub const FADE_EDGE_AGING: f32 = 1.8;
pub const WRAP_MARGIN_PX: f32 = 60.0;

// Flow field
pub const FLOW_SPATIAL: [f32; 3] = [1.9, 3.4, 5.7];
pub const FLOW_TEMPORAL: [f64; 3] = [0.8, 0.6, 0.35]; // rad/s, multiplied with f64 time
pub const FLOW_GAIN: f32 = 1.25;

// Surge micro-bursts
pub const SURGE_BURST_CHANCE: f64 = 0.02;
pub const SURGE_BURST_MIN: usize = 10;
pub const SURGE_BURST_SPAN: f64 = 18.0;

// Core glow
pub const CORE_RADIUS: f32 = 0.06; // fraction of min dimension
pub const BREATHE_RATE: f64 = 0.62;
pub const BREATHE2_RATE: f64 = 0.37;
pub const BREATHE2_PHASE: f64 = 1.7;
pub const RING_WIDTH: f32 = 1.1;

// ---------------------------------------------------------------------------
// Audio pad
// ---------------------------------------------------------------------------

pub const VOICE_COUNT: usize = 3;

// Chord tones (Hz). A-rooted pad, one more tone per intensity step.
pub const CALM_CHORD_HZ: &[f32] = &[110.0, 164.81, 220.0];
pub const ACTIVE_CHORD_HZ: &[f32] = &[110.0, 164.81, 220.0, 277.18];
pub const SURGE_CHORD_HZ: &[f32] = &[110.0, 164.81, 220.0, 277.18, 329.63];
pub const CHORD_ROTATE_SEC: f64 = 9.0; // voices walk the extra tones this often

// Voices
pub const VOICE_DETUNE_CENTS: [f32; VOICE_COUNT] = [-7.0, 0.0, 6.0];
pub const VIBRATO_RATE_HZ: f32 = 0.11;
pub const VIBRATO_DEPTH: f32 = 0.0025; // relative pitch deviation
pub const VOICE_GAIN_BASE: f32 = 0.16;
pub const BANDPASS_BASE_HZ: f32 = 380.0;
pub const BANDPASS_GLOW_HZ: f32 = 520.0;
pub const BANDPASS_VOICE_SPREAD: f32 = 0.18;
pub const BANDPASS_Q_BASE: f32 = 0.9;
pub const BANDPASS_Q_SPEED: f32 = 0.35;
pub const LFO_RATE_BASE_HZ: f32 = 0.05;
pub const LFO_RATE_SPEED_HZ: f32 = 0.09;
pub const LFO_DEPTH_BASE_HZ: f32 = 40.0;
pub const LFO_DEPTH_GLOW_HZ: f32 = 110.0;

// Shimmer (looping filtered noise)
pub const NOISE_BUFFER_SEC: f32 = 2.0;
pub const SHIMMER_BASE: [f32; 3] = [0.012, 0.022, 0.036]; // calm, active, surge
pub const SHIMMER_FILTER_BASE_HZ: f32 = 4200.0;
pub const SHIMMER_FILTER_GLOW_HZ: f32 = 2400.0;

// Tone tilt (low-pass before the compressor)
pub const TILT_BASE_HZ: f32 = 1100.0;
pub const TILT_GLOW_HZ: f32 = 2400.0;

// Echo bus
pub const ECHO_MAX_SEC: f64 = 2.0;
pub const ECHO_TIME_BASE_SEC: f32 = 0.62;
pub const ECHO_TIME_SPEED_SEC: f32 = 0.14;
pub const ECHO_FEEDBACK_BASE: f32 = 0.22;
pub const ECHO_FEEDBACK_BURST: f32 = 0.2;
pub const ECHO_FEEDBACK_GLOW: f32 = 0.06;
pub const ECHO_FEEDBACK_MAX: f32 = 0.7;
pub const ECHO_MIX_BASE: f32 = 0.12;
pub const ECHO_MIX_GLOW: f32 = 0.16;

// Compressor
pub const COMP_THRESHOLD_DB: f32 = -18.0;
pub const COMP_KNEE_DB: f32 = 12.0;
pub const COMP_RATIO: f32 = 3.0;
pub const COMP_ATTACK_SEC: f32 = 0.02;
pub const COMP_RELEASE_SEC: f32 = 0.35;

// Master
pub const MASTER_LEVEL: f32 = 0.3; // nominal master gain ("base")
pub const MASTER_FLOOR: f32 = 0.35;
pub const MASTER_GLOW: f32 = 0.2;
pub const MASTER_BURST: f32 = 0.2;
pub const MASTER_BREATHE: f32 = 0.03;
pub const MASTER_BREATHE2: f32 = 0.02;
pub const MASTER_RAMP_SEC: f64 = 1.6;

// Smoothing time constants (seconds)
pub const TAU_FREQUENCY: f32 = 0.35;
pub const TAU_DETUNE: f32 = 0.3;
pub const TAU_VOICE_GAIN: f32 = 0.25;
pub const TAU_FILTER: f32 = 0.2;
pub const TAU_Q: f32 = 0.3;
pub const TAU_LFO: f32 = 0.35;
pub const TAU_SHIMMER: f32 = 0.25;
pub const TAU_TILT: f32 = 0.2;
pub const TAU_ECHO_TIME: f32 = 0.35;
pub const TAU_ECHO: f32 = 0.25;
pub const TAU_MASTER: f32 = 0.12;
