//! Host-side synthesis graph that only tracks parameter automation.
//!
//! Produces no sound. Each parameter follows the same curves a Web Audio
//! `AudioParam` would (`setTargetAtTime` and a linear ramp), so mapper
//! behavior can be checked off the browser.

use crate::core::audio_map::{AudioError, ContextState, GraphPlan, ParamId, SynthBackend};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Curve {
    Hold,
    Target { tau: f64 },
    Linear { end: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Automation {
    from: f32,
    to: f32,
    start: f64,
    curve: Curve,
}

impl Automation {
    fn hold(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            curve: Curve::Hold,
        }
    }

    fn value_at(&self, t: f64) -> f32 {
        if t <= self.start {
            return self.from;
        }
        match self.curve {
            Curve::Hold => self.from,
            Curve::Target { tau } => {
                let k = (-(t - self.start) / tau.max(1e-6)).exp() as f32;
                self.to + (self.from - self.to) * k
            }
            Curve::Linear { end } => {
                if t >= end {
                    self.to
                } else {
                    let f = ((t - self.start) / (end - self.start)) as f32;
                    self.from + (self.to - self.from) * f
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct OfflineGraph {
    clock: f64,
    state: ContextState,
    params: FnvHashMap<ParamId, Automation>,
    sources_started: bool,
    target_calls: usize,
}

impl OfflineGraph {
    pub fn open(plan: &GraphPlan) -> Result<Self, AudioError> {
        let mut params = FnvHashMap::default();
        for id in ParamId::all() {
            let value = if id == ParamId::MasterGain {
                0.0
            } else {
                plan.initial.value(id)
            };
            params.insert(id, Automation::hold(value));
        }
        Ok(Self {
            clock: 0.0,
            state: ContextState::Running,
            params,
            sources_started: false,
            target_calls: 0,
        })
    }

    /// Stand-in for an environment without an audio device.
    pub fn unavailable(_plan: &GraphPlan) -> Result<Self, AudioError> {
        Err(AudioError::Unavailable("no audio device".into()))
    }

    /// Move the clock forward. A suspended context does not advance.
    pub fn advance(&mut self, dt: f64) {
        if self.state == ContextState::Running && dt > 0.0 {
            self.clock += dt;
        }
    }

    pub fn value(&self, id: ParamId) -> f32 {
        self.params
            .get(&id)
            .map(|a| a.value_at(self.clock))
            .unwrap_or(0.0)
    }

    pub fn sources_started(&self) -> bool {
        self.sources_started
    }

    /// Number of `set_target` calls received so far.
    pub fn target_calls(&self) -> usize {
        self.target_calls
    }

    fn schedule(&mut self, id: ParamId, to: f32, start: f64, curve: Curve, from: Option<f32>) {
        let from = from.unwrap_or_else(|| self.value(id));
        self.params.insert(
            id,
            Automation {
                from,
                to,
                start,
                curve,
            },
        );
    }
}

impl SynthBackend for OfflineGraph {
    fn current_time(&self) -> f64 {
        self.clock
    }

    fn state(&self) -> ContextState {
        self.state
    }

    fn start_sources(&mut self) -> Result<(), AudioError> {
        self.sources_started = true;
        Ok(())
    }

    fn set_target(&mut self, id: ParamId, value: f32, start_time: f64, time_constant: f32) {
        self.target_calls += 1;
        self.schedule(
            id,
            value,
            start_time,
            Curve::Target {
                tau: time_constant as f64,
            },
            None,
        );
    }

    fn ramp_master(&mut self, from: f32, to: f32, start_time: f64, duration: f64) {
        self.schedule(
            ParamId::MasterGain,
            to,
            start_time,
            Curve::Linear {
                end: start_time + duration.max(0.0),
            },
            Some(from),
        );
    }

    fn suspend(&mut self) {
        if self.state == ContextState::Running {
            self.state = ContextState::Suspended;
        }
    }

    fn resume(&mut self) {
        if self.state == ContextState::Suspended {
            self.state = ContextState::Running;
        }
    }
}
