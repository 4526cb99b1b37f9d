use crate::core::audio_map::{
    noise_samples, AudioError, ContextState, GraphPlan, ParamId, SynthBackend, Waveform,
};
use web_sys as web;

fn js_detail(e: wasm_bindgen::JsValue) -> String {
    format!("{:?}", e)
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &'static str) -> Result<web::GainNode, AudioError> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(AudioError::NodeCreation {
                node: label,
                detail: js_detail(e),
            })
        }
    }
}

fn create_filter(
    ctx: &web::AudioContext,
    kind: web::BiquadFilterType,
    frequency: f32,
    q: f32,
    label: &'static str,
) -> Result<web::BiquadFilterNode, AudioError> {
    match web::BiquadFilterNode::new(ctx) {
        Ok(f) => {
            f.set_type(kind);
            f.frequency().set_value(frequency);
            f.q().set_value(q);
            Ok(f)
        }
        Err(e) => {
            log::error!("{} BiquadFilterNode error: {:?}", label, e);
            Err(AudioError::NodeCreation {
                node: label,
                detail: js_detail(e),
            })
        }
    }
}

fn create_oscillator(
    ctx: &web::AudioContext,
    waveform: Waveform,
    frequency: f32,
    label: &'static str,
) -> Result<web::OscillatorNode, AudioError> {
    match web::OscillatorNode::new(ctx) {
        Ok(o) => {
            o.set_type(match waveform {
                Waveform::Sine => web::OscillatorType::Sine,
                Waveform::Triangle => web::OscillatorType::Triangle,
                Waveform::Sawtooth => web::OscillatorType::Sawtooth,
            });
            o.frequency().set_value(frequency);
            Ok(o)
        }
        Err(e) => {
            log::error!("{} OscillatorNode error: {:?}", label, e);
            Err(AudioError::NodeCreation {
                node: label,
                detail: js_detail(e),
            })
        }
    }
}

fn link(from: &web::AudioNode, to: &web::AudioNode, names: (&'static str, &'static str)) -> Result<(), AudioError> {
    from.connect_with_audio_node(to)
        .map(|_| ())
        .map_err(|e| AudioError::Connect {
            from: names.0,
            to: names.1,
            detail: js_detail(e),
        })
}

fn link_param(from: &web::AudioNode, to: &web::AudioParam, names: (&'static str, &'static str)) -> Result<(), AudioError> {
    from.connect_with_audio_param(to).map_err(|e| AudioError::Connect {
        from: names.0,
        to: names.1,
        detail: js_detail(e),
    })
}

struct Voice {
    osc: web::OscillatorNode,
    filter: web::BiquadFilterNode,
    gain: web::GainNode,
    lfo: web::OscillatorNode,
    lfo_depth: web::GainNode,
}

/// The pad graph on a real `AudioContext`. Either every node below exists
/// and is wired, or construction fails and nothing is kept.
pub struct WebAudioGraph {
    ctx: web::AudioContext,
    voices: Vec<Voice>,
    noise: web::AudioBufferSourceNode,
    shimmer_filter: web::BiquadFilterNode,
    shimmer_gain: web::GainNode,
    echo_delay: web::DelayNode,
    echo_feedback: web::GainNode,
    echo_mix: web::GainNode,
    tilt: web::BiquadFilterNode,
    _compressor: web::DynamicsCompressorNode,
    master: web::GainNode,
}

impl WebAudioGraph {
    pub fn open(plan: &GraphPlan) -> Result<Self, AudioError> {
        let ctx = web::AudioContext::new().map_err(|e| AudioError::Unavailable(js_detail(e)))?;
        let init = &plan.initial;

        let master = create_gain(&ctx, 0.0, "master")?;
        let compressor = web::DynamicsCompressorNode::new(&ctx).map_err(|e| {
            log::error!("DynamicsCompressorNode error: {:?}", e);
            AudioError::NodeCreation {
                node: "compressor",
                detail: js_detail(e),
            }
        })?;
        let c = plan.compressor;
        compressor.threshold().set_value(c.threshold_db);
        compressor.knee().set_value(c.knee_db);
        compressor.ratio().set_value(c.ratio);
        compressor.attack().set_value(c.attack_sec);
        compressor.release().set_value(c.release_sec);
        let tilt = create_filter(&ctx, web::BiquadFilterType::Lowpass, init.tilt_cutoff, 0.5, "tilt")?;

        link(&tilt, &compressor, ("tilt", "compressor"))?;
        link(&compressor, &master, ("compressor", "master"))?;
        link(&master, &ctx.destination(), ("master", "destination"))?;

        // Pad bus feeds the tilt directly and the echo send.
        let pad_bus = create_gain(&ctx, 1.0, "pad bus")?;
        link(&pad_bus, &tilt, ("pad bus", "tilt"))?;

        let echo_delay = ctx
            .create_delay_with_max_delay_time(plan.echo_max_sec)
            .map_err(|e| {
                log::error!("DelayNode error: {:?}", e);
                AudioError::NodeCreation {
                    node: "echo delay",
                    detail: js_detail(e),
                }
            })?;
        echo_delay.delay_time().set_value(init.echo_time);
        let echo_feedback = create_gain(&ctx, init.echo_feedback, "echo feedback")?;
        let echo_mix = create_gain(&ctx, init.echo_mix, "echo mix")?;
        link(&pad_bus, &echo_delay, ("pad bus", "echo delay"))?;
        link(&echo_delay, &echo_feedback, ("echo delay", "echo feedback"))?;
        link(&echo_feedback, &echo_delay, ("echo feedback", "echo delay"))?;
        link(&echo_delay, &echo_mix, ("echo delay", "echo mix"))?;
        link(&echo_mix, &tilt, ("echo mix", "tilt"))?;

        let mut voices = Vec::with_capacity(plan.waveforms.len());
        for (i, waveform) in plan.waveforms.iter().enumerate() {
            let v = init.voices[i];
            let osc = create_oscillator(&ctx, *waveform, v.frequency, "voice")?;
            osc.detune().set_value(v.detune);
            let filter = create_filter(
                &ctx,
                web::BiquadFilterType::Bandpass,
                v.filter_frequency,
                v.filter_q,
                "voice bandpass",
            )?;
            let gain = create_gain(&ctx, v.gain, "voice")?;
            let lfo = create_oscillator(&ctx, Waveform::Sine, v.lfo_rate, "lfo")?;
            let lfo_depth = create_gain(&ctx, v.lfo_depth, "lfo depth")?;

            link(&osc, &filter, ("voice", "voice bandpass"))?;
            link(&filter, &gain, ("voice bandpass", "voice gain"))?;
            link(&gain, &pad_bus, ("voice gain", "pad bus"))?;
            link(&lfo, &lfo_depth, ("lfo", "lfo depth"))?;
            link_param(&lfo_depth, &filter.frequency(), ("lfo depth", "bandpass frequency"))?;
            voices.push(Voice {
                osc,
                filter,
                gain,
                lfo,
                lfo_depth,
            });
        }

        // Looping noise for the shimmer layer.
        let rate = ctx.sample_rate();
        let frames = ((rate * plan.noise_seconds) as u32).max(1);
        let buffer = ctx.create_buffer(1, frames, rate).map_err(|e| AudioError::NodeCreation {
            node: "noise buffer",
            detail: js_detail(e),
        })?;
        let mut samples = noise_samples(plan.noise_seed, frames as usize);
        buffer
            .copy_to_channel(&mut samples, 0)
            .map_err(|e| AudioError::NodeCreation {
                node: "noise buffer",
                detail: js_detail(e),
            })?;
        let noise = web::AudioBufferSourceNode::new(&ctx).map_err(|e| {
            log::error!("AudioBufferSourceNode error: {:?}", e);
            AudioError::NodeCreation {
                node: "noise",
                detail: js_detail(e),
            }
        })?;
        noise.set_buffer(Some(&buffer));
        noise.set_loop(true);
        let shimmer_filter = create_filter(
            &ctx,
            web::BiquadFilterType::Highpass,
            init.shimmer_filter_frequency,
            0.7,
            "shimmer highpass",
        )?;
        let shimmer_gain = create_gain(&ctx, init.shimmer_gain, "shimmer")?;
        link(&noise, &shimmer_filter, ("noise", "shimmer highpass"))?;
        link(&shimmer_filter, &shimmer_gain, ("shimmer highpass", "shimmer gain"))?;
        link(&shimmer_gain, &tilt, ("shimmer gain", "tilt"))?;

        log::info!(
            "[audio] web graph built: {} voices, {:.0} Hz, {} noise frames",
            voices.len(),
            rate,
            frames
        );
        Ok(Self {
            ctx,
            voices,
            noise,
            shimmer_filter,
            shimmer_gain,
            echo_delay,
            echo_feedback,
            echo_mix,
            tilt,
            _compressor: compressor,
            master,
        })
    }

    fn param(&self, id: ParamId) -> Option<web::AudioParam> {
        let voice = |i: usize| self.voices.get(i);
        Some(match id {
            ParamId::VoiceFrequency(i) => voice(i)?.osc.frequency(),
            ParamId::VoiceDetune(i) => voice(i)?.osc.detune(),
            ParamId::VoiceGain(i) => voice(i)?.gain.gain(),
            ParamId::VoiceFilterFrequency(i) => voice(i)?.filter.frequency(),
            ParamId::VoiceFilterQ(i) => voice(i)?.filter.q(),
            ParamId::LfoRate(i) => voice(i)?.lfo.frequency(),
            ParamId::LfoDepth(i) => voice(i)?.lfo_depth.gain(),
            ParamId::ShimmerGain => self.shimmer_gain.gain(),
            ParamId::ShimmerFilterFrequency => self.shimmer_filter.frequency(),
            ParamId::TiltCutoff => self.tilt.frequency(),
            ParamId::EchoTime => self.echo_delay.delay_time(),
            ParamId::EchoFeedback => self.echo_feedback.gain(),
            ParamId::EchoMix => self.echo_mix.gain(),
            ParamId::MasterGain => self.master.gain(),
        })
    }
}

impl SynthBackend for WebAudioGraph {
    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn state(&self) -> ContextState {
        match self.ctx.state() {
            web::AudioContextState::Running => ContextState::Running,
            web::AudioContextState::Suspended => ContextState::Suspended,
            _ => ContextState::Closed,
        }
    }

    fn start_sources(&mut self) -> Result<(), AudioError> {
        let schedule = |r: Result<(), wasm_bindgen::JsValue>| {
            r.map_err(|e| AudioError::Schedule { detail: js_detail(e) })
        };
        for v in &self.voices {
            schedule(v.osc.start())?;
            schedule(v.lfo.start())?;
        }
        schedule(self.noise.start())?;
        _ = self.ctx.resume();
        Ok(())
    }

    fn set_target(&mut self, id: ParamId, value: f32, start_time: f64, time_constant: f32) {
        if let Some(p) = self.param(id) {
            _ = p.set_target_at_time(value, start_time, time_constant as f64);
        }
    }

    fn ramp_master(&mut self, from: f32, to: f32, start_time: f64, duration: f64) {
        let g = self.master.gain();
        _ = g.cancel_scheduled_values(start_time);
        _ = g.set_value_at_time(from, start_time);
        _ = g.linear_ramp_to_value_at_time(to, start_time + duration);
    }

    fn suspend(&mut self) {
        _ = self.ctx.suspend();
    }

    fn resume(&mut self) {
        _ = self.ctx.resume();
    }
}
