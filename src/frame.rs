use crate::audio::WebAudioGraph;
use crate::canvas::CanvasSink;
use crate::core::mode::ModeController;
use crate::core::sim::Simulation;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedSim = Rc<RefCell<Simulation<WebAudioGraph>>>;
pub type SharedMode = Rc<RefCell<ModeController>>;

pub struct FrameContext {
    pub sim: SharedSim,
    pub mode: SharedMode,
    pub sink: CanvasSink,
    pub started: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(sim: SharedSim, mode: SharedMode, sink: CanvasSink) -> Self {
        let now = Instant::now();
        Self {
            sim,
            mode,
            sink,
            started: now,
            last_instant: now,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let t = (now - self.started).as_secs_f64();

        // Read once; requests arriving mid-tick apply next frame.
        let mode = self.mode.borrow().mode();
        self.sim
            .borrow_mut()
            .tick(dt_sec, t, mode, &mut self.sink);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
