use crate::audio::WebAudioGraph;
use crate::frame::SharedSim;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browsers only allow audio after a user gesture, so the graph is built
/// on the first pointer or key press. Later gestures are ignored by the
/// mapper.
pub fn wire_audio_gesture(window: &web::Window, sim: SharedSim) {
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let mut sim = sim.borrow_mut();
        if sim.audio().is_running() || sim.audio().is_unavailable() {
            return;
        }
        sim.arm_audio(WebAudioGraph::open);
    }) as Box<dyn FnMut(web::Event)>);
    for kind in ["pointerdown", "keydown"] {
        _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
