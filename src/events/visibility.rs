use crate::frame::SharedSim;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_visibility(document: &web::Document, sim: SharedSim) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        sim.borrow_mut().set_visible(!doc.hidden());
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
