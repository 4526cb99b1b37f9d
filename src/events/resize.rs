use crate::dom;
use crate::frame::SharedSim;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_resize(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    sim: SharedSim,
) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let viewport = dom::viewport_from_window(&win);
        dom::apply_viewport(&canvas, &ctx, &viewport);
        sim.borrow_mut().resize(viewport);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
