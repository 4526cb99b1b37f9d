//! `window.KEHAI`: the control surface an external decision source drives.
//!
//! Every entry validates its input through `ModeController`; bad input is
//! ignored and never throws back into the caller.

use crate::constants::API_GLOBAL;
use crate::core::mode::ModeReport;
use crate::frame::SharedMode;
use js_sys::{Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Read `{ state }` out of an arbitrary JS value.
fn report_from_js(value: &JsValue) -> ModeReport {
    let state = if value.is_object() {
        Reflect::get(value, &JsValue::from_str("state"))
            .ok()
            .and_then(|s| s.as_string())
    } else {
        None
    };
    ModeReport { state }
}

fn set_fn(target: &Object, name: &str, f: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(name), f).map(|_| ())
}

pub fn install(window: &web::Window, mode: SharedMode) -> Result<(), JsValue> {
    let api = Object::new();

    let m = mode.clone();
    let set_mode = Closure::wrap(Box::new(move |value: JsValue| match value.as_string() {
        Some(label) => {
            m.borrow_mut().set_label(&label);
        }
        None => log::debug!("[api] setMode ignored non-string {:?}", value),
    }) as Box<dyn FnMut(JsValue)>);

    let m = mode.clone();
    let get_mode = Closure::wrap(
        Box::new(move || JsValue::from_str(m.borrow().mode().as_str())) as Box<dyn FnMut() -> JsValue>,
    );

    let m = mode;
    let update = Closure::wrap(Box::new(move |value: JsValue| {
        m.borrow_mut().update_from_report(&report_from_js(&value));
    }) as Box<dyn FnMut(JsValue)>);

    set_fn(&api, "setMode", set_mode.as_ref())?;
    set_fn(&api, "setState", set_mode.as_ref())?;
    set_fn(&api, "getMode", get_mode.as_ref())?;
    set_fn(&api, "updateFromMode", update.as_ref())?;
    set_fn(&api, "updateFromAI", update.as_ref())?;

    // `KEHAI.state` reads like a plain property.
    let descriptor = Object::new();
    Reflect::set(&descriptor, &JsValue::from_str("get"), get_mode.as_ref())?;
    Reflect::set(&descriptor, &JsValue::from_str("enumerable"), &JsValue::TRUE)?;
    Object::define_property(&api, &JsValue::from_str("state"), &descriptor);

    Reflect::set(window, &JsValue::from_str(API_GLOBAL), &api)?;

    set_mode.forget();
    get_mode.forget();
    update.forget();
    log::info!("[api] window.{} installed", API_GLOBAL);
    Ok(())
}
