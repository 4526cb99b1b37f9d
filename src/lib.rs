//! Ambient "presence" indicator: a particle halo and a drone pad that glide
//! between three intensity modes.
//!
//! `core` is the whole simulation and is platform independent. Everything
//! else is the browser front-end and only builds for `wasm32`.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::canvas::CanvasSink;
    use crate::constants::CANVAS_ID;
    use crate::core::config::SimConfig;
    use crate::core::mode::ModeController;
    use crate::core::sim::Simulation;
    use crate::{api, dom, events, frame};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("kehai-web starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let config = SimConfig::from_query(&dom::query_string(&window));
        let viewport = dom::viewport_from_window(&window);
        dom::apply_viewport(&canvas, &ctx, &viewport);

        let mode = Rc::new(RefCell::new(ModeController::new(config.initial_mode)));
        let sim = Rc::new(RefCell::new(Simulation::new(config, viewport)));

        api::install(&window, mode.clone()).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        events::wire_resize(&window, canvas.clone(), ctx.clone(), sim.clone());
        events::wire_visibility(&document, sim.clone());
        events::wire_audio_gesture(&window, sim.clone());

        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
            sim,
            mode,
            CanvasSink::new(ctx),
        )));
        frame::start_loop(frame_ctx);
        Ok(())
    }
}
