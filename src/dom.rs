use crate::constants::DPR_MAX;
use crate::core::particles::Viewport;
use web_sys as web;

/// Current inner window size and pixel ratio.
pub fn viewport_from_window(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(w, h, window.device_pixel_ratio().min(DPR_MAX))
}

/// Size the backing store to CSS size times DPR and scale the context so
/// drawing stays in CSS pixels.
pub fn apply_viewport(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    viewport: &Viewport,
) {
    let (bw, bh) = viewport.backing_size();
    canvas.set_width(bw);
    canvas.set_height(bh);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    let dpr = viewport.dpr as f64;
    _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

pub fn query_string(window: &web::Window) -> String {
    window.location().search().unwrap_or_default()
}
