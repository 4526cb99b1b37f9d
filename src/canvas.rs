use crate::core::particles::Viewport;
use crate::core::render::{BlendMode, Color, FillArea, RadialGradient, RenderSink};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

/// `RenderSink` over a Canvas 2D context. Coordinates are CSS pixels; the
/// device pixel ratio lives in the context transform.
pub struct CanvasSink {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSink {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    #[allow(deprecated)]
    fn set_fill(&self, style: &JsValue) {
        self.ctx.set_fill_style(style);
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl RenderSink for CanvasSink {
    fn fill_background(&mut self, viewport: &Viewport, color: Color) {
        self.set_fill(&JsValue::from_str(&color.to_string()));
        self.ctx
            .fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn draw_radial_gradient(&mut self, viewport: &Viewport, gradient: &RadialGradient, area: FillArea) {
        let g = match self.ctx.create_radial_gradient(
            gradient.inner_center.x as f64,
            gradient.inner_center.y as f64,
            gradient.inner_radius.max(0.0) as f64,
            gradient.outer_center.x as f64,
            gradient.outer_center.y as f64,
            gradient.outer_radius.max(0.0) as f64,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("radial gradient skipped: {:?}", e);
                return;
            }
        };
        for stop in &gradient.stops {
            _ = g.add_color_stop(stop.offset, &stop.color.to_string());
        }
        self.set_fill(&g);
        match area {
            FillArea::Viewport => {
                self.ctx
                    .fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
            }
            FillArea::Circle { center, radius } => {
                self.circle_path(center, radius);
                self.ctx.fill();
            }
        }
    }

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(&JsValue::from_str(&color.to_string()));
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    #[allow(deprecated)]
    fn draw_stroked_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.ctx
            .set_stroke_style(&JsValue::from_str(&color.to_string()));
        self.ctx.set_line_width(width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn set_blend(&mut self, mode: BlendMode) {
        let op = match mode {
            BlendMode::Normal => "source-over",
            BlendMode::Screen => "screen",
        };
        _ = self.ctx.set_global_composite_operation(op);
    }
}
