use backdrop_core::{Extent, Rgb, Surface};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `Surface` backed by a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        Self { canvas, context }
    }

    /// The context, but only while the canvas is still in the document.
    fn ctx(&self) -> Option<&CanvasRenderingContext2d> {
        if self.canvas.is_connected() {
            self.context.as_ref()
        } else {
            None
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, extent: Extent) {
        let (w, h) = extent.pixels();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    fn has_context(&self) -> bool {
        self.ctx().is_some()
    }

    fn clear(&mut self, extent: Extent) {
        if let Some(ctx) = self.ctx() {
            ctx.clear_rect(0.0, 0.0, extent.width as f64, extent.height as f64);
        }
    }

    fn fill_overlay(&mut self, extent: Extent, color: Rgb, alpha: f32) {
        if let Some(ctx) = self.ctx() {
            #[allow(deprecated)]
            ctx.set_fill_style(&JsValue::from_str(&color.css_rgba(alpha)));
            ctx.fill_rect(0.0, 0.0, extent.width as f64, extent.height as f64);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        if let Some(ctx) = self.ctx() {
            ctx.begin_path();
            let _ = ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            #[allow(deprecated)]
            ctx.set_fill_style(&JsValue::from_str(&color.css_rgba(alpha)));
            ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32) {
        if let Some(ctx) = self.ctx() {
            ctx.begin_path();
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(to.x as f64, to.y as f64);
            #[allow(deprecated)]
            ctx.set_stroke_style(&JsValue::from_str(&color.css_rgba(alpha)));
            ctx.set_line_width(width as f64);
            ctx.stroke();
        }
    }
}
