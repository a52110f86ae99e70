
use glam::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::surface::{Rgba, Surface};

/// [`Surface`] backed by a canvas' 2D context.
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas not supported")?
            .dyn_into()?;
        Ok(Self { ctx })
    }
}

// Canvas calls that return `Result` only fail on non-finite geometry, which
// the engine never produces; a failed primitive is dropped for that frame.
impl Surface for Canvas2dSurface {
    fn clear(&mut self, size: DVec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x, size.y);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.set_stroke_style_str(&color.to_string());
        ctx.set_line_width(width);
        ctx.stroke();
    }

    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let ctx = &self.ctx;
        ctx.begin_path();
        if ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU).is_err() {
            return;
        }
        ctx.set_fill_style_str(&color.to_string());
        ctx.fill();
    }

    fn fill_radial(&mut self, center: DVec2, radius: f64, inner: Rgba, outer: Rgba) {
        let ctx = &self.ctx;
        let Ok(gradient) = ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
        else {
            return;
        };
        if gradient.add_color_stop(0.0, &inner.to_string()).is_err()
            || gradient.add_color_stop(1.0, &outer.to_string()).is_err()
        {
            return;
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        if ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU).is_err() {
            return;
        }
        ctx.fill();
    }
}
