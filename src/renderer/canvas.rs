//! Canvas 2D painter (wasm only)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{DrawCmd, css_color};

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the level's canvas size
    pub fn resize(&self, width: f32, height: f32) {
        let (w, h) = (width as u32, height as u32);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            log::info!("Canvas resized to {}x{}", w, h);
        }
    }

    pub fn paint(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for cmd in cmds {
            match *cmd {
                DrawCmd::Clear { width, height } => {
                    self.resize(width, height);
                    ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                }
                DrawCmd::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    ctx.set_fill_style_str(&css_color(color));
                    ctx.fill_rect(x as f64, y as f64, width as f64, height as f64);
                }
                DrawCmd::Circle {
                    x,
                    y,
                    radius,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(alpha as f64);
                    ctx.set_fill_style_str(&css_color(color));
                    ctx.begin_path();
                    ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU)?;
                    ctx.fill();
                    ctx.close_path();
                    ctx.set_global_alpha(1.0);
                }
            }
        }
        Ok(())
    }
}
