//! Double-buffered Canvas 2D backend
//!
//! All drawing lands on an off-screen buffer canvas; `present` copies it onto
//! the visible canvas in one `drawImage`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Sprite, Surface};
use crate::platform::SetupError;
use crate::platform::assets::SpriteImages;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    buffer: HtmlCanvasElement,
    buffer_ctx: CanvasRenderingContext2d,
    images: SpriteImages,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SetupError> {
    canvas
        .get_context("2d")
        .map_err(SetupError::from_js)?
        .ok_or(SetupError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SetupError::NoContext)
}

impl CanvasSurface {
    /// Wrap the visible canvas and create its off-screen twin
    pub fn new(
        document: &web_sys::Document,
        canvas: HtmlCanvasElement,
        images: SpriteImages,
    ) -> Result<Self, SetupError> {
        let ctx = context_2d(&canvas)?;
        let buffer: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(SetupError::from_js)?
            .dyn_into()
            .map_err(|_| SetupError::WrongElementType("canvas".into()))?;
        buffer.set_width(canvas.width());
        buffer.set_height(canvas.height());
        let buffer_ctx = context_2d(&buffer)?;

        Ok(Self {
            canvas,
            ctx,
            buffer,
            buffer_ctx,
            images,
        })
    }

    /// Resize both canvases
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.buffer.set_width(width);
        self.buffer.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.buffer.width() as f32
    }

    fn height(&self) -> f32 {
        self.buffer.height() as f32
    }

    fn clear(&mut self) {
        self.canvas.set_width(self.canvas.width());
        self.buffer.set_width(self.buffer.width());
    }

    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32) {
        let _ = self.buffer_ctx.draw_image_with_html_image_element(
            self.images.get(sprite),
            x as f64,
            y as f64,
        );
    }

    fn draw_image_scaled(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
        let _ = self
            .buffer_ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                self.images.get(sprite),
                x as f64,
                y as f64,
                w as f64,
                h as f64,
            );
    }

    fn save(&mut self) {
        self.buffer_ctx.save();
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.buffer_ctx.translate(x as f64, y as f64);
    }

    fn restore(&mut self) {
        self.buffer_ctx.restore();
    }

    fn global_alpha(&self) -> f32 {
        self.buffer_ctx.global_alpha() as f32
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.buffer_ctx.set_global_alpha(alpha as f64);
    }

    fn set_font(&mut self, font: &str) {
        self.buffer_ctx.set_font(font);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.buffer_ctx.set_fill_style_str(style);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.buffer_ctx.fill_text(text, x as f64, y as f64);
    }

    fn present(&mut self) {
        let _ = self
            .ctx
            .draw_image_with_html_canvas_element(&self.buffer, 0.0, 0.0);
    }
}
