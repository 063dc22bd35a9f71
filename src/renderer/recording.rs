//! In-memory surface that records every call
//!
//! Used by unit tests and by the native headless run.

use super::{Sprite, Surface};

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Image {
        sprite: Sprite,
        x: f32,
        y: f32,
        alpha: f32,
    },
    ImageScaled {
        sprite: Sprite,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        alpha: f32,
    },
    Save,
    Translate { x: f32, y: f32 },
    Restore,
    Text {
        text: String,
        x: f32,
        y: f32,
        font: String,
    },
    Present,
}

/// Surface double that keeps a log of calls since the last `clear`
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    alpha: f32,
    font: String,
    fill_style: String,
    /// Calls since the last clear (inclusive)
    pub calls: Vec<DrawCall>,
    /// Frames presented so far
    pub presented: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            font: String::from("10px sans-serif"),
            fill_style: String::from("#000"),
            calls: Vec::new(),
            presented: 0,
        }
    }

    /// Number of times `sprite` was drawn since the last clear
    pub fn count(&self, sprite: Sprite) -> usize {
        self.calls
            .iter()
            .filter(|c| match c {
                DrawCall::Image { sprite: s, .. } | DrawCall::ImageScaled { sprite: s, .. } => {
                    *s == sprite
                }
                _ => false,
            })
            .count()
    }

    /// Text drawn since the last clear, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn fill_style(&self) -> &str {
        &self.fill_style
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        // Resetting a canvas also resets its context state
        self.calls.clear();
        self.alpha = 1.0;
        self.calls.push(DrawCall::Clear);
    }

    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32) {
        self.calls.push(DrawCall::Image {
            sprite,
            x,
            y,
            alpha: self.alpha,
        });
    }

    fn draw_image_scaled(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::ImageScaled {
            sprite,
            x,
            y,
            w,
            h,
            alpha: self.alpha,
        });
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::Translate { x, y });
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_fill_style(&mut self, style: &str) {
        self.fill_style = style.to_string();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            font: self.font.clone(),
        });
    }

    fn present(&mut self) {
        self.presented += 1;
        self.calls.push(DrawCall::Present);
    }
}
