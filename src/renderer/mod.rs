//! Drawing surface abstraction
//!
//! The simulation draws through [`Surface`], a narrow slice of the Canvas 2D
//! API. The browser backend is [`CanvasSurface`]; tests and the native
//! headless run use [`RecordingSurface`].

pub mod hud;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background1,
    Background2,
    Ship,
    Shot,
    Bugger,
    Fire,
}

impl Sprite {
    pub const ALL: [Sprite; 6] = [
        Sprite::Background1,
        Sprite::Background2,
        Sprite::Ship,
        Sprite::Shot,
        Sprite::Bugger,
        Sprite::Fire,
    ];

    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Background1 => "images/background-1.jpg",
            Sprite::Background2 => "images/background-2.jpg",
            Sprite::Ship => "images/ship.png",
            Sprite::Shot => "images/shot.png",
            Sprite::Bugger => "images/bugger.png",
            Sprite::Fire => "images/fire.png",
        }
    }

    /// Index into dense per-sprite tables
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Off-screen drawing buffer, cleared and presented once per frame
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Wipe the buffer (the canvas idiom is resetting its width)
    fn clear(&mut self);

    /// Draw a sprite at its natural size
    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32);

    /// Draw a sprite stretched to `w` x `h`
    fn draw_image_scaled(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32);

    fn save(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn restore(&mut self);

    fn global_alpha(&self) -> f32;
    fn set_global_alpha(&mut self, alpha: f32);

    fn set_font(&mut self, font: &str);
    fn set_fill_style(&mut self, style: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Copy the buffer to the visible surface
    fn present(&mut self);
}

/// Draw a sprite centred on `pos`
pub fn draw_centered(surface: &mut impl Surface, sprite: Sprite, pos: Vec2, size: Vec2) {
    surface.save();
    surface.translate(pos.x, pos.y);
    surface.draw_image(sprite, -(size.x / 2.0), -(size.y / 2.0));
    surface.restore();
}
