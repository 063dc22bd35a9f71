//! Platform abstraction layer
//!
//! Handles the browser side of the game:
//! - Viewport sizing (canvas is 85% of the window)
//! - Sprite loading (web only)
//! - Setup failures, which are fatal before the frame loop starts

#[cfg(target_arch = "wasm32")]
pub mod assets;

use thiserror::Error;

use crate::consts::VIEWPORT_FRACTION;

/// Failures while wiring up the page
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("element is not a {0}")]
    WrongElementType(String),
    #[error("2d context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl SetupError {
    pub fn from_js(value: wasm_bindgen::JsValue) -> Self {
        SetupError::Js(format!("{:?}", value))
    }
}

/// Canvas size for a window of the given inner size
///
/// Canvas dimensions are integers, so the fraction truncates.
pub fn canvas_size(inner_width: f64, inner_height: f64) -> (u32, u32) {
    (
        (inner_width * VIEWPORT_FRACTION).max(0.0) as u32,
        (inner_height * VIEWPORT_FRACTION).max(0.0) as u32,
    )
}
