//! Sprite loading via `HtmlImageElement`
//!
//! Images load asynchronously. The caller gets a handle table immediately and
//! a callback with each sprite's natural size once it decodes.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use super::SetupError;
use crate::renderer::Sprite;

/// One image element per [`Sprite`]
pub struct SpriteImages {
    images: Vec<HtmlImageElement>,
}

impl SpriteImages {
    pub fn get(&self, sprite: Sprite) -> &HtmlImageElement {
        &self.images[sprite.index()]
    }
}

/// Start loading every sprite; `on_load` fires with (sprite, width, height)
pub fn load_sprites(on_load: Rc<dyn Fn(Sprite, f32, f32)>) -> Result<SpriteImages, SetupError> {
    let mut images = Vec::with_capacity(Sprite::ALL.len());

    for sprite in Sprite::ALL {
        let image = HtmlImageElement::new().map_err(SetupError::from_js)?;

        let on_load = on_load.clone();
        let handle = image.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = (handle.natural_width() as f32, handle.natural_height() as f32);
            log::info!("Loaded {} ({}x{})", sprite.path(), w, h);
            on_load(sprite, w, h);
        });
        image
            .add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())
            .map_err(SetupError::from_js)?;
        closure.forget();

        image.set_src(sprite.path());
        images.push(image);
    }

    Ok(SpriteImages { images })
}
