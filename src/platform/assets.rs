//! Optional cosmetic assets
//!
//! Nothing here can affect the simulation. Failures are logged and ignored.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

/// Try to load `url` and, if it exists, show it as the canvas CSS background.
pub fn probe_background(canvas: &HtmlCanvasElement, url: &str) {
    let Ok(img) = HtmlImageElement::new() else {
        log::warn!("Could not create image element, skipping background");
        return;
    };

    let onload = {
        let canvas = canvas.clone();
        let url = url.to_string();
        Closure::<dyn FnMut()>::new(move || {
            let style = canvas.style();
            let _ = style.set_property("background-image", &format!("url('{url}')"));
            let _ = style.set_property("background-size", "cover");
            let _ = style.set_property("background-position", "center");
            let _ = style.set_property("background-repeat", "no-repeat");
            log::info!("Background '{}' loaded", url);
        })
    };

    let onerror = {
        let url = url.to_string();
        Closure::<dyn FnMut()>::new(move || {
            log::warn!("Background '{}' not found", url);
        })
    };

    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    img.set_src(url);

    onload.forget();
    onerror.forget();
}
