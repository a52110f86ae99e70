#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated canvas backdrop: one simulation engine with star-field, blob and
//! particle-mesh variants, plus the browser glue that drives it.

pub mod config;
pub mod engine;

pub use config::{ConfigError, SimConfig, Variant};
pub use engine::Engine;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    mod backdrop;
    mod render;

    pub use backdrop::Backdrop;
    pub use render::Canvas2dSurface;

    /// Canvas ids tried in order when the page starts us automatically.
    const CANVAS_IDS: [&str; 2] = ["heroCanvas", "c"];

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(canvas) = CANVAS_IDS.iter().find_map(|id| document.get_element_by_id(id)) else {
            log::info!("no backdrop canvas on this page");
            return Ok(());
        };
        let canvas = canvas.dyn_into::<web_sys::HtmlCanvasElement>()?;
        let config = canvas.get_attribute("data-backdrop").unwrap_or_default();

        Backdrop::start(canvas, &config)?;
        Ok(())
    }

    /// Start a backdrop on the canvas with id `canvas_id`, for pages that
    /// opt out of the automatic start.
    #[wasm_bindgen]
    pub fn start_backdrop(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        Backdrop::start(canvas, config_json)?;
        Ok(())
    }
}
