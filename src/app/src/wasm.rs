//! WebAssembly bindings for the Crux core
//!
//! Events, effects and the view model cross the boundary serialized by the
//! bridge. The JavaScript shell runs every effect, timers included, and
//! answers requests through [`handle_response`]. Timings are set with
//! `Event::Configure`.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::{wasm_bindgen, JsValue};

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

fn js_error(context: &str, error: impl std::fmt::Debug) -> JsValue {
    JsValue::from_str(&format!("{context}: {error:?}"))
}

/// Set up logging when the module is loaded
#[wasm_bindgen(start)]
pub fn init_wasm() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Debug)
        .map_err(|e| js_error("Failed to initialize logger", e))
}

/// Process a serialized `Event`, returning the serialized effects
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    let mut effects = Vec::new();
    CORE.update(event_bytes, &mut effects)
        .map_err(|e| js_error("Failed to process event", e))?;
    Ok(effects)
}

/// Current view model, serialized
#[wasm_bindgen]
pub fn view() -> Result<Vec<u8>, JsValue> {
    let mut view = Vec::new();
    CORE.view(&mut view)
        .map_err(|e| js_error("Failed to get view model", e))?;
    Ok(view)
}

/// Answer the effect `id`; returns the serialized effects that follow
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    let mut effects = Vec::new();
    CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    )
    .map_err(|e| js_error("Failed to handle response", e))?;
    Ok(effects)
}
