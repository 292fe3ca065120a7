//! Browser bindings. Every call rebuilds the [`ScaleData`] for its arguments.
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::ScaleData;
use crate::catalog::Catalog;
use crate::error::FretboardError;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second module instance finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("fretboard module initialized");
}

fn js_error(e: FretboardError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn build(root: &str, scale: &str) -> Result<ScaleData, JsValue> {
    ScaleData::generate(root, scale, Catalog::standard()).map_err(js_error)
}

#[wasm_bindgen]
pub fn scale_data(root: String, scale: String) -> Result<JsValue, JsValue> {
    Ok(to_value(&build(&root, &scale)?)?)
}

#[wasm_bindgen]
pub fn scale_names() -> Result<JsValue, JsValue> {
    Ok(to_value(&Catalog::standard().scale_names())?)
}

#[wasm_bindgen]
pub fn anchor_contexts(root: String, scale: String, string: u8, fret: u8) -> Result<JsValue, JsValue> {
    Ok(to_value(&build(&root, &scale)?.anchor_contexts_at(string, fret))?)
}

#[wasm_bindgen]
pub fn tension_notes(root: String, scale: String, degree: String) -> Result<JsValue, JsValue> {
    Ok(to_value(&build(&root, &scale)?.tension_notes_for(&degree))?)
}

#[wasm_bindgen]
pub fn diagonal_tab(root: String, scale: String) -> Result<String, JsValue> {
    Ok(build(&root, &scale)?.tab().to_string())
}
