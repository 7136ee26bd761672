use compat_engine::{CompatDataset, CompatEngine};
use wasm_bindgen::prelude::*;

pub mod compat_panel;

pub use compat_panel::CompatPanel;

/// One-shot check: returns the issue list of a layout as JSON
#[wasm_bindgen]
pub fn check_compatibility_wasm(dataset_json: &str, layout_json: &str) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let dataset = CompatDataset::from_json_str(dataset_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to load dataset: {}", e)))?;
    let issues = CompatEngine::new(dataset)
        .check_layout_json(layout_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&issues)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
