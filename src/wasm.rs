use crate::registry;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn palette_json() -> String {
    let definitions = registry::definitions()
        .iter()
        .map(|definition| {
            json!({
                "kind": definition.kind.as_str(),
                "category": definition.category.as_str(),
                "classification": definition.classification.as_str(),
                "label": definition.display_label,
                "defaults": Value::Object(definition.default_parameters.clone()),
                "supportsChildren": definition.supports_children,
            })
        })
        .collect::<Vec<_>>();
    Value::Array(definitions).to_string()
}

#[wasm_bindgen]
pub fn generate_code_for(program_json: &str) -> Result<String, JsValue> {
    crate::generate_code_from_json(program_json).map_err(|e| JsValue::from_str(&e.to_string()))
}
