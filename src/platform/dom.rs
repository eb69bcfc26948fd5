//! Small DOM helpers shared by the adapters

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::error::{GameError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| GameError::SurfaceUnavailable("no window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| GameError::SurfaceUnavailable("no document".into()))
}

/// Convert a JavaScript value into a readable string for error reporting
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Round-trip a JS value through JSON into a `serde_json::Value`
pub fn to_json_value(value: &JsValue) -> Option<serde_json::Value> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let text = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&text).ok()
}
