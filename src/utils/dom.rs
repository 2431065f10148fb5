//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs and to untyped objects
//! injected into `window` by extensions.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get an object-valued property of `window`, e.g. `window.ethereum`.
pub fn global_object(name: &str) -> Option<Object> {
    let window: JsValue = window()?.into();
    property_object(&window, name)
}

/// Get an object-valued property of `target`.
///
/// Returns `None` when the property is missing or not an object.
pub fn property_object(target: &JsValue, name: &str) -> Option<Object> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|value| value.is_object())
        .map(|value| value.unchecked_into::<Object>())
}

/// Get a callable property of `target`.
pub fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|value| value.is_function())
        .map(|value| value.unchecked_into::<Function>())
}

/// Get an element by id as an `HtmlElement`.
pub fn element_by_id(id: &str) -> Option<HtmlElement> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Best-effort human readable description of a thrown JS value.
pub fn describe_js_value(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(message) = Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
    {
        return message;
    }
    format!("{:?}", value)
}
