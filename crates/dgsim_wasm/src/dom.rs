use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{id}")))
}

pub fn input(id: &str) -> Result<HtmlInputElement, JsValue> {
    element(id)?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{id} not an input element")))
}

pub fn set_text(id: &str, text: &str) {
    if let Ok(el) = element(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_class(id: &str, class: &str) {
    if let Ok(el) = element(id) {
        el.set_class_name(class);
    }
}

/// Computed value of a CSS custom property on the root element, trimmed.
pub fn root_property(name: &str) -> Result<String, JsValue> {
    let root = document()?
        .document_element()
        .ok_or_else(|| JsValue::from_str("no root element"))?;
    let style = window()?
        .get_computed_style(&root)?
        .ok_or_else(|| JsValue::from_str("no computed style"))?;
    Ok(style.get_property_value(name)?.trim().to_string())
}

pub fn set_timeout(callback: &Closure<dyn FnMut()>, delay_ms: i32) -> Result<i32, JsValue> {
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        delay_ms,
    )
}
