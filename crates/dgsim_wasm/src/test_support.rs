//! Page fixtures for browser tests.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

use crate::dom;

const PLOT_LOG: &str = "__dgsimPlots";

/// Appends a fresh element with `id` to the body.
pub(crate) fn mount(tag: &str, id: &str) -> Element {
    let document = dom::document().expect("document");
    let element = document.create_element(tag).expect("create element");
    element.set_id(id);
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

/// A module namespace whose `compute_energy(kind, t, h, scheme)` runs `body`.
pub(crate) fn module_with(body: &str) -> JsValue {
    let module = Object::new();
    let entry = Function::new_with_args("kind, t, h, scheme", body);
    Reflect::set(&module, &JsValue::from_str("compute_energy"), &entry).expect("set export");
    module.into()
}

/// A module returning a flat curve of the right length.
pub(crate) fn flat_module() -> JsValue {
    module_with("return new Float64Array(Math.floor(t / h)).fill(1);")
}

/// Installs a global `Plotly` whose `newPlot` records the target id.
pub(crate) fn install_plotly() {
    let plotly = Object::new();
    let new_plot = Function::new_with_args(
        "id, data, layout, config",
        &format!("(globalThis.{PLOT_LOG} = globalThis.{PLOT_LOG} || []).push(id);"),
    );
    Reflect::set(&plotly, &JsValue::from_str("newPlot"), &new_plot).expect("set newPlot");
    Reflect::set(&js_sys::global(), &JsValue::from_str("Plotly"), &plotly).expect("set Plotly");
}

/// How many times `newPlot` drew into `target`.
pub(crate) fn plot_count(target: &str) -> usize {
    let log = Reflect::get(&js_sys::global(), &JsValue::from_str(PLOT_LOG)).expect("plot log");
    if log.is_undefined() {
        return 0;
    }
    Array::from(&log)
        .iter()
        .filter(|id| id.as_string().as_deref() == Some(target))
        .count()
}

/// Resolves after `ms` milliseconds, letting queued timeouts run.
pub(crate) async fn settle(ms: i32) {
    let timer = Promise::new(&mut |resolve, _| {
        dom::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("timeout");
    });
    JsFuture::from(timer).await.expect("timer");
}
