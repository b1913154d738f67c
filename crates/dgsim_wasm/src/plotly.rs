//! Binding to the page-global `Plotly` object.

use dgsim_core::plot::{PlotConfig, PlotLayout};
use dgsim_core::trace::Trace;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(
        target: &str,
        data: &JsValue,
        layout: &JsValue,
        config: &JsValue,
    ) -> Result<JsValue, JsValue>;
}

fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| JsValue::from_str(&format!("Failed to serialize {what}: {err}")))
}

/// Replaces whatever is drawn in `target`. The returned promise is not awaited.
pub(crate) fn draw(
    target: &str,
    traces: &[Trace],
    layout: &PlotLayout,
    config: &PlotConfig,
) -> Result<(), JsValue> {
    let data = to_js(traces, "traces")?;
    let layout = to_js(layout, "layout")?;
    let config = to_js(config, "plot config")?;
    new_plot(target, &data, &layout, &config)?;
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use dgsim_core::params::Scheme;
    use dgsim_core::trace::scheme_style;
    use js_sys::Reflect;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn traces_serialize_to_plain_objects() {
        let trace = Trace::from_energies(
            "implicit midpoint",
            vec![0.0, 0.5],
            vec![3.0, 2.5],
            scheme_style(Scheme::ImplicitMidpoint),
        )
        .expect("trace");
        let value = to_js(&[trace][..], "traces").expect("serialize");
        let first = js_sys::Array::from(&value).get(0);
        let name = Reflect::get(&first, &JsValue::from_str("name")).expect("name");
        assert_eq!(name.as_string().as_deref(), Some("implicit midpoint"));
        let line = Reflect::get(&first, &JsValue::from_str("line")).expect("line");
        let dash = Reflect::get(&line, &JsValue::from_str("dash")).expect("dash");
        assert!(dash.is_undefined());
    }

    #[wasm_bindgen_test]
    fn config_uses_camel_case() {
        let value = to_js(&PlotConfig::default(), "plot config").expect("serialize");
        let flag = Reflect::get(&value, &JsValue::from_str("displayModeBar")).expect("flag");
        assert_eq!(flag.as_bool(), Some(false));
    }
}
