mod app;
mod backend;
mod clock;
mod dom;
mod plotly;
mod theme;

#[cfg(all(test, target_arch = "wasm32"))]
mod test_support;

pub use app::WasmSimulation;
pub use theme::WasmThemeSync;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(test)]
mod tests {
    use super::{WasmSimulation, WasmThemeSync};

    #[test]
    fn exports_are_wired() {
        assert!(std::any::type_name::<WasmSimulation>().ends_with("WasmSimulation"));
        assert!(std::any::type_name::<WasmThemeSync>().ends_with("WasmThemeSync"));
    }
}
