//! Media-query driven theme synchronization for a set of page elements.

use std::rc::Rc;

use dgsim_core::config::ThemeConfig;
use dgsim_core::theme::{ColorScheme, ThemeSynchronizer};
use dgsim_core::traits::ClassTarget;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MediaQueryList, MediaQueryListEvent};

use crate::dom;

pub(crate) struct DomElement(Element);

impl ClassTarget for DomElement {
    fn add_class(&self, class: &str) {
        self.0.class_list().add_1(class).ok();
    }

    fn remove_class(&self, class: &str) {
        self.0.class_list().remove_1(class).ok();
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }
}

/// One synchronizer instance. Pages with two element sets create two of these.
#[wasm_bindgen]
pub struct WasmThemeSync {
    sync: Rc<ThemeSynchronizer<DomElement>>,
    query: MediaQueryList,
    listener: Closure<dyn FnMut(MediaQueryListEvent)>,
}

#[wasm_bindgen]
impl WasmThemeSync {
    /// Resolves the configured elements, subscribes to preference changes and
    /// applies the current preference immediately.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmThemeSync, JsValue> {
        console_error_panic_hook::set_once();

        let config: ThemeConfig = if config.is_undefined() || config.is_null() {
            ThemeConfig::default()
        } else {
            from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid theme config: {}", e)))?
        };

        let elements = config
            .element_ids
            .iter()
            .map(|id| dom::element(id).map(DomElement))
            .collect::<Result<Vec<_>, _>>()?;
        let sync = Rc::new(ThemeSynchronizer::new(elements, config.class_name));

        let query = dom::window()?
            .match_media(&config.query)?
            .ok_or_else(|| JsValue::from_str("matchMedia unavailable"))?;

        let on_change = Rc::clone(&sync);
        let listener = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
            on_change.apply(ColorScheme::from_dark_query(e.matches()));
        }) as Box<dyn FnMut(MediaQueryListEvent)>);
        query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())?;

        sync.apply(ColorScheme::from_dark_query(query.matches()));

        Ok(WasmThemeSync {
            sync,
            query,
            listener,
        })
    }

    pub fn is_dark(&self) -> bool {
        self.query.matches()
    }

    /// Re-applies the current preference.
    pub fn refresh(&self) {
        self.sync.apply(ColorScheme::from_dark_query(self.query.matches()));
    }

    /// True when every element matches the current preference.
    pub fn is_synced(&self) -> bool {
        self.sync
            .is_synced(ColorScheme::from_dark_query(self.query.matches()))
    }

    pub fn element_count(&self) -> usize {
        self.sync.elements().len()
    }
}

impl Drop for WasmThemeSync {
    fn drop(&mut self) {
        self.query
            .remove_event_listener_with_callback("change", self.listener.as_ref().unchecked_ref())
            .ok();
    }
}
