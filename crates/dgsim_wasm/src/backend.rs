//! The external computation module, reached through its `compute_energy` export.

use anyhow::{anyhow, bail};
use dgsim_core::params::{Scheme, SystemKind};
use dgsim_core::traits::EnergyBackend;
use js_sys::{Array, Float64Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const ENTRY_POINT: &str = "compute_energy";

pub(crate) struct JsEnergyBackend {
    compute_energy: Function,
}

impl JsEnergyBackend {
    /// Picks the entry point off a loaded module namespace.
    pub(crate) fn from_module(module: &JsValue) -> Result<Self, String> {
        let export = Reflect::get(module, &JsValue::from_str(ENTRY_POINT))
            .map_err(|err| describe(&err))?;
        let compute_energy = export
            .dyn_into::<Function>()
            .map_err(|_| format!("module does not export a `{ENTRY_POINT}` function"))?;
        Ok(Self { compute_energy })
    }
}

impl EnergyBackend for JsEnergyBackend {
    fn compute_energy(
        &self,
        system: SystemKind,
        total_time: f64,
        step_size: f64,
        scheme: Scheme,
    ) -> anyhow::Result<Vec<f64>> {
        let args = Array::of4(
            &JsValue::from_str(system.label()),
            &JsValue::from_f64(total_time),
            &JsValue::from_f64(step_size),
            &JsValue::from_str(scheme.label()),
        );
        let out = self
            .compute_energy
            .apply(&JsValue::NULL, &args)
            .map_err(|err| anyhow!(describe(&err)))?;
        energies_from_js(&out).map_err(|err| err.context(format!("{scheme} on {system}")))
    }
}

/// Accepts a `Float64Array` (what wasm-bindgen returns for `Vec<f64>`) or a plain numeric array.
fn energies_from_js(value: &JsValue) -> anyhow::Result<Vec<f64>> {
    if let Some(typed) = value.dyn_ref::<Float64Array>() {
        return Ok(typed.to_vec());
    }
    if !Array::is_array(value) {
        bail!("expected an array of energies");
    }
    Array::from(value)
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .ok_or_else(|| anyhow!("energy value {i} is not a number"))
        })
        .collect()
}

/// Human-readable text for a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}
