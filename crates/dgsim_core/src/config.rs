//! Page-level configuration. Every field has a default matching the shipped page,
//! so hosts only pass what they override.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::params::{check_grid, Scheme, SystemKind, DEFAULT_DELTA_T, REFERENCE_STEP, T_FINAL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub system_kind: SystemKind,
    pub t_final: f64,
    pub reference_step: f64,
    pub reference_scheme: Scheme,
    pub default_delta_t: f64,
    /// Pause before recomputing so the busy status can paint.
    pub settle_delay_ms: i32,
    pub status_id: String,
    pub slider_id: String,
    pub readout_id: String,
    pub plot_id: String,
    pub text_color_property: String,
}

impl DemoConfig {
    /// Checks the reference grid and the default slider step against `t_final`.
    pub fn validate(&self) -> Result<(), SimError> {
        check_grid(self.t_final, self.reference_step)?;
        check_grid(self.t_final, self.default_delta_t)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            system_kind: SystemKind::Toda,
            t_final: T_FINAL,
            reference_step: REFERENCE_STEP,
            reference_scheme: Scheme::ImplicitMidpoint,
            default_delta_t: DEFAULT_DELTA_T,
            settle_delay_ms: 10,
            status_id: "status".to_string(),
            slider_id: "delta-t-slider".to_string(),
            readout_id: "delta-t-value".to_string(),
            plot_id: "plot".to_string(),
            text_color_property: "--clr-text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub class_name: String,
    pub query: String,
    pub element_ids: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            class_name: "darkmode".to_string(),
            query: "(prefers-color-scheme: dark)".to_string(),
            element_ids: vec![
                "feedback".to_string(),
                "turnpike".to_string(),
                "example".to_string(),
            ],
        }
    }
}
