//! Simulation parameters read from the page on every recomputation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimError;

/// Total simulated duration shared by the reference and the coarse runs.
pub const T_FINAL: f64 = 10.0;
/// Fine step used for the reference trajectory.
pub const REFERENCE_STEP: f64 = 0.001;
/// Slider position on page load.
pub const DEFAULT_DELTA_T: f64 = 0.25;

/// Physical system handed to the external module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemKind {
    #[default]
    Toda,
    Pendulum,
}

impl SystemKind {
    pub fn label(self) -> &'static str {
        match self {
            SystemKind::Toda => "toda",
            SystemKind::Pendulum => "pendulum",
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time discretization scheme, identified towards the external module by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "implicit midpoint")]
    ImplicitMidpoint,
    #[serde(rename = "discrete gradient")]
    DiscreteGradient,
}

impl Scheme {
    pub fn label(self) -> &'static str {
        match self {
            Scheme::ImplicitMidpoint => "implicit midpoint",
            Scheme::DiscreteGradient => "discrete gradient",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub system_kind: SystemKind,
    pub delta_t: f64,
    pub t_final: f64,
}

impl SimulationParameters {
    /// Validates `delta_t` and `t_final`; both must be finite and strictly positive.
    pub fn new(system_kind: SystemKind, delta_t: f64, t_final: f64) -> Result<Self, SimError> {
        check_grid(t_final, delta_t)?;
        Ok(Self {
            system_kind,
            delta_t,
            t_final,
        })
    }

    /// Parses the raw slider value.
    pub fn from_slider(
        system_kind: SystemKind,
        raw: &str,
        t_final: f64,
    ) -> Result<Self, SimError> {
        let delta_t = raw.trim().parse::<f64>().unwrap_or(f64::NAN);
        Self::new(system_kind, delta_t, t_final)
    }

    pub fn step_count(&self) -> usize {
        step_count(self.t_final, self.delta_t)
    }

    pub fn time_grid(&self) -> Vec<f64> {
        time_grid(self.t_final, self.delta_t)
    }
}

/// Rejects grids whose step or duration is not finite and strictly positive.
pub fn check_grid(t_final: f64, step: f64) -> Result<(), SimError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SimError::InvalidStep(step));
    }
    if !t_final.is_finite() || t_final <= 0.0 {
        return Err(SimError::InvalidDuration(t_final));
    }
    Ok(())
}

/// `floor(t_final / step)`, the number of points the external module returns.
pub fn step_count(t_final: f64, step: f64) -> usize {
    (t_final / step).floor() as usize
}

pub fn time_grid(t_final: f64, step: f64) -> Vec<f64> {
    (0..step_count(t_final, step))
        .map(|i| i as f64 * step)
        .collect()
}
