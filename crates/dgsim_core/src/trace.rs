//! Plot traces in the shape the plotting library consumes.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::params::{step_count, time_grid, Scheme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

/// A time/energy curve plus its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Time samples.
    pub x: Vec<f64>,
    /// Energy samples, one per time sample.
    pub y: Vec<f64>,
    pub mode: String,
    pub name: String,
    pub line: LineStyle,
}

impl Trace {
    /// Pairs a time grid with the energies returned by the external module.
    ///
    /// A length mismatch means the module returned malformed data.
    pub fn from_energies(
        name: &str,
        time: Vec<f64>,
        energy: Vec<f64>,
        line: LineStyle,
    ) -> Result<Self, SimError> {
        if time.len() != energy.len() {
            return Err(SimError::Computation(format!(
                "{name}: expected {} energy values, got {}",
                time.len(),
                energy.len()
            )));
        }
        Ok(Self {
            x: time,
            y: energy,
            mode: "lines".to_string(),
            name: name.to_string(),
            line,
        })
    }

    /// Like [`Trace::from_energies`] on the grid `i * step` for `i < floor(t_final / step)`.
    ///
    /// The energy count is checked before the grid is allocated.
    pub fn on_grid(
        name: &str,
        t_final: f64,
        step: f64,
        energy: Vec<f64>,
        line: LineStyle,
    ) -> Result<Self, SimError> {
        let expected = step_count(t_final, step);
        if energy.len() != expected {
            return Err(SimError::Computation(format!(
                "{name}: expected {expected} energy values, got {}",
                energy.len()
            )));
        }
        Self::from_energies(name, time_grid(t_final, step), energy, line)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

pub const REFERENCE_NAME: &str = "reference";

pub fn reference_style() -> LineStyle {
    LineStyle {
        color: "rgba(0, 0, 0, 0.2)".to_string(),
        width: 3.0,
        dash: Some("dot".to_string()),
    }
}

pub fn scheme_style(scheme: Scheme) -> LineStyle {
    let color = match scheme {
        Scheme::ImplicitMidpoint => "rgba(214, 39, 40, 0.6)",
        Scheme::DiscreteGradient => "rgba(31, 119, 180, 0.6)",
    };
    LineStyle {
        color: color.to_string(),
        width: 4.0,
        dash: None,
    }
}
