//! One slider-triggered recomputation: reference (cached), both schemes, trace assembly.

use serde::Serialize;

use crate::error::SimError;
use crate::params::{Scheme, SimulationParameters};
use crate::session::Session;
use crate::trace::Trace;
use crate::traits::{Clock, EnergyBackend};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timings {
    pub implicit_midpoint_ms: f64,
    pub discrete_gradient_ms: f64,
    pub total_ms: f64,
}

impl Timings {
    pub fn summary(&self) -> String {
        format!(
            "implicit midpoint: {:.1}ms, discrete gradient: {:.1}ms",
            self.implicit_midpoint_ms, self.discrete_gradient_ms
        )
    }
}

/// Everything needed to draw one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub generation: u64,
    pub step_count: usize,
    /// `[reference, discrete gradient, implicit midpoint]`; later traces draw on top.
    pub traces: Vec<Trace>,
    pub timings: Timings,
    /// Set on the run that filled the reference cache.
    pub reference_ms: Option<f64>,
}

/// Runs the pipeline for `params` on behalf of the run numbered `generation`.
///
/// Fails with [`SimError::NotInitialized`] before touching the backend when the
/// module has not loaded. Any failure leaves the cached reference as it was.
pub fn run<B, C>(
    session: &mut Session<B>,
    clock: &C,
    params: &SimulationParameters,
    generation: u64,
) -> Result<Frame, SimError>
where
    B: EnergyBackend,
    C: Clock,
{
    if !session.is_ready() {
        return Err(SimError::NotInitialized);
    }
    let reference_ms = session.ensure_reference(params.system_kind, clock)?;
    let reference = session
        .reference()
        .cloned()
        .ok_or(SimError::NotInitialized)?;

    let start = clock.now_ms();
    let implicit_midpoint = session.compute(params, Scheme::ImplicitMidpoint)?;
    let split = clock.now_ms();
    let discrete_gradient = session.compute(params, Scheme::DiscreteGradient)?;
    let end = clock.now_ms();

    Ok(Frame {
        generation,
        step_count: params.step_count(),
        traces: vec![reference, discrete_gradient, implicit_midpoint],
        timings: Timings {
            implicit_midpoint_ms: split - start,
            discrete_gradient_ms: end - split,
            total_ms: end - start,
        },
        reference_ms,
    })
}
