//! Per-page simulation state: the loaded backend, the cached reference trace and
//! the run generation counter.

use crate::config::DemoConfig;
use crate::error::SimError;
use crate::params::{check_grid, Scheme, SimulationParameters, SystemKind};
use crate::trace::{reference_style, scheme_style, Trace, REFERENCE_NAME};
use crate::traits::{Clock, EnergyBackend};

/// How the reference trajectory is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSpec {
    pub t_final: f64,
    pub step: f64,
    pub scheme: Scheme,
}

impl From<&DemoConfig> for ReferenceSpec {
    fn from(config: &DemoConfig) -> Self {
        Self {
            t_final: config.t_final,
            step: config.reference_step,
            scheme: config.reference_scheme,
        }
    }
}

pub struct Session<B> {
    /// `Some` once the external module finished loading; this is the readiness flag.
    backend: Option<B>,
    reference: Option<Trace>,
    reference_spec: ReferenceSpec,
    generation: u64,
}

impl<B: EnergyBackend> Session<B> {
    pub fn new(reference_spec: ReferenceSpec) -> Self {
        Self {
            backend: None,
            reference: None,
            reference_spec,
            generation: 0,
        }
    }

    /// Records the outcome of the asynchronous module load.
    ///
    /// On failure readiness stays false and the reason is returned as
    /// [`SimError::ModuleLoad`]. There is no retry within a session. Once a backend
    /// is installed further loads are refused with [`SimError::AlreadyLoaded`] and
    /// the installed backend is kept.
    pub fn complete_load(&mut self, loaded: Result<B, String>) -> Result<(), SimError> {
        if self.backend.is_some() {
            return Err(SimError::AlreadyLoaded);
        }
        match loaded {
            Ok(backend) => {
                self.backend = Some(backend);
                Ok(())
            }
            Err(reason) => Err(SimError::ModuleLoad(reason)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&B, SimError> {
        self.backend.as_ref().ok_or(SimError::NotInitialized)
    }

    /// Runs one scheme at the coarse step in `params`.
    pub fn compute(&self, params: &SimulationParameters, scheme: Scheme) -> Result<Trace, SimError> {
        let backend = self.backend()?;
        let energy = backend
            .compute_energy(params.system_kind, params.t_final, params.delta_t, scheme)
            .map_err(SimError::computation)?;
        Trace::on_grid(
            scheme.label(),
            params.t_final,
            params.delta_t,
            energy,
            scheme_style(scheme),
        )
    }

    /// Computes the reference trace unless it is cached or the module is not ready.
    ///
    /// Returns the elapsed milliseconds when a computation actually ran. A failed
    /// computation leaves the cache empty.
    pub fn ensure_reference(
        &mut self,
        system: SystemKind,
        clock: &impl Clock,
    ) -> Result<Option<f64>, SimError> {
        if self.reference.is_some() {
            return Ok(None);
        }
        let Some(backend) = self.backend.as_ref() else {
            return Ok(None);
        };
        let spec = self.reference_spec;
        check_grid(spec.t_final, spec.step)?;

        let start = clock.now_ms();
        let energy = backend
            .compute_energy(system, spec.t_final, spec.step, spec.scheme)
            .map_err(SimError::computation)?;
        let elapsed = clock.now_ms() - start;

        let trace = Trace::on_grid(
            REFERENCE_NAME,
            spec.t_final,
            spec.step,
            energy,
            reference_style(),
        )?;
        self.reference = Some(trace);
        Ok(Some(elapsed))
    }

    pub fn reference(&self) -> Option<&Trace> {
        self.reference.as_ref()
    }

    /// Starts a new run and returns its generation. Older generations become stale.
    pub fn begin_run(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// True when no run has begun since `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
