pub mod config;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod plot;
pub mod session;
pub mod status;
pub mod theme;
pub mod trace;
/// The `dgsim_core` crate holds the orchestration logic of the energy demo page.
/// The numerical integrators live in an external module; this crate only sequences
/// calls into it, caches the reference trajectory and assembles plot traces.
///
/// Key components:
/// - **Traits**: `EnergyBackend` (external computation), `Clock` (elapsed timing),
///   `ClassTarget` (elements whose presentation class is toggled).
/// - **Session**: readiness gate, reference cache and run generation counter.
/// - **Pipeline**: one slider-triggered recomputation producing a `Frame`.
/// - **Theme**: projection of the OS color-scheme preference onto a class.
pub mod traits;

pub use error::SimError;
