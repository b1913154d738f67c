use crate::params::{Scheme, SystemKind};

/// The external computation capability.
///
/// Implementations must be deterministic for fixed inputs and free of side effects.
/// The returned vector holds one energy value per discrete step.
pub trait EnergyBackend {
    fn compute_energy(
        &self,
        system: SystemKind,
        total_time: f64,
        step_size: f64,
        scheme: Scheme,
    ) -> anyhow::Result<Vec<f64>>;
}

impl<F> EnergyBackend for F
where
    F: Fn(SystemKind, f64, f64, Scheme) -> anyhow::Result<Vec<f64>>,
{
    fn compute_energy(
        &self,
        system: SystemKind,
        total_time: f64,
        step_size: f64,
        scheme: Scheme,
    ) -> anyhow::Result<Vec<f64>> {
        self(system, total_time, step_size, scheme)
    }
}

/// Monotonic millisecond clock used to time backend calls.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Something carrying a set of presentation classes (a DOM element on the page).
pub trait ClassTarget {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
}
