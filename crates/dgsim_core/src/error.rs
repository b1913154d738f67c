use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("error loading module: {0}")]
    ModuleLoad(String),
    #[error("simulation module already loaded")]
    AlreadyLoaded,
    #[error("simulation module not initialized")]
    NotInitialized,
    #[error("computation failed: {0}")]
    Computation(String),
    #[error("invalid time step {0}: must be finite and positive")]
    InvalidStep(f64),
    #[error("invalid duration {0}: must be finite and positive")]
    InvalidDuration(f64),
}

impl SimError {
    pub(crate) fn computation(err: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain on one line.
        SimError::Computation(format!("{err:#}"))
    }
}
