//! Text and presentation state of the status region.

use serde::Serialize;

use crate::error::SimError;
use crate::pipeline::Timings;

/// The three mutually exclusive presentation states of the status region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ready,
    Loading,
    Error,
}

impl Status {
    /// CSS class applied to the status element.
    pub fn class_name(self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Loading => "loading",
            Status::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    pub status: Status,
    pub text: String,
}

impl StatusMessage {
    fn new(status: Status, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn loading_module() -> Self {
        Self::new(Status::Loading, "loading simulation module...")
    }

    pub fn loaded() -> Self {
        Self::new(Status::Ready, "ready! adjust time step as wanted")
    }

    pub fn computing() -> Self {
        Self::new(Status::Loading, "computing...")
    }

    pub fn finished(timings: &Timings) -> Self {
        Self::new(Status::Ready, timings.summary())
    }

    /// Load failures keep their own wording; everything else is prefixed with `Error:`.
    pub fn failed(err: &SimError) -> Self {
        match err {
            SimError::ModuleLoad(_) => Self::new(Status::Error, err.to_string()),
            _ => Self::new(Status::Error, format!("Error: {err}")),
        }
    }
}
