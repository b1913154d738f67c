use dgsim_core::traits::Clock;
use web_sys::Performance;

/// `performance.now()`, falling back to `Date.now()` where no window exists.
pub(crate) struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub(crate) fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}
