//! Simulation observer trait for progress reporting and data collection.

use epi_agent::Population;
use epi_metrics::MetricsSnapshot;

/// Callbacks invoked by [`Model::run_steps`][crate::Model::run_steps].
///
/// All methods default to no-ops so implementors override only what they
/// need.
///
/// # Example: stage counter
///
/// ```rust,ignore
/// struct InfectedCurve(Vec<usize>);
///
/// impl SimObserver for InfectedCurve {
///     fn on_metrics(&mut self, m: &MetricsSnapshot) {
///         self.0.push(m.infected);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before step `step` runs.
    fn on_step_start(&mut self, _step: u64) {}

    /// The snapshot collected at the start of the step that just ran.
    fn on_metrics(&mut self, _metrics: &MetricsSnapshot) {}

    /// After every agent of step `step` has updated.
    fn on_step_end(&mut self, _step: u64, _population: &Population) {}

    /// Once, after the last step; `steps` is the model's step count.
    fn on_sim_end(&mut self, _steps: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
