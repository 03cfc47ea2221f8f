//! `Aggregator` — keeps one snapshot per completed step.
//!
//! Computing and recording are separate so a caller can take the snapshot
//! before a step, run the step, and record only if the step succeeded.

use epi_agent::Population;
use epi_grid::MultiGrid;

use crate::{MetricsResult, MetricsSnapshot, compute_snapshot};

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    prob_contagion: f64,
    history:        Vec<MetricsSnapshot>,
}

impl Aggregator {
    /// `prob_contagion` is the model-wide value used in the Rt estimate.
    pub fn new(prob_contagion: f64) -> Self {
        Self { prob_contagion, history: Vec::new() }
    }

    /// Snapshot of the current state, labelled `step`.  Not stored.
    pub fn compute(
        &self,
        step:       u64,
        population: &Population,
        grid:       &MultiGrid,
    ) -> MetricsResult<MetricsSnapshot> {
        compute_snapshot(step, population, grid, self.prob_contagion)
    }

    /// Append `snap` to the history and return it.
    pub fn record(&mut self, snap: MetricsSnapshot) -> &MetricsSnapshot {
        self.history.push(snap);
        &self.history[self.history.len() - 1]
    }

    /// Most recent snapshot, if any step has been collected.
    pub fn last(&self) -> Option<&MetricsSnapshot> {
        self.history.last()
    }

    /// Every snapshot, oldest first.
    pub fn history(&self) -> &[MetricsSnapshot] {
        &self.history
    }
}
