use thiserror::Error;

use epi_agent::AgentError;
use epi_core::EpiError;
use epi_grid::GridError;
use epi_metrics::MetricsError;
use epi_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] EpiError),

    #[error("scheduler error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("population setup failed: {0}")]
    Population(#[from] AgentError),

    /// An agent update found the model inconsistent; the run cannot go on.
    #[error("invariant violated at step {step}: {source}")]
    Invariant {
        step:   u64,
        #[source]
        source: AgentError,
    },

    #[error("metrics collection failed: {0}")]
    Metrics(#[from] MetricsError),
}

pub type SimResult<T> = Result<T, SimError>;
