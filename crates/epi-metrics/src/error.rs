use thiserror::Error;

use epi_agent::AgentError;
use epi_grid::GridError;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics scan hit a grid error: {0}")]
    Grid(#[from] GridError),

    #[error("metrics scan hit an agent error: {0}")]
    Agent(#[from] AgentError),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
