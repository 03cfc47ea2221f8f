use thiserror::Error;

use epi_core::AgentId;
use epi_grid::{GridError, Position};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0} is not in the population")]
    UnknownAgent(AgentId),

    #[error("{agent} records position {recorded} but the grid has it at {indexed:?}")]
    PositionMismatch {
        agent:    AgentId,
        recorded: Position,
        indexed:  Option<Position>,
    },

    #[error("population configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type AgentResult<T> = Result<T, AgentError>;
