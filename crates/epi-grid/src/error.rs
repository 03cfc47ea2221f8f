//! Grid error type.

use thiserror::Error;

use epi_core::AgentId;

use crate::Position;

/// Errors produced by `epi-grid`.
///
/// All of these indicate a programming error in the caller: the grid's own
/// toroidal wrap in [`MultiGrid::neighbors`](crate::MultiGrid::neighbors) is
/// the only sanctioned way to step off an edge.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds { position: Position, width: u32, height: u32 },

    #[error("{0} has not been placed on the grid")]
    NotPlaced(AgentId),

    #[error("{0} is already placed on the grid")]
    AlreadyPlaced(AgentId),

    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
}

pub type GridResult<T> = Result<T, GridError>;
