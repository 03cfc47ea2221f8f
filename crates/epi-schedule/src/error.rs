use thiserror::Error;

use epi_core::AgentId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{0} is already registered with the scheduler")]
    DuplicateAgent(AgentId),

    #[error("{agent} has earmark {earmark}, outside 0..{partitions}")]
    EarmarkOutOfRange { agent: AgentId, earmark: u32, partitions: u32 },

    #[error("a partitioned scheduler needs at least one partition")]
    ZeroPartitions,

    #[error("unknown scheduler kind {0:?} (expected \"uniform\" or \"partitioned\")")]
    UnknownKind(String),

    #[error("unknown earmark policy {0:?} (expected \"modulo\" or \"row_band\")")]
    UnknownEarmarkPolicy(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
