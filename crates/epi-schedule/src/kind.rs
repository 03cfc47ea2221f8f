//! String tokens for choosing a scheduler and an earmark policy.

use std::fmt;
use std::str::FromStr;

use epi_core::{AgentId, SchedulerParams};
use epi_grid::Position;

use crate::{ScheduleError, ScheduleResult};

// ── SchedulerKind ─────────────────────────────────────────────────────────────

/// Which activation strategy to build.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SchedulerKind {
    Uniform,
    Partitioned { partitions: u32 },
}

impl SchedulerKind {
    /// Parse a token.
    ///
    /// `"uniform"` (alias `"random"`) ignores `partitions`.  `"partitioned"`
    /// (alias `"graham"`) needs `partitions >= 1`; a missing count means 1.
    /// Tokens are case-insensitive.
    pub fn parse(token: &str, partitions: Option<u32>) -> ScheduleResult<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" => Ok(SchedulerKind::Uniform),
            "partitioned" | "graham" => {
                let partitions = partitions.unwrap_or(1);
                if partitions == 0 {
                    return Err(ScheduleError::ZeroPartitions);
                }
                Ok(SchedulerKind::Partitioned { partitions })
            }
            _ => Err(ScheduleError::UnknownKind(token.to_string())),
        }
    }

    pub fn from_params(params: &SchedulerParams) -> ScheduleResult<Self> {
        Self::parse(&params.kind, params.partitions)
    }

    /// Number of earmark values this kind accepts.
    pub fn partitions(self) -> u32 {
        match self {
            SchedulerKind::Uniform => 1,
            SchedulerKind::Partitioned { partitions } => partitions,
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerKind::Uniform => f.write_str("uniform"),
            SchedulerKind::Partitioned { partitions } => write!(f, "partitioned({partitions})"),
        }
    }
}

// ── EarmarkPolicy ─────────────────────────────────────────────────────────────

/// How an agent's partition is derived when the population is built.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum EarmarkPolicy {
    /// `id % partitions`: cohorts interleave across the whole grid.
    #[default]
    Modulo,
    /// `row * partitions / height` from the initial cell: horizontal bands
    /// of neighbouring agents act together.
    RowBand,
}

impl EarmarkPolicy {
    /// Earmark for `agent` first placed at `pos` on a grid `height` rows tall.
    ///
    /// Always in `0..partitions` for `pos.y < height`.
    pub fn earmark(self, agent: AgentId, pos: Position, height: u32, partitions: u32) -> u32 {
        let partitions = partitions.max(1);
        match self {
            EarmarkPolicy::Modulo => agent.0 % partitions,
            EarmarkPolicy::RowBand => {
                let band = pos.y as u64 * partitions as u64 / height.max(1) as u64;
                (band as u32).min(partitions - 1)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EarmarkPolicy::Modulo  => "modulo",
            EarmarkPolicy::RowBand => "row_band",
        }
    }
}

impl FromStr for EarmarkPolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modulo" | "id" => Ok(EarmarkPolicy::Modulo),
            "row_band" | "rows" => Ok(EarmarkPolicy::RowBand),
            _ => Err(ScheduleError::UnknownEarmarkPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for EarmarkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
