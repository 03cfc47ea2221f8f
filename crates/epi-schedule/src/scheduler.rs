//! `Scheduler` — the strategy a model actually holds.

use epi_core::{AgentId, SimRng};

use crate::{Activation, PartitionedActivation, ScheduleResult, SchedulerKind, UniformActivation};

/// Closed set of activation strategies, dispatched by `match`.
#[derive(Debug, Clone)]
pub enum Scheduler {
    Uniform(UniformActivation),
    Partitioned(PartitionedActivation),
}

impl Scheduler {
    pub fn new(kind: SchedulerKind) -> ScheduleResult<Self> {
        Ok(match kind {
            SchedulerKind::Uniform => Scheduler::Uniform(UniformActivation::new()),
            SchedulerKind::Partitioned { partitions } => {
                Scheduler::Partitioned(PartitionedActivation::new(partitions)?)
            }
        })
    }

    pub fn kind(&self) -> SchedulerKind {
        match self {
            Scheduler::Uniform(_) => SchedulerKind::Uniform,
            Scheduler::Partitioned(p) => SchedulerKind::Partitioned { partitions: p.partitions() },
        }
    }
}

impl Activation for Scheduler {
    fn add(&mut self, agent: AgentId, earmark: u32) -> ScheduleResult<()> {
        match self {
            Scheduler::Uniform(s) => s.add(agent, earmark),
            Scheduler::Partitioned(s) => s.add(agent, earmark),
        }
    }

    fn step<F, E>(&mut self, rng: &mut SimRng, update: F) -> Result<(), E>
    where
        F: FnMut(AgentId, &mut SimRng) -> Result<(), E>,
    {
        match self {
            Scheduler::Uniform(s) => s.step(rng, update),
            Scheduler::Partitioned(s) => s.step(rng, update),
        }
    }

    fn agent_count(&self) -> usize {
        match self {
            Scheduler::Uniform(s) => s.agent_count(),
            Scheduler::Partitioned(s) => s.agent_count(),
        }
    }

    fn steps(&self) -> u64 {
        match self {
            Scheduler::Uniform(s) => s.steps(),
            Scheduler::Partitioned(s) => s.steps(),
        }
    }
}
