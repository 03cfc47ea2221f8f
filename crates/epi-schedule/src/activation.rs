//! The `Activation` trait — what every scheduling strategy provides.

use epi_core::{AgentId, SimRng};

use crate::ScheduleResult;

/// An activation order over a fixed set of registered agents.
///
/// Strategies are interchangeable behind this trait; the model holds them
/// through the closed [`Scheduler`](crate::Scheduler) enum.
pub trait Activation {
    /// Register `agent` once.  A second registration of the same id fails
    /// with [`ScheduleError::DuplicateAgent`](crate::ScheduleError::DuplicateAgent)
    /// and leaves the scheduler unchanged.
    fn add(&mut self, agent: AgentId, earmark: u32) -> ScheduleResult<()>;

    /// Run `update` once for every registered agent, in this strategy's
    /// order, then advance the step counter.
    fn step<F, E>(&mut self, rng: &mut SimRng, update: F) -> Result<(), E>
    where
        F: FnMut(AgentId, &mut SimRng) -> Result<(), E>;

    fn agent_count(&self) -> usize;

    /// Completed steps.
    fn steps(&self) -> u64;
}
