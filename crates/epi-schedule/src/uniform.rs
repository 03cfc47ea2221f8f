//! `UniformActivation` — every agent, freshly shuffled, every step.

use rustc_hash::FxHashSet;

use epi_core::{AgentId, SimRng};

use crate::{Activation, ScheduleError, ScheduleResult};

/// Activates all registered agents once per step in a uniformly random
/// order, re-drawn each step.  Earmarks are accepted and ignored.
#[derive(Debug, Default, Clone)]
pub struct UniformActivation {
    /// Registration order; the shuffle starts from this every step.
    agents:     Vec<AgentId>,
    registered: FxHashSet<AgentId>,
    steps:      u64,
}

impl UniformActivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered ids in registration order.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }
}

impl Activation for UniformActivation {
    fn add(&mut self, agent: AgentId, _earmark: u32) -> ScheduleResult<()> {
        if !self.registered.insert(agent) {
            return Err(ScheduleError::DuplicateAgent(agent));
        }
        self.agents.push(agent);
        Ok(())
    }

    fn step<F, E>(&mut self, rng: &mut SimRng, mut update: F) -> Result<(), E>
    where
        F: FnMut(AgentId, &mut SimRng) -> Result<(), E>,
    {
        let mut order = self.agents.clone();
        rng.shuffle(&mut order);
        for id in order {
            update(id, rng)?;
        }
        self.steps += 1;
        Ok(())
    }

    fn agent_count(&self) -> usize {
        self.agents.len()
    }

    fn steps(&self) -> u64 {
        self.steps
    }
}
