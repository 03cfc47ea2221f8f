//! `Population` — the owned agent registry.

use epi_core::{AgentId, Stage};

use crate::{Agent, AgentError, AgentResult};

/// Every agent of a model, indexed by `AgentId`.
///
/// Ids are dense and assigned in creation order, so `AgentId(i)` lives at
/// index `i` and iteration follows creation order.  Agents are never removed.
#[derive(Clone, Debug, Default)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { agents: Vec::with_capacity(capacity) }
    }

    /// Append an agent.  Its id must equal the current length.
    pub fn push(&mut self, agent: Agent) -> AgentResult<AgentId> {
        let expected = AgentId(self.agents.len() as u32);
        if agent.id != expected {
            return Err(AgentError::Config(format!(
                "agents must be added in id order: expected {expected}, got {}",
                agent.id
            )));
        }
        self.agents.push(agent);
        Ok(expected)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> AgentResult<&Agent> {
        self.agents.get(id.index()).ok_or(AgentError::UnknownAgent(id))
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> AgentResult<&mut Agent> {
        self.agents.get_mut(id.index()).ok_or(AgentError::UnknownAgent(id))
    }

    /// Same as [`get`](Self::get) but `None` instead of an error.
    #[inline]
    pub fn find(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    /// Ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|a| a.id)
    }

    /// Number of agents in each stage, indexed by [`Stage::ordinal`].
    pub fn stage_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for a in &self.agents {
            counts[a.stage.ordinal()] += 1;
        }
        counts
    }

    pub fn count_stage(&self, stage: Stage) -> usize {
        self.agents.iter().filter(|a| a.stage == stage).count()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
