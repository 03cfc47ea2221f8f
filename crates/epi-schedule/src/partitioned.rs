//! `PartitionedActivation` — ordered cohorts, random order inside each.
//!
//! Every agent carries an earmark `e` in `0..P`.  A step visits partition 0
//! first, then 1, and so on up to `P - 1`; within a partition the order is a
//! fresh shuffle.  So every agent of partition `k` has finished its update
//! before the first agent of `k + 1` starts, while agents of the same
//! partition still interleave at random.

use rustc_hash::FxHashSet;

use epi_core::{AgentId, SimRng};

use crate::{Activation, ScheduleError, ScheduleResult};

#[derive(Debug, Clone)]
pub struct PartitionedActivation {
    partitions: u32,
    /// `(id, earmark)` in registration order.
    agents:     Vec<(AgentId, u32)>,
    registered: FxHashSet<AgentId>,
    steps:      u64,
}

impl PartitionedActivation {
    /// A scheduler with `partitions` cohorts.  Zero is rejected.
    pub fn new(partitions: u32) -> ScheduleResult<Self> {
        if partitions == 0 {
            return Err(ScheduleError::ZeroPartitions);
        }
        Ok(Self {
            partitions,
            agents: Vec::new(),
            registered: FxHashSet::default(),
            steps: 0,
        })
    }

    #[inline]
    pub fn partitions(&self) -> u32 {
        self.partitions
    }

    /// Registered ids grouped by earmark, each group in registration order.
    pub fn buckets(&self) -> Vec<Vec<AgentId>> {
        let mut buckets = vec![Vec::new(); self.partitions as usize];
        for &(id, earmark) in &self.agents {
            buckets[earmark as usize].push(id);
        }
        buckets
    }
}

impl Activation for PartitionedActivation {
    fn add(&mut self, agent: AgentId, earmark: u32) -> ScheduleResult<()> {
        if earmark >= self.partitions {
            return Err(ScheduleError::EarmarkOutOfRange {
                agent,
                earmark,
                partitions: self.partitions,
            });
        }
        if !self.registered.insert(agent) {
            return Err(ScheduleError::DuplicateAgent(agent));
        }
        self.agents.push((agent, earmark));
        Ok(())
    }

    fn step<F, E>(&mut self, rng: &mut SimRng, mut update: F) -> Result<(), E>
    where
        F: FnMut(AgentId, &mut SimRng) -> Result<(), E>,
    {
        // Rebuilt every step: membership is read fresh each time.
        for mut bucket in self.buckets() {
            rng.shuffle(&mut bucket);
            for id in bucket {
                update(id, rng)?;
            }
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
