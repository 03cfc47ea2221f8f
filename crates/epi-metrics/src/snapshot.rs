//! One step's worth of population statistics.

use epi_agent::Population;
use epi_core::{MobilityType, Stage};
use epi_grid::MultiGrid;

use crate::MetricsResult;

/// Population statistics at the start of step `step`.
///
/// Counts are raw; the `*_fraction` methods divide by `population` and
/// return 0 for an empty population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub step:       u64,
    pub population: usize,

    pub susceptible: usize,
    pub infected:    usize,
    pub severe:      usize,
    pub recovered:   usize,
    pub deceased:    usize,

    pub isolated:      usize,
    pub local_only:    usize,
    pub between_grids: usize,

    /// Mean effective cell-mates per agent.
    pub avg_contacts: f64,
    /// Effective reproduction number; NaN with nobody infected.
    pub rt: f64,
}

impl MetricsSnapshot {
    pub fn count(&self, stage: Stage) -> usize {
        match stage {
            Stage::Susceptible => self.susceptible,
            Stage::Infected    => self.infected,
            Stage::Severe      => self.severe,
            Stage::Recovered   => self.recovered,
            Stage::Deceased    => self.deceased,
        }
    }

    pub fn fraction(&self, stage: Stage) -> f64 {
        ratio(self.count(stage), self.population)
    }

    pub fn isolated_fraction(&self) -> f64 {
        ratio(self.isolated, self.population)
    }

    pub fn local_only_fraction(&self) -> f64 {
        ratio(self.local_only, self.population)
    }

    pub fn between_grids_fraction(&self) -> f64 {
        ratio(self.between_grids, self.population)
    }

    /// Sum of the five stage counts; equals `population` by construction.
    pub fn stage_total(&self) -> usize {
        Stage::ALL.iter().map(|&s| self.count(s)).sum()
    }
}

fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 { 0.0 } else { n as f64 / d as f64 }
}

/// `prob_contagion × avg_contacts × mean incubation of the infected`.
///
/// `infected_incubation` holds the incubation time of every currently
/// infected agent.  Empty input gives NaN.
pub fn effective_reproduction_number(
    prob_contagion:      f64,
    avg_contacts:        f64,
    infected_incubation: &[u32],
) -> f64 {
    if infected_incubation.is_empty() {
        return f64::NAN;
    }
    let total: f64 = infected_incubation.iter().map(|&t| t as f64).sum();
    prob_contagion * avg_contacts * (total / infected_incubation.len() as f64)
}

/// Scan `population` (and its cells on `grid`) once.
pub fn compute_snapshot(
    step:           u64,
    population:     &Population,
    grid:           &MultiGrid,
    prob_contagion: f64,
) -> MetricsResult<MetricsSnapshot> {
    let mut snap = MetricsSnapshot {
        step,
        population: population.len(),
        susceptible: 0,
        infected: 0,
        severe: 0,
        recovered: 0,
        deceased: 0,
        isolated: 0,
        local_only: 0,
        between_grids: 0,
        avg_contacts: 0.0,
        rt: f64::NAN,
    };

    let mut contacts = 0usize;
    let mut infected_incubation = Vec::new();
    for agent in population {
        match agent.stage {
            Stage::Susceptible => snap.susceptible += 1,
            Stage::Infected => {
                snap.infected += 1;
                infected_incubation.push(agent.incubation_time);
            }
            Stage::Severe    => snap.severe += 1,
            Stage::Recovered => snap.recovered += 1,
            Stage::Deceased  => snap.deceased += 1,
        }
        if agent.isolated {
            snap.isolated += 1;
        }
        match agent.mobility_type {
            MobilityType::LocalOnly    => snap.local_only += 1,
            MobilityType::BetweenGrids => snap.between_grids += 1,
            MobilityType::Isolated     => {}
        }
        if !agent.stage.is_terminal() {
            contacts += agent.interactants(grid.occupants(agent.pos)?, population);
        }
    }

    snap.avg_contacts = ratio(contacts, snap.population);
    snap.rt = effective_reproduction_number(prob_contagion, snap.avg_contacts, &infected_incubation);
    Ok(snap)
}
