//! Fluent construction of a fully initialised `Population`.
//!
//! # Usage
//!
//! ```rust
//! use epi_agent::PopulationBuilder;
//! use epi_core::{ModelConfig, SimRng};
//! use epi_grid::MultiGrid;
//!
//! let config = ModelConfig::default();
//! let mut grid = MultiGrid::new(config.gridworld.width, config.gridworld.height).unwrap();
//! let mut rng = SimRng::new(42);
//!
//! let population = PopulationBuilder::new(&config)
//!     .earmarks(|id, _pos| id.0 % 4)
//!     .build(&mut grid, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(population.len(), 240);
//! assert_eq!(grid.len(), 240);
//! ```
//!
//! # Draw order
//!
//! For each agent in id order: incubation, dwell, recovery (Poisson), the
//! isolation trial, then column and row of the initial cell.  After every
//! agent is placed, the initially infected set is drawn without replacement.
//! Keeping this order fixed is what makes a seed reproduce a population.

use log::debug;

use epi_core::{AgentId, MobilityType, ModelConfig, SimRng, Stage};
use epi_grid::{MultiGrid, Position};

use crate::{Agent, AgentError, AgentResult, Population};

type EarmarkFn<'a> = Box<dyn Fn(AgentId, Position) -> u32 + 'a>;

/// Builds a [`Population`] from a [`ModelConfig`], placing every agent on
/// the grid as it goes.
pub struct PopulationBuilder<'a> {
    config:  &'a ModelConfig,
    earmark: Option<EarmarkFn<'a>>,
}

impl<'a> PopulationBuilder<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config, earmark: None }
    }

    /// Assign each agent's earmark from its id and initial cell.
    ///
    /// Without this every earmark is 0.
    pub fn earmarks<F>(mut self, f: F) -> Self
    where
        F: Fn(AgentId, Position) -> u32 + 'a,
    {
        self.earmark = Some(Box::new(f));
        self
    }

    /// Sample, place, and seed the initial infections.
    ///
    /// `grid` must be empty and sized to the configuration.
    pub fn build(self, grid: &mut MultiGrid, rng: &mut SimRng) -> AgentResult<Population> {
        let cfg = self.config;
        if grid.width() != cfg.gridworld.width || grid.height() != cfg.gridworld.height {
            return Err(AgentError::Config(format!(
                "grid is {}x{} but the configuration asks for {}x{}",
                grid.width(),
                grid.height(),
                cfg.gridworld.width,
                cfg.gridworld.height
            )));
        }

        let n = cfg.gridworld.num_agents as usize;
        let epi = &cfg.epidemiology;
        let incubation_mean = cfg.incubation_mean_steps();
        let recovery_mean = cfg.recovery_mean_steps();
        let spd = epi.steps_per_day as f64;

        let mut population = Population::with_capacity(n);
        for i in 0..n {
            let id = AgentId(i as u32);

            let incubation_time = rng.poisson(incubation_mean);
            let dwelling_time = rng.poisson(epi.avg_dwell);
            let recovery_time = rng.poisson(recovery_mean);
            let isolated = rng.gen_bool(epi.prop_isolated);
            let pos = grid.random_position(rng);

            // Guard against a zero recovery draw.
            let per_step = spd * recovery_time.max(1) as f64;

            let mut agent = Agent::new(id, pos);
            agent.incubation_time = incubation_time;
            agent.dwelling_time = dwelling_time;
            agent.recovery_time = recovery_time;
            agent.isolated = isolated;
            agent.mobility_type =
                if isolated { MobilityType::Isolated } else { MobilityType::LocalOnly };
            agent.prob_contagion = epi.prob_contagion;
            agent.mortality_value = (epi.mortality_rate / per_step).clamp(0.0, 1.0);
            agent.severity_value = (epi.severity_rate / per_step).clamp(0.0, 1.0);
            agent.earmark = self.earmark.as_ref().map_or(0, |f| f(id, pos));

            grid.place(id, pos)?;
            population.push(agent)?;
        }

        let k = cfg.initial_infected_count();
        for idx in rng.sample_indices(n, k) {
            population.get_mut(AgentId(idx as u32))?.stage = Stage::Infected;
        }

        debug!(
            "population built: {n} agents, {k} initially infected, {} isolated",
            population.iter().filter(|a| a.isolated).count()
        );
        Ok(population)
    }
}
