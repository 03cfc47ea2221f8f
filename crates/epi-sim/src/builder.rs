//! Fluent builder for constructing a [`Model`].

use log::info;

use epi_agent::{PopulationBuilder, TransitionParams};
use epi_core::{ModelConfig, ModelSection, SimRng, StepClock};
use epi_grid::MultiGrid;
use epi_metrics::Aggregator;
use epi_schedule::{Activation, EarmarkPolicy, Scheduler, SchedulerKind};

use crate::{Model, SimResult};

/// Fluent builder for [`Model`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                  |
/// |----------------------|--------------------------|
/// | `.scheduler(k)`      | `SchedulerKind::Uniform` |
/// | `.earmark_policy(p)` | `EarmarkPolicy::Modulo`  |
/// | `.seed(s)`           | `0`                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(config)
///     .scheduler(SchedulerKind::parse("graham", Some(4))?)
///     .earmark_policy(EarmarkPolicy::RowBand)
///     .seed(7)
///     .build()?;
/// ```
pub struct ModelBuilder {
    config:    ModelConfig,
    scheduler: SchedulerKind,
    earmark:   EarmarkPolicy,
    seed:      u64,
}

impl ModelBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            scheduler: SchedulerKind::Uniform,
            earmark:   EarmarkPolicy::default(),
            seed:      0,
        }
    }

    /// Configuration, scheduler, earmark policy, and seed from the `model`
    /// section of a scenario file.
    pub fn from_section(section: &ModelSection) -> SimResult<Self> {
        let kind = SchedulerKind::from_params(&section.scheduler)?;
        let earmark = match &section.scheduler.earmark {
            Some(token) => token.parse::<EarmarkPolicy>()?,
            None => EarmarkPolicy::default(),
        };
        Ok(Self::new(section.config.clone())
            .scheduler(kind)
            .earmark_policy(earmark)
            .seed(section.seed))
    }

    pub fn scheduler(mut self, kind: SchedulerKind) -> Self {
        self.scheduler = kind;
        self
    }

    pub fn earmark_policy(mut self, policy: EarmarkPolicy) -> Self {
        self.earmark = policy;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn kind(&self) -> SchedulerKind {
        self.scheduler
    }

    pub fn policy(&self) -> EarmarkPolicy {
        self.earmark
    }

    /// Validate the configuration, build the grid and population, and
    /// register every agent with the scheduler.
    ///
    /// Any configuration problem is reported here; a `Model` that exists is
    /// ready to step.
    pub fn build(self) -> SimResult<Model> {
        self.config.validate()?;

        let mut scheduler = Scheduler::new(self.scheduler)?;
        let g = &self.config.gridworld;
        let mut grid = MultiGrid::new(g.width, g.height)?;
        let mut rng = SimRng::new(self.seed);

        // ── Population ────────────────────────────────────────────────────
        let height = g.height;
        let partitions = self.scheduler.partitions();
        let policy = self.earmark;
        let population = PopulationBuilder::new(&self.config)
            .earmarks(move |id, pos| policy.earmark(id, pos, height, partitions))
            .build(&mut grid, &mut rng)?;

        for agent in population.iter() {
            scheduler.add(agent.id, agent.earmark)?;
        }

        info!(
            "model ready: {} agents on a {}x{} grid, {} scheduler ({} earmarks), seed {}",
            population.len(),
            g.width,
            g.height,
            self.scheduler,
            policy,
            self.seed
        );

        Ok(Model {
            clock:      StepClock::new(self.config.epidemiology.steps_per_day),
            aggregator: Aggregator::new(self.config.epidemiology.prob_contagion),
            params:     TransitionParams::from_config(&self.config),
            config:     self.config,
            grid,
            population,
            scheduler,
            rng,
        })
    }
}
