//! The `Model` struct and its step loop.

use log::{debug, info};

use epi_agent::{Agent, Population, TransitionParams, step_agent};
use epi_core::{ModelConfig, SimRng, StepClock};
use epi_grid::MultiGrid;
use epi_metrics::{Aggregator, MetricsSnapshot};
use epi_schedule::{Activation, Scheduler, SchedulerKind};

use crate::{SimError, SimObserver, SimResult};

/// One simulation run.
///
/// Owns every piece of mutable state; nothing is shared with other runs.
/// Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct Model {
    pub(crate) config:     ModelConfig,
    pub(crate) clock:      StepClock,
    pub(crate) grid:       MultiGrid,
    pub(crate) population: Population,
    pub(crate) scheduler:  Scheduler,
    pub(crate) rng:        SimRng,
    pub(crate) aggregator: Aggregator,
    pub(crate) params:     TransitionParams,
}

impl Model {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one step: snapshot the metrics, then update every agent in
    /// the scheduler's order.
    ///
    /// An agent update that finds the model inconsistent aborts the step
    /// with [`SimError::Invariant`]; neither the step counter nor the
    /// metrics history advances.
    pub fn step(&mut self) -> SimResult<()> {
        let stepno = self.clock.current();
        if self.clock.is_day_start() {
            info!("Simulating day {}", self.clock.day());
        }

        let snap = self.aggregator.compute(stepno, &self.population, &self.grid)?;
        debug!(
            "step {stepno}: S={} I={} V={} R={} D={} contacts={:.3} rt={:.3}",
            snap.susceptible,
            snap.infected,
            snap.severe,
            snap.recovered,
            snap.deceased,
            snap.avg_contacts,
            snap.rt
        );

        // Split borrow: the scheduler hands the rng to each update.
        let Model { scheduler, population, grid, rng, params, .. } = self;
        scheduler
            .step(rng, |id, rng| step_agent(id, population, grid, params, stepno, rng))
            .map_err(|source| SimError::Invariant { step: stepno, source })?;

        self.aggregator.record(snap);
        self.clock.advance();
        Ok(())
    }

    /// Run exactly `n` steps from the current position, reporting to
    /// `observer`.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current();
            observer.on_step_start(now);
            self.step()?;
            if let Some(m) = self.aggregator.last() {
                observer.on_metrics(m);
            }
            observer.on_step_end(now, &self.population);
        }
        observer.on_sim_end(self.clock.current());
        Ok(())
    }

    /// Run `days` whole days.
    pub fn run_days<O: SimObserver>(&mut self, days: u64, observer: &mut O) -> SimResult<()> {
        let n = self.clock.steps_for_days(days);
        self.run_steps(n, observer)
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Steps completed so far.
    #[inline]
    pub fn stepno(&self) -> u64 {
        self.clock.current()
    }

    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// All agents in id order, for rendering.
    pub fn agents(&self) -> &[Agent] {
        self.population.as_slice()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn grid(&self) -> &MultiGrid {
        &self.grid
    }

    pub fn scheduler_kind(&self) -> SchedulerKind {
        self.scheduler.kind()
    }

    /// The snapshot taken at the start of the most recent step.
    pub fn last_metrics(&self) -> Option<&MetricsSnapshot> {
        self.aggregator.last()
    }

    /// One snapshot per completed step, oldest first.
    pub fn metrics_history(&self) -> &[MetricsSnapshot] {
        self.aggregator.history()
    }
}
