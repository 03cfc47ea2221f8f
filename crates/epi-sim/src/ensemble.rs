//! Many independent runs of one configuration.
//!
//! The ensemble crosses a list of *replicate* values with `iterations`
//! repetitions.  The replicate value is a tag carried into the output so
//! runs can be grouped; it does not change the model.  Every run is fully
//! isolated: its own `Model`, its own `SimRng`.
//!
//! Run seeds are drawn from the ensemble seed, in job order, before any run
//! starts.  The rows therefore do not depend on whether the `parallel`
//! feature is on or how many threads Rayon uses.

use log::{debug, info};

use epi_core::{ModelConfig, ScenarioFile, SimRng, StepClock};
use epi_metrics::MetricsSnapshot;
use epi_schedule::{EarmarkPolicy, SchedulerKind};

use crate::{ModelBuilder, NoopObserver, SimError, SimResult};

/// Everything needed to run an ensemble.
#[derive(Clone, Debug)]
pub struct EnsembleSpec {
    pub config:     ModelConfig,
    pub scheduler:  SchedulerKind,
    pub earmark:    EarmarkPolicy,
    /// Replicate tags; every one is run `iterations` times.
    pub replicates: Vec<u64>,
    pub iterations: usize,
    /// Steps per run.
    pub max_steps:  u64,
    pub seed:       u64,
}

impl EnsembleSpec {
    /// Ensemble dimensions from a scenario file: `ensemble.runs` iterations
    /// of `ensemble.days` days each.
    pub fn from_scenario(scenario: &ScenarioFile) -> SimResult<Self> {
        let section = &scenario.model;
        let builder = ModelBuilder::from_section(section)?;
        let clock = StepClock::new(section.config.epidemiology.steps_per_day);
        Ok(Self {
            config:     section.config.clone(),
            scheduler:  builder.kind(),
            earmark:    builder.policy(),
            replicates: scenario.ensemble.replicates.clone(),
            iterations: scenario.ensemble.runs,
            max_steps:  clock.steps_for_days(scenario.ensemble.days),
            seed:       section.seed,
        })
    }

    /// Total number of runs.
    pub fn run_count(&self) -> usize {
        self.replicates.len() * self.iterations
    }
}

/// One row of the ensemble table: the metrics of one step of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnsembleRow {
    /// Zero-based index of the run across the whole ensemble.
    pub iteration: usize,
    pub replicate: u64,
    pub metrics:   MetricsSnapshot,
}

struct Job {
    iteration: usize,
    replicate: u64,
    seed:      u64,
}

/// Run every job of `spec` and return all rows, ordered by iteration then
/// step.
pub fn run_ensemble(spec: &EnsembleSpec) -> SimResult<Vec<EnsembleRow>> {
    if spec.replicates.is_empty() {
        return Err(SimError::Config("ensemble needs at least one replicate value".into()));
    }
    spec.config.validate()?;

    let mut root = SimRng::new(spec.seed);
    let mut jobs = Vec::with_capacity(spec.run_count());
    for &replicate in &spec.replicates {
        for _ in 0..spec.iterations {
            let iteration = jobs.len();
            jobs.push(Job { iteration, replicate, seed: root.random::<u64>() });
        }
    }

    info!(
        "executing an ensemble of {} runs ({} replicates x {} iterations), {} steps each",
        jobs.len(),
        spec.replicates.len(),
        spec.iterations,
        spec.max_steps
    );

    #[cfg(not(feature = "parallel"))]
    let per_run: Vec<Vec<EnsembleRow>> =
        jobs.iter().map(|job| run_one(spec, job)).collect::<SimResult<_>>()?;

    #[cfg(feature = "parallel")]
    let per_run: Vec<Vec<EnsembleRow>> = {
        use rayon::prelude::*;
        jobs.par_iter().map(|job| run_one(spec, job)).collect::<SimResult<_>>()?
    };

    let rows: Vec<EnsembleRow> = per_run.into_iter().flatten().collect();
    info!("ensemble complete: {} rows", rows.len());
    Ok(rows)
}

fn run_one(spec: &EnsembleSpec, job: &Job) -> SimResult<Vec<EnsembleRow>> {
    debug!("run {} (replicate {}) seed {}", job.iteration, job.replicate, job.seed);
    let mut model = ModelBuilder::new(spec.config.clone())
        .scheduler(spec.scheduler)
        .earmark_policy(spec.earmark)
        .seed(job.seed)
        .build()?;
    model.run_steps(spec.max_steps, &mut NoopObserver)?;

    Ok(model
        .metrics_history()
        .iter()
        .map(|&metrics| EnsembleRow {
            iteration: job.iteration,
            replicate: job.replicate,
            metrics,
        })
        .collect())
}
