//! Model configuration and scenario files.
//!
//! # Scenario file format (JSON)
//!
//! ```json
//! {
//!   "description": "Baseline, no isolation",
//!   "prepared-by": "modelling team",
//!   "date": "2021-04-01",
//!   "model": {
//!     "epidemiology": {
//!       "prop_initial_infected": 0.01,
//!       "avg_incubation_time": 5,
//!       "avg_recovery_time": 15,
//!       "mortality_rate": 0.13,
//!       "prob_contagion": 0.03,
//!       "avg_dwell": 4
//!     },
//!     "gridworld": { "width": 50, "height": 50, "num_agents": 240 },
//!     "scheduler": { "kind": "graham", "partitions": 4, "earmark": "modulo" },
//!     "seed": 42
//!   },
//!   "ensemble": { "runs": 10, "days": 30, "replicates": [25] },
//!   "output": { "prefix": "baseline" }
//! }
//! ```
//!
//! Fields of `epidemiology` and `gridworld` without a `#[serde(default)]` are
//! required; a missing one is a parse error.  Range checks happen in
//! [`ModelConfig::validate`], which every loader calls.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::time::DEFAULT_STEPS_PER_DAY;
use crate::{EpiError, EpiResult};

// ── Epidemiology ──────────────────────────────────────────────────────────────

/// Disease and behaviour parameters.
///
/// Times are given in days and converted to steps with `steps_per_day`,
/// except `avg_dwell`, which is already in steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpidemiologyParams {
    /// Fraction of the population infected at setup.
    pub prop_initial_infected: f64,
    /// Mean incubation period, days.
    pub avg_incubation_time: f64,
    /// Mean recovery period, days.
    pub avg_recovery_time: f64,
    /// Probability of dying over a severe course of the disease.
    pub mortality_rate: f64,
    /// Per-contact transmission probability.
    pub prob_contagion: f64,
    /// Mean number of steps an agent stays in a cell before moving.
    pub avg_dwell: f64,

    /// Probability of escalating to a severe course over the disease.
    #[serde(default)]
    pub severity_rate: f64,
    /// Per-step probability that a susceptible agent returns infected from
    /// outside the modelled area.
    #[serde(default)]
    pub rate_inbound: f64,
    /// Probability that isolation prevents an exposure.
    #[serde(default = "one")]
    pub prob_isolation_effective: f64,
    /// Fraction of agents sheltering at home.
    #[serde(default)]
    pub prop_isolated: f64,
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day: u32,
}

fn one() -> f64 {
    1.0
}

fn default_steps_per_day() -> u32 {
    DEFAULT_STEPS_PER_DAY
}

impl Default for EpidemiologyParams {
    fn default() -> Self {
        Self {
            prop_initial_infected:    0.001,
            avg_incubation_time:      5.0,
            avg_recovery_time:        15.0,
            mortality_rate:           0.13,
            prob_contagion:           0.03,
            avg_dwell:                4.0,
            severity_rate:            0.0,
            rate_inbound:             0.0,
            prob_isolation_effective: 1.0,
            prop_isolated:            0.0,
            steps_per_day:            DEFAULT_STEPS_PER_DAY,
        }
    }
}

// ── Gridworld ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    pub width:      u32,
    pub height:     u32,
    pub num_agents: u32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { width: 50, height: 50, num_agents: 240 }
    }
}

// ── ModelConfig ───────────────────────────────────────────────────────────────

/// Everything a model needs besides the scheduler choice and the seed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub epidemiology: EpidemiologyParams,
    pub gridworld:    GridParams,
}

impl ModelConfig {
    /// Reject out-of-range values.
    pub fn validate(&self) -> EpiResult<()> {
        let e = &self.epidemiology;
        check_probability("prop_initial_infected", e.prop_initial_infected)?;
        check_probability("mortality_rate", e.mortality_rate)?;
        check_probability("prob_contagion", e.prob_contagion)?;
        check_probability("severity_rate", e.severity_rate)?;
        check_probability("rate_inbound", e.rate_inbound)?;
        check_probability("prob_isolation_effective", e.prob_isolation_effective)?;
        check_probability("prop_isolated", e.prop_isolated)?;
        check_non_negative("avg_incubation_time", e.avg_incubation_time)?;
        check_non_negative("avg_recovery_time", e.avg_recovery_time)?;
        check_non_negative("avg_dwell", e.avg_dwell)?;
        if e.steps_per_day == 0 {
            return Err(EpiError::Config("steps_per_day must be at least 1".into()));
        }

        let g = &self.gridworld;
        if g.width == 0 || g.height == 0 {
            return Err(EpiError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                g.width, g.height
            )));
        }
        if g.num_agents == 0 {
            return Err(EpiError::Config("num_agents must be at least 1".into()));
        }
        Ok(())
    }

    /// Poisson mean of the per-agent incubation time, in steps.
    pub fn incubation_mean_steps(&self) -> f64 {
        (self.epidemiology.avg_incubation_time * self.epidemiology.steps_per_day as f64).round()
    }

    /// Poisson mean of the per-agent recovery time, in steps.
    pub fn recovery_mean_steps(&self) -> f64 {
        self.epidemiology.avg_recovery_time * self.epidemiology.steps_per_day as f64
    }

    /// Number of agents forced into the infected stage at setup.
    pub fn initial_infected_count(&self) -> usize {
        let n = self.gridworld.num_agents as usize;
        let k = (self.epidemiology.prop_initial_infected * n as f64).round() as usize;
        k.min(n)
    }
}

fn check_probability(name: &str, v: f64) -> EpiResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(EpiError::Config(format!("{name} must be within [0, 1], got {v}")))
    }
}

fn check_non_negative(name: &str, v: f64) -> EpiResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(EpiError::Config(format!("{name} must be a finite non-negative number, got {v}")))
    }
}

// ── Scenario file ─────────────────────────────────────────────────────────────

/// Raw scheduler selection; parsed into a strategy by `epi-schedule`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerParams {
    pub kind: String,
    #[serde(default)]
    pub partitions: Option<u32>,
    #[serde(default)]
    pub earmark: Option<String>,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self { kind: "uniform".into(), partitions: None, earmark: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSection {
    #[serde(flatten)]
    pub config: ModelConfig,
    #[serde(default)]
    pub scheduler: SchedulerParams,
    #[serde(default)]
    pub seed: u64,
}

/// Ensemble dimensions: `runs` iterations of every replicate value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnsembleParams {
    pub runs: usize,
    pub days: u64,
    /// Values of the varying "replicate" parameter.
    #[serde(default = "default_replicates")]
    pub replicates: Vec<u64>,
}

fn default_replicates() -> Vec<u64> {
    vec![0]
}

impl Default for EnsembleParams {
    fn default() -> Self {
        Self { runs: 1, days: 1, replicates: default_replicates() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputParams {
    pub prefix: String,
}

/// A complete scenario as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "prepared-by")]
    pub prepared_by: String,
    #[serde(default)]
    pub date: String,
    pub model: ModelSection,
    #[serde(default)]
    pub ensemble: EnsembleParams,
    pub output: OutputParams,
}

impl ScenarioFile {
    /// Load and validate a scenario from a JSON file.
    pub fn from_path(path: &Path) -> EpiResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`from_path`](Self::from_path) but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> EpiResult<Self> {
        let scenario: ScenarioFile =
            serde_json::from_reader(reader).map_err(|e| EpiError::Parse(e.to_string()))?;
        scenario.model.config.validate()?;
        if scenario.ensemble.replicates.is_empty() {
            return Err(EpiError::Config("ensemble.replicates must not be empty".into()));
        }
        Ok(scenario)
    }
}
