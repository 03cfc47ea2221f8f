//! `epi-core` — foundational types for the `isepi` epidemic simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies.
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `AgentId`                                                |
//! | [`stage`]    | `Stage`, `MobilityType`                                  |
//! | [`rng`]      | `SimRng` — the single deterministic stream of a run      |
//! | [`time`]     | `StepClock` — step counter with day boundaries           |
//! | [`config`]   | `ModelConfig`, `ScenarioFile`, `EnsembleParams`          |
//! | [`error`]    | `EpiError`, `EpiResult`                                  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod stage;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    EnsembleParams, EpidemiologyParams, GridParams, ModelConfig, ModelSection, OutputParams,
    ScenarioFile, SchedulerParams,
};
pub use error::{EpiError, EpiResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use stage::{MobilityType, Stage};
pub use time::StepClock;
