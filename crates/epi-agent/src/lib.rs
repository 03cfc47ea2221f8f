//! `epi-agent` — the people of the simulation and what happens to them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`agent`]       | `Agent` record, `ContactTrace`                             |
//! | [`population`]  | `Population` — owned registry indexed by `AgentId`         |
//! | [`builder`]     | `PopulationBuilder` — samples timers, places, seeds cases  |
//! | [`transition`]  | `step_agent` — disease stages, contagion, mobility         |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                             |
//!
//! # Ownership
//!
//! `Population` owns every `Agent`.  The grid only indexes ids by cell, so an
//! update borrows the population and the grid side by side:
//!
//! ```ignore
//! let Model { population, grid, scheduler, rng, .. } = self;
//! scheduler.step(rng, |id, rng| step_agent(id, population, grid, &params, stepno, rng))?;
//! ```

pub mod agent;
pub mod builder;
pub mod error;
pub mod population;
pub mod transition;

#[cfg(test)]
mod tests;

pub use agent::{Agent, ContactTrace};
pub use builder::PopulationBuilder;
pub use error::{AgentError, AgentResult};
pub use population::Population;
pub use transition::{TransitionParams, step_agent};
