//! `epi-schedule` — the order in which agents act within a step.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`activation`]  | `Activation` trait shared by both strategies               |
//! | [`uniform`]     | `UniformActivation` — one shuffle of everyone per step      |
//! | [`partitioned`] | `PartitionedActivation` — ordered cohorts, shuffled inside  |
//! | [`kind`]        | `SchedulerKind`, `EarmarkPolicy` (string tokens)           |
//! | [`scheduler`]   | `Scheduler` — closed enum over the two strategies          |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Step contract
//!
//! `step(rng, update)` calls `update(id, rng)` exactly once for every
//! registered agent and then bumps the step counter.  The scheduler's own
//! shuffles and every draw the update makes share the one `rng`, so a seed
//! fixes the whole interleaving.  If `update` fails, the step stops there,
//! the error is returned, and the counter is left alone.

pub mod activation;
pub mod error;
pub mod kind;
pub mod partitioned;
pub mod scheduler;
pub mod uniform;


pub use activation::Activation;
pub use error::{ScheduleError, ScheduleResult};
pub use kind::{EarmarkPolicy, SchedulerKind};
pub use partitioned::PartitionedActivation;
pub use scheduler::Scheduler;
pub use uniform::UniformActivation;
