//! `epi-sim` — drives a population through time.
//!
//! # One step
//!
//! ```text
//! step k:
//!   ① Progress  — log "Simulating day d" on the first step of each day.
//!   ② Metrics   — Aggregator scans the population (state left by step k-1).
//!   ③ Schedule  — the Scheduler orders every agent; each runs step_agent,
//!                 which may read cell-mates and move on the grid.
//!   ④ Advance   — stepno += 1.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`model`]     | `Model` — owns grid, population, scheduler, RNG         |
//! | [`builder`]   | `ModelBuilder`                                          |
//! | [`observer`]  | `SimObserver` trait, `NoopObserver`                     |
//! | [`ensemble`]  | `EnsembleSpec`, `EnsembleRow`, `run_ensemble`           |
//! | [`error`]     | `SimError`, `SimResult<T>`                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `run_ensemble` runs its independent runs on Rayon.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_core::ModelConfig;
//! use epi_schedule::SchedulerKind;
//! use epi_sim::{ModelBuilder, NoopObserver};
//!
//! let mut model = ModelBuilder::new(ModelConfig::default())
//!     .scheduler(SchedulerKind::Partitioned { partitions: 4 })
//!     .seed(42)
//!     .build()?;
//! model.run_steps(96 * 30, &mut NoopObserver)?;
//! println!("{:?}", model.last_metrics());
//! ```

pub mod builder;
pub mod ensemble;
pub mod error;
pub mod model;
pub mod observer;


pub use builder::ModelBuilder;
pub use ensemble::{EnsembleRow, EnsembleSpec, run_ensemble};
pub use error::{SimError, SimResult};
pub use model::Model;
pub use observer::{NoopObserver, SimObserver};
