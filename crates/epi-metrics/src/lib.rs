//! `epi-metrics` — read-only statistics over a population.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`snapshot`]   | `MetricsSnapshot`, `compute_snapshot`                    |
//! | [`aggregator`] | `Aggregator` — last snapshot plus per-step history       |
//! | [`error`]      | `MetricsError`, `MetricsResult<T>`                       |
//!
//! Nothing here mutates agents or the grid.  The model collects a snapshot at
//! the start of every step, before the scheduler runs, so snapshot `k`
//! describes the state left by step `k - 1`.

pub mod aggregator;
pub mod error;
pub mod snapshot;


pub use aggregator::Aggregator;
pub use error::{MetricsError, MetricsResult};
pub use snapshot::{MetricsSnapshot, compute_snapshot, effective_reproduction_number};
