//! `epi-output` — table writers for isepi runs and ensembles.
//!
//! Two backends:
//!
//! | Feature   | Backend | Files created                                   |
//! |-----------|---------|-------------------------------------------------|
//! | *(none)*  | CSV     | `<prefix>_steps.csv`, `<prefix>.csv`            |
//! | `sqlite`  | SQLite  | `<prefix>.db` (tables `steps`, `ensemble`)      |
//!
//! `_steps` holds one row per step of a single run; the ensemble table holds
//! one row per step of every run, tagged with `Iteration` and `Replicate`.
//!
//! Both backends implement [`OutputWriter`].  A single run is streamed
//! through [`SimOutputObserver`], which implements `epi_sim::SimObserver`;
//! ensemble rows are written in one batch once `run_ensemble` returns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::steps(Path::new("./out"), "baseline")?;
//! let mut obs = SimOutputObserver::new(writer);
//! model.run_days(30, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EnsembleRecord, MetricsRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
