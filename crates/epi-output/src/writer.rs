//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EnsembleRecord, MetricsRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver] errors are
/// stored and retrieved later with `take_error`.
pub trait OutputWriter {
    /// Append one row to the per-step table.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Append a batch of rows to the ensemble table.
    fn write_ensemble(&mut self, rows: &[EnsembleRecord]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
