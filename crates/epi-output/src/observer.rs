//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use epi_metrics::MetricsSnapshot;
use epi_sim::SimObserver;

use crate::writer::OutputWriter;
use crate::{MetricsRow, OutputError, OutputResult};

/// A [`SimObserver`] that writes one [`MetricsRow`] per step to any
/// [`OutputWriter`] backend.
///
/// `SimObserver` methods have no return value, so the first write error is
/// stored and later writes are skipped.  Check it with
/// [`take_error`][Self::take_error] after the run.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_metrics(&mut self, metrics: &MetricsSnapshot) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.writer.write_metrics(&MetricsRow::from(metrics));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _steps: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
