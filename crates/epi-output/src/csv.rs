//! CSV output backend.
//!
//! Two tables, each in its own file in the output directory:
//! - `<prefix>_steps.csv`: `Step,N,Susceptible,...,Rt`
//! - `<prefix>.csv`: `Iteration,Replicate,Step,N,...,Rt`
//!
//! A file is created (and truncated) only when its table is opened: by the
//! matching constructor, or by the first non-empty write to the other table.
//! A single run therefore leaves an existing ensemble table alone, and the
//! other way round.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::debug;

use crate::row::METRICS_COLUMNS;
use crate::writer::OutputWriter;
use crate::{EnsembleRecord, MetricsRow, OutputResult};

/// Writes the step and ensemble tables to CSV files.
pub struct CsvWriter {
    dir:      PathBuf,
    prefix:   String,
    steps:    Option<Writer<File>>,
    ensemble: Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Writer for a single run; creates `<prefix>_steps.csv` with its header.
    pub fn steps(dir: &Path, prefix: &str) -> OutputResult<Self> {
        let mut w = Self::unopened(dir, prefix);
        w.steps_table()?;
        Ok(w)
    }

    /// Writer for an ensemble; creates `<prefix>.csv` with its header.
    pub fn ensemble(dir: &Path, prefix: &str) -> OutputResult<Self> {
        let mut w = Self::unopened(dir, prefix);
        w.ensemble_table()?;
        Ok(w)
    }

    fn unopened(dir: &Path, prefix: &str) -> Self {
        Self {
            dir:      dir.to_path_buf(),
            prefix:   prefix.to_string(),
            steps:    None,
            ensemble: None,
            finished: false,
        }
    }

    /// Path of the per-step table.
    pub fn steps_path(&self) -> PathBuf {
        self.dir.join(format!("{}_steps.csv", self.prefix))
    }

    /// Path of the ensemble table.
    pub fn ensemble_path(&self) -> PathBuf {
        self.dir.join(format!("{}.csv", self.prefix))
    }

    fn steps_table(&mut self) -> OutputResult<&mut Writer<File>> {
        let w = match self.steps.take() {
            Some(w) => w,
            None => create(&self.steps_path(), METRICS_COLUMNS)?,
        };
        Ok(self.steps.insert(w))
    }

    fn ensemble_table(&mut self) -> OutputResult<&mut Writer<File>> {
        let w = match self.ensemble.take() {
            Some(w) => w,
            None => create(
                &self.ensemble_path(),
                ["Iteration", "Replicate"].into_iter().chain(METRICS_COLUMNS),
            )?,
        };
        Ok(self.ensemble.insert(w))
    }
}

fn create<'a>(path: &Path, header: impl IntoIterator<Item = &'a str>) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(path)?;
    w.write_record(header)?;
    Ok(w)
}

fn metrics_fields(row: &MetricsRow) -> [String; 12] {
    [
        row.step.to_string(),
        row.n.to_string(),
        row.susceptible.to_string(),
        row.infected.to_string(),
        row.severe.to_string(),
        row.recovered.to_string(),
        row.deceased.to_string(),
        row.isolated.to_string(),
        row.local_only.to_string(),
        row.between_grids.to_string(),
        row.avg_contacts.to_string(),
        row.rt().map(|v| v.to_string()).unwrap_or_default(),
    ]
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.steps_table()?.write_record(&metrics_fields(row))?;
        Ok(())
    }

    fn write_ensemble(&mut self, rows: &[EnsembleRecord]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let table = self.ensemble_table()?;
        for r in rows {
            let tags = [r.iteration.to_string(), r.replicate.to_string()];
            table.write_record(tags.iter().chain(metrics_fields(&r.metrics).iter()))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if let Some(w) = self.steps.as_mut() {
            w.flush()?;
            debug!("flushed {}", self.steps_path().display());
        }
        if let Some(w) = self.ensemble.as_mut() {
            w.flush()?;
            debug!("flushed {}", self.ensemble_path().display());
        }
        Ok(())
    }
}
