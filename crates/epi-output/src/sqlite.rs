//! SQLite output backend (feature `sqlite`).
//!
//! Creates `<prefix>.db` in the output directory with two tables, `steps`
//! and `ensemble`.  NaN Rt is stored as NULL.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EnsembleRecord, MetricsRow, OutputResult};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

const METRIC_COLUMNS_DDL: &str = "
    step          INTEGER NOT NULL,
    n             INTEGER NOT NULL,
    susceptible   REAL    NOT NULL,
    infected      REAL    NOT NULL,
    severe        REAL    NOT NULL,
    recovered     REAL    NOT NULL,
    deceased      REAL    NOT NULL,
    isolated      REAL    NOT NULL,
    local_only    REAL    NOT NULL,
    between_grids REAL    NOT NULL,
    avg_contacts  REAL    NOT NULL,
    rt            REAL";

impl SqliteWriter {
    /// Open (or create) `<prefix>.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path, prefix: &str) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(format!("{prefix}.db")))?;
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS steps ({METRIC_COLUMNS_DDL});
             CREATE TABLE IF NOT EXISTS ensemble (
                 iteration INTEGER NOT NULL,
                 replicate INTEGER NOT NULL,{METRIC_COLUMNS_DDL}
             );"
        ))?;
        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO steps VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                row.step as i64,
                row.n as i64,
                row.susceptible,
                row.infected,
                row.severe,
                row.recovered,
                row.deceased,
                row.isolated,
                row.local_only,
                row.between_grids,
                row.avg_contacts,
                row.rt(),
            ],
        )?;
        Ok(())
    }

    fn write_ensemble(&mut self, rows: &[EnsembleRecord]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO ensemble VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for r in rows {
                let m = &r.metrics;
                stmt.execute(rusqlite::params![
                    r.iteration as i64,
                    r.replicate as i64,
                    m.step as i64,
                    m.n as i64,
                    m.susceptible,
                    m.infected,
                    m.severe,
                    m.recovered,
                    m.deceased,
                    m.isolated,
                    m.local_only,
                    m.between_grids,
                    m.avg_contacts,
                    m.rt(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
