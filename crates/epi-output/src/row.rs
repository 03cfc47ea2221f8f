//! Plain row types written by output backends.

use epi_core::Stage;
use epi_metrics::MetricsSnapshot;
use epi_sim::EnsembleRow;

/// Column names shared by the step table and the tail of the ensemble table.
pub const METRICS_COLUMNS: [&str; 12] = [
    "Step",
    "N",
    "Susceptible",
    "Infected",
    "Severe",
    "Recovered",
    "Deceased",
    "Isolated",
    "LocalOnly",
    "BetweenGrids",
    "AvgContacts",
    "Rt",
];

/// One step of one run.  Stage and mobility columns are fractions of `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsRow {
    pub step:          u64,
    pub n:             u64,
    pub susceptible:   f64,
    pub infected:      f64,
    pub severe:        f64,
    pub recovered:     f64,
    pub deceased:      f64,
    pub isolated:      f64,
    pub local_only:    f64,
    pub between_grids: f64,
    pub avg_contacts:  f64,
    /// NaN when nobody was infected; written as an empty field.
    pub rt:            f64,
}

impl From<&MetricsSnapshot> for MetricsRow {
    fn from(m: &MetricsSnapshot) -> Self {
        Self {
            step:          m.step,
            n:             m.population as u64,
            susceptible:   m.fraction(Stage::Susceptible),
            infected:      m.fraction(Stage::Infected),
            severe:        m.fraction(Stage::Severe),
            recovered:     m.fraction(Stage::Recovered),
            deceased:      m.fraction(Stage::Deceased),
            isolated:      m.isolated_fraction(),
            local_only:    m.local_only_fraction(),
            between_grids: m.between_grids_fraction(),
            avg_contacts:  m.avg_contacts,
            rt:            m.rt,
        }
    }
}

impl MetricsRow {
    /// Rt as an optional value; `None` for NaN.
    pub fn rt(&self) -> Option<f64> {
        if self.rt.is_nan() { None } else { Some(self.rt) }
    }
}

/// One step of one ensemble run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleRecord {
    pub iteration: u64,
    pub replicate: u64,
    pub metrics:   MetricsRow,
}

impl From<&EnsembleRow> for EnsembleRecord {
    fn from(r: &EnsembleRow) -> Self {
        Self {
            iteration: r.iteration as u64,
            replicate: r.replicate,
            metrics:   MetricsRow::from(&r.metrics),
        }
    }
}
