//! Disease stages and mobility classes shared by every crate.

/// Where an agent sits in the disease-progression state machine.
///
/// ```text
/// Susceptible ──► Infected ──► Recovered
///                    │             ▲
///                    ▼             │
///                  Severe ─────────┘
///                    │
///                    ▼
///                 Deceased
/// ```
///
/// `Recovered` and `Deceased` are terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Susceptible,
    Infected,
    Severe,
    Recovered,
    Deceased,
}

impl Stage {
    /// Every stage, in reporting order.
    pub const ALL: [Stage; 5] = [
        Stage::Susceptible,
        Stage::Infected,
        Stage::Severe,
        Stage::Recovered,
        Stage::Deceased,
    ];

    /// `true` for stages that can pass the disease to a cell-mate.
    #[inline]
    pub fn is_contagious(self) -> bool {
        matches!(self, Stage::Infected | Stage::Severe)
    }

    /// `true` once no further disease transition is possible.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Recovered | Stage::Deceased)
    }

    /// Position in [`Stage::ALL`]; used to index per-stage counters.
    #[inline]
    pub fn ordinal(self) -> usize {
        match self {
            Stage::Susceptible => 0,
            Stage::Infected    => 1,
            Stage::Severe      => 2,
            Stage::Recovered   => 3,
            Stage::Deceased    => 4,
        }
    }

    /// Lower-case label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Susceptible => "susceptible",
            Stage::Infected    => "infected",
            Stage::Severe      => "severe",
            Stage::Recovered   => "recovered",
            Stage::Deceased    => "deceased",
        }
    }

    /// Portrayal color used by grid renderers.
    pub fn color(self) -> &'static str {
        match self {
            Stage::Susceptible => "blue",
            Stage::Infected    => "red",
            Stage::Severe      => "magenta",
            Stage::Recovered   => "green",
            Stage::Deceased    => "black",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MobilityType ──────────────────────────────────────────────────────────────

/// How far an agent is willing to roam.
///
/// Only a single grid is modelled, so `BetweenGrids` is never assigned by the
/// population builder; it is kept so reports keep a stable column set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityType {
    /// Shelters at home; does not move.
    Isolated,
    /// Moves within its own grid.
    #[default]
    LocalOnly,
    /// Commutes between grids.
    BetweenGrids,
}

impl MobilityType {
    pub fn as_str(self) -> &'static str {
        match self {
            MobilityType::Isolated     => "isolated",
            MobilityType::LocalOnly    => "local_only",
            MobilityType::BetweenGrids => "between_grids",
        }
    }
}

impl std::fmt::Display for MobilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
