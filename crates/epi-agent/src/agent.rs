//! The per-agent record.

use epi_core::{AgentId, MobilityType, Stage};
use epi_grid::Position;

use crate::Population;

/// One continuous exposure to a contagious agent in one cell.
///
/// Meeting the same agent in the same cell on consecutive steps extends the
/// trace instead of adding a new one, so a stationary pair costs one entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactTrace {
    pub with:  AgentId,
    pub at:    Position,
    /// First step of the exposure.
    pub step:  u64,
    /// Most recent step the exposure was observed.
    pub until: u64,
}

/// A single simulated person.
///
/// Timers (`incubation_time`, `recovery_time`, `dwelling_time`) are sampled
/// once at creation and never change; the `curr_*` counters evolve every
/// step.  All durations are in steps.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:    AgentId,
    pub stage: Stage,

    // ── Behaviour ─────────────────────────────────────────────────────────
    pub mobility_type: MobilityType,
    /// Shelters at home: does not move while susceptible and only meets
    /// cell-mates when isolation fails.
    pub isolated: bool,
    /// Set the first time an isolated agent is exposed despite isolating.
    pub isolated_but_inefficient: bool,

    // ── Timers ────────────────────────────────────────────────────────────
    pub incubation_time: u32,
    pub recovery_time:   u32,
    pub dwelling_time:   u32,
    pub curr_incubation: u32,
    pub curr_recovery:   u32,
    pub curr_dwelling:   u32,

    // ── Per-agent rates ───────────────────────────────────────────────────
    pub prob_contagion:  f64,
    /// Per-step probability of dying while severe.
    pub mortality_value: f64,
    /// Per-step probability of escalating to severe while infected.
    pub severity_value:  f64,

    /// Partition tag read by the partitioned scheduler.
    pub earmark: u32,
    pub pos:     Position,

    pub contacts: Vec<ContactTrace>,
}

impl Agent {
    /// A susceptible, non-isolated agent at `pos` with every timer at zero.
    pub fn new(id: AgentId, pos: Position) -> Self {
        Self {
            id,
            stage: Stage::Susceptible,
            mobility_type: MobilityType::LocalOnly,
            isolated: false,
            isolated_but_inefficient: false,
            incubation_time: 0,
            recovery_time: 0,
            dwelling_time: 0,
            curr_incubation: 0,
            curr_recovery: 0,
            curr_dwelling: 0,
            prob_contagion: 0.0,
            mortality_value: 0.0,
            severity_value: 0.0,
            earmark: 0,
            pos,
            contacts: Vec::new(),
        }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn isolated(&self) -> bool {
        self.isolated
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn is_contagious(&self) -> bool {
        self.stage.is_contagious()
    }

    /// Exposures recorded so far, oldest first.
    pub fn contacts(&self) -> &[ContactTrace] {
        &self.contacts
    }

    /// Note an exposure to `with` in cell `at` during step `step`.
    pub fn record_contact(&mut self, with: AgentId, at: Position, step: u64) {
        if let Some(last) = self.contacts.last_mut() {
            if last.with == with && last.at == at && last.until + 1 == step {
                last.until = step;
                return;
            }
        }
        self.contacts.push(ContactTrace { with, at, step, until: step });
    }

    /// Total disease duration: incubation plus recovery.
    #[inline]
    pub fn course_length(&self) -> u32 {
        self.incubation_time.saturating_add(self.recovery_time)
    }

    /// Steps of the disease course already elapsed.
    #[inline]
    pub fn course_elapsed(&self) -> u32 {
        self.curr_incubation.saturating_add(self.curr_recovery)
    }

    /// Other occupants of this agent's cell it effectively interacts with.
    ///
    /// Only non-terminal agents interact.  Isolated cell-mates are excluded
    /// unless this agent's own isolation has already failed, in which case
    /// everyone counts.  `cell` is the full occupant list, self included.
    pub fn interactants(&self, cell: &[AgentId], population: &Population) -> usize {
        if self.stage.is_terminal() {
            return 0;
        }
        cell.iter()
            .filter(|&&other| other != self.id)
            .filter(|&&other| {
                self.isolated_but_inefficient
                    || population.find(other).is_some_and(|a| !a.isolated)
            })
            .count()
    }
}
