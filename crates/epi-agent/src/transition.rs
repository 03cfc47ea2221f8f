//! The per-agent update: disease progression, contagion, and mobility.
//!
//! # Branches
//!
//! | Stage         | Update                                                        |
//! |---------------|---------------------------------------------------------------|
//! | `Susceptible` | first-contact exposure, then move unless isolated              |
//! | `Infected`    | advance the course; may turn severe; recovers when it ends    |
//! | `Severe`      | advance the course; may die; recovers when it ends            |
//! | `Recovered`   | reset recovery counter, move                                  |
//! | `Deceased`    | nothing                                                       |
//!
//! Before branching, a susceptible agent runs the inbound trial; if it comes
//! back infected it takes the `Infected` branch in the same step.
//!
//! # First-contact tie-break
//!
//! A susceptible agent scans its cell in occupant order and stops at the
//! first contagious cell-mate.  Only that one contact is ever counted per
//! step, however many contagious agents share the cell.

use log::trace;

use epi_core::{AgentId, ModelConfig, SimRng, Stage};
use epi_grid::MultiGrid;

use crate::{Agent, AgentError, AgentResult, Population};

/// Model-wide rates read by every update.  Per-agent rates live on
/// [`Agent`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionParams {
    pub rate_inbound:             f64,
    pub prob_isolation_effective: f64,
    /// Poisson mean of the dwell resampled after each move, in steps.
    pub avg_dwell:                f64,
}

impl TransitionParams {
    pub fn from_config(config: &ModelConfig) -> Self {
        let e = &config.epidemiology;
        Self {
            rate_inbound:             e.rate_inbound,
            prob_isolation_effective: e.prob_isolation_effective,
            avg_dwell:                e.avg_dwell,
        }
    }
}

/// Advance agent `id` by one step.
///
/// Reads cell-mates from `population` and `grid`, then mutates only agent
/// `id` (and its grid entry).  Every random draw comes from `rng`.
pub fn step_agent(
    id:         AgentId,
    population: &mut Population,
    grid:       &mut MultiGrid,
    params:     &TransitionParams,
    stepno:     u64,
    rng:        &mut SimRng,
) -> AgentResult<()> {
    let mut stage = population.get(id)?.stage;

    // A returning traveller goes straight on to this step's infected update.
    if stage == Stage::Susceptible && rng.gen_bool(params.rate_inbound) {
        population.get_mut(id)?.stage = Stage::Infected;
        stage = Stage::Infected;
        trace!("step {stepno}: {id} infected on return from outside");
    }

    match stage {
        Stage::Susceptible => step_susceptible(id, population, grid, params, stepno, rng),
        Stage::Infected => {
            let agent = population.get_mut(id)?;
            if agent.course_elapsed() < agent.course_length() {
                agent.curr_recovery += 1;
                if rng.gen_bool(agent.severity_value) {
                    agent.stage = Stage::Severe;
                    trace!("step {stepno}: {id} became severe");
                }
            } else {
                agent.stage = Stage::Recovered;
                trace!("step {stepno}: {id} recovered");
            }
            Ok(())
        }
        Stage::Severe => {
            let agent = population.get_mut(id)?;
            if agent.course_elapsed() < agent.course_length() {
                agent.curr_recovery += 1;
                if rng.gen_bool(agent.mortality_value) {
                    agent.stage = Stage::Deceased;
                    trace!("step {stepno}: {id} died");
                }
            } else {
                agent.stage = Stage::Recovered;
                trace!("step {stepno}: {id} recovered from a severe course");
            }
            Ok(())
        }
        Stage::Recovered => {
            let agent = population.get_mut(id)?;
            agent.curr_recovery = 0;
            relocate(agent, grid, params.avg_dwell, rng)
        }
        Stage::Deceased => Ok(()),
    }
}

fn step_susceptible(
    id:         AgentId,
    population: &mut Population,
    grid:       &mut MultiGrid,
    params:     &TransitionParams,
    stepno:     u64,
    rng:        &mut SimRng,
) -> AgentResult<()> {
    // Immutable scan first; the agent is mutated only after.
    let pos = population.get(id)?.pos;
    let mut source = None;
    for &other in grid.occupants(pos)? {
        if other != id && population.get(other)?.is_contagious() {
            source = Some(other);
            break;
        }
    }

    let agent = population.get_mut(id)?;
    if let Some(with) = source {
        agent.record_contact(with, pos, stepno);

        let counted = if agent.isolated {
            let breached = rng.gen_bool(1.0 - params.prob_isolation_effective);
            if breached {
                agent.isolated_but_inefficient = true;
            }
            breached
        } else {
            true
        };

        if counted && rng.gen_bool(agent.prob_contagion) {
            agent.stage = Stage::Infected;
            trace!("step {stepno}: {id} infected by {with} at {pos}");
        }
    }

    if !agent.isolated {
        relocate(agent, grid, params.avg_dwell, rng)?;
    }
    Ok(())
}

/// Dwell or move.
///
/// With dwell remaining the agent stays and the counter drops by one.
/// Otherwise it steps to a uniformly chosen Moore neighbour and draws a new
/// dwell; with no neighbours (1 × 1 grid) it stays but still redraws.
fn relocate(
    agent:     &mut Agent,
    grid:      &mut MultiGrid,
    avg_dwell: f64,
    rng:       &mut SimRng,
) -> AgentResult<()> {
    if agent.curr_dwelling > 0 {
        agent.curr_dwelling -= 1;
        return Ok(());
    }

    let indexed = grid.position_of(agent.id);
    if indexed != Some(agent.pos) {
        return Err(AgentError::PositionMismatch {
            agent:    agent.id,
            recorded: agent.pos,
            indexed,
        });
    }

    let neighbors = grid.neighbors(agent.pos)?;
    if let Some(&target) = rng.choose(&neighbors) {
        agent.pos = grid.move_agent(agent.id, target)?;
    }
    agent.curr_dwelling = rng.poisson(avg_dwell);
    Ok(())
}
