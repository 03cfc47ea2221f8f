//! Unit tests for epi-agent.

use epi_core::{AgentId, Stage};
use epi_grid::{MultiGrid, Position};

use crate::{Agent, Population, TransitionParams};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Place `agents` on `grid` and collect them into a `Population`.
fn world(grid: &mut MultiGrid, agents: Vec<Agent>) -> Population {
    let mut pop = Population::new();
    for a in agents {
        grid.place(a.id, a.pos).unwrap();
        pop.push(a).unwrap();
    }
    pop
}

fn params() -> TransitionParams {
    TransitionParams { rate_inbound: 0.0, prob_isolation_effective: 1.0, avg_dwell: 3.0 }
}

/// An infected agent far from the end of its course.
fn contagious(id: u32, pos: Position) -> Agent {
    let mut a = Agent::new(AgentId(id), pos);
    a.stage = Stage::Infected;
    a.incubation_time = 100;
    a.recovery_time = 100;
    a
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population {
    use epi_core::{AgentId, Stage};
    use epi_grid::Position;

    use crate::{Agent, AgentError, Population};

    #[test]
    fn push_in_order() {
        let mut pop = Population::new();
        assert_eq!(pop.push(Agent::new(AgentId(0), Position::new(0, 0))).unwrap(), AgentId(0));
        assert_eq!(pop.push(Agent::new(AgentId(1), Position::new(0, 0))).unwrap(), AgentId(1));
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn push_out_of_order_rejected() {
        let mut pop = Population::new();
        let err = pop.push(Agent::new(AgentId(3), Position::new(0, 0))).unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
        assert!(pop.is_empty());
    }

    #[test]
    fn unknown_agent() {
        let pop = Population::new();
        assert!(matches!(pop.get(AgentId(0)), Err(AgentError::UnknownAgent(AgentId(0)))));
        assert!(pop.find(AgentId(0)).is_none());
    }

    #[test]
    fn stage_counts_sum_to_len() {
        let mut pop = Population::new();
        for i in 0..5 {
            let mut a = Agent::new(AgentId(i), Position::new(0, 0));
            a.stage = Stage::ALL[i as usize % 2];
            pop.push(a).unwrap();
        }
        let counts = pop.stage_counts();
        assert_eq!(counts.iter().sum::<usize>(), 5);
        assert_eq!(counts[Stage::Susceptible.ordinal()], 3);
        assert_eq!(pop.count_stage(Stage::Infected), 2);
    }
}

// ── Agent record ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use epi_core::{AgentId, Stage};
    use epi_grid::{MultiGrid, Position};

    use super::world;
    use crate::Agent;

    #[test]
    fn accessors() {
        let mut a = Agent::new(AgentId(4), Position::new(2, 1));
        a.isolated = true;
        assert_eq!(a.stage(), Stage::Susceptible);
        assert!(a.isolated());
        assert_eq!(a.position(), Position::new(2, 1));
        assert!(!a.is_contagious());
        assert!(a.contacts().is_empty());
    }

    #[test]
    fn interactants_skip_isolated_cellmates() {
        let p = Position::new(0, 0);
        let mut grid = MultiGrid::new(2, 2).unwrap();
        let mut iso = Agent::new(AgentId(2), p);
        iso.isolated = true;
        let pop = world(
            &mut grid,
            vec![Agent::new(AgentId(0), p), Agent::new(AgentId(1), p), iso],
        );
        let cell = grid.occupants(p).unwrap();
        let me = pop.get(AgentId(0)).unwrap();
        assert_eq!(me.interactants(cell, &pop), 1);
    }

    #[test]
    fn inefficient_isolation_counts_everyone() {
        let p = Position::new(0, 0);
        let mut grid = MultiGrid::new(2, 2).unwrap();
        let mut me = Agent::new(AgentId(0), p);
        me.isolated = true;
        me.isolated_but_inefficient = true;
        let mut iso = Agent::new(AgentId(1), p);
        iso.isolated = true;
        let pop = world(&mut grid, vec![me, iso, Agent::new(AgentId(2), p)]);
        let cell = grid.occupants(p).unwrap();
        assert_eq!(pop.get(AgentId(0)).unwrap().interactants(cell, &pop), 2);
    }

    #[test]
    fn terminal_agents_have_no_interactants() {
        let p = Position::new(0, 0);
        let mut grid = MultiGrid::new(2, 2).unwrap();
        let mut dead = Agent::new(AgentId(0), p);
        dead.stage = Stage::Deceased;
        let pop = world(&mut grid, vec![dead, Agent::new(AgentId(1), p)]);
        let cell = grid.occupants(p).unwrap();
        assert_eq!(pop.get(AgentId(0)).unwrap().interactants(cell, &pop), 0);
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use epi_core::{MobilityType, ModelConfig, SimRng, Stage};
    use epi_grid::MultiGrid;

    use crate::{AgentError, PopulationBuilder};

    fn config(n: u32) -> ModelConfig {
        let mut c = ModelConfig::default();
        c.gridworld.width = 10;
        c.gridworld.height = 10;
        c.gridworld.num_agents = n;
        c.epidemiology.prop_initial_infected = 0.05;
        c
    }

    #[test]
    fn places_every_agent() {
        let cfg = config(200);
        let mut grid = MultiGrid::new(10, 10).unwrap();
        let pop = PopulationBuilder::new(&cfg).build(&mut grid, &mut SimRng::new(1)).unwrap();
        assert_eq!(pop.len(), 200);
        assert_eq!(grid.len(), 200);
        for a in pop.iter() {
            assert_eq!(grid.position_of(a.id), Some(a.pos));
        }
    }

    #[test]
    fn initial_infections_rounded() {
        let cfg = config(200);
        let mut grid = MultiGrid::new(10, 10).unwrap();
        let pop = PopulationBuilder::new(&cfg).build(&mut grid, &mut SimRng::new(2)).unwrap();
        assert_eq!(pop.count_stage(Stage::Infected), 10);
        assert_eq!(pop.count_stage(Stage::Susceptible), 190);
    }

    #[test]
    fn same_seed_same_population() {
        let cfg = config(50);
        let mut g1 = MultiGrid::new(10, 10).unwrap();
        let mut g2 = MultiGrid::new(10, 10).unwrap();
        let a = PopulationBuilder::new(&cfg).build(&mut g1, &mut SimRng::new(9)).unwrap();
        let b = PopulationBuilder::new(&cfg).build(&mut g2, &mut SimRng::new(9)).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.stage, y.stage);
            assert_eq!(x.incubation_time, y.incubation_time);
            assert_eq!(x.recovery_time, y.recovery_time);
        }
    }

    #[test]
    fn derived_rates() {
        let mut cfg = config(20);
        cfg.epidemiology.severity_rate = 0.5;
        let mut grid = MultiGrid::new(10, 10).unwrap();
        let pop = PopulationBuilder::new(&cfg).build(&mut grid, &mut SimRng::new(3)).unwrap();
        let spd = cfg.epidemiology.steps_per_day as f64;
        for a in pop.iter() {
            let denom = spd * a.recovery_time.max(1) as f64;
            assert!((a.mortality_value - cfg.epidemiology.mortality_rate / denom).abs() < 1e-15);
            assert!((a.severity_value - 0.5 / denom).abs() < 1e-15);
            assert_eq!(a.prob_contagion, cfg.epidemiology.prob_contagion);
            assert_eq!(a.curr_dwelling, 0);
        }
    }

    #[test]
    fn everyone_isolated() {
        let mut cfg = config(30);
        cfg.epidemiology.prop_isolated = 1.0;
        let mut grid = MultiGrid::new(10, 10).unwrap();
        let pop = PopulationBuilder::new(&cfg).build(&mut grid, &mut SimRng::new(4)).unwrap();
        assert!(pop.iter().all(|a| a.isolated && a.mobility_type == MobilityType::Isolated));
    }

    #[test]
    fn earmarks_applied() {
        let cfg = config(12);
        let mut grid = MultiGrid::new(10, 10).unwrap();
        let pop = PopulationBuilder::new(&cfg)
            .earmarks(|id, _| id.0 % 3)
            .build(&mut grid, &mut SimRng::new(5))
            .unwrap();
        for a in pop.iter() {
            assert_eq!(a.earmark, a.id.0 % 3);
        }
    }

    #[test]
    fn grid_size_mismatch_rejected() {
        let cfg = config(5);
        let mut grid = MultiGrid::new(4, 4).unwrap();
        let err = PopulationBuilder::new(&cfg).build(&mut grid, &mut SimRng::new(6)).unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }
}

// ── Susceptible branch ────────────────────────────────────────────────────────

#[cfg(test)]
mod contagion {
    use epi_core::{AgentId, SimRng, Stage};
    use epi_grid::{MultiGrid, Position};

    use super::{contagious, params, world};
    use crate::{Agent, ContactTrace, step_agent};

    fn susceptible(id: u32, pos: Position) -> Agent {
        let mut a = Agent::new(AgentId(id), pos);
        a.prob_contagion = 1.0;
        a.curr_dwelling = 10;
        a
    }

    #[test]
    fn certain_contagion_infects_and_traces() {
        let p = Position::new(1, 1);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(&mut grid, vec![contagious(0, p), susceptible(1, p)]);
        step_agent(AgentId(1), &mut pop, &mut grid, &params(), 7, &mut SimRng::new(1)).unwrap();

        let a = pop.get(AgentId(1)).unwrap();
        assert_eq!(a.stage, Stage::Infected);
        assert_eq!(
            a.contacts(),
            &[ContactTrace { with: AgentId(0), at: p, step: 7, until: 7 }]
        );
        // Dwell was positive, so it stayed and counted down.
        assert_eq!(a.pos, p);
        assert_eq!(a.curr_dwelling, 9);
    }

    #[test]
    fn stationary_exposure_is_one_trace() {
        let p = Position::new(1, 1);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut me = susceptible(1, p);
        me.isolated = true;
        let mut pop = world(&mut grid, vec![contagious(0, p), me]);
        let mut rng = SimRng::new(1);
        for step in 0..500 {
            step_agent(AgentId(1), &mut pop, &mut grid, &params(), step, &mut rng).unwrap();
        }

        let a = pop.get(AgentId(1)).unwrap();
        assert_eq!(a.stage, Stage::Susceptible);
        assert_eq!(
            a.contacts(),
            &[ContactTrace { with: AgentId(0), at: p, step: 0, until: 499 }]
        );
    }

    #[test]
    fn interrupted_exposure_starts_new_trace() {
        let p = Position::new(1, 1);
        let mut a = Agent::new(AgentId(0), p);
        a.record_contact(AgentId(1), p, 3);
        a.record_contact(AgentId(1), p, 4);
        // Gap, another source, another cell: each starts a new trace.
        a.record_contact(AgentId(1), p, 6);
        a.record_contact(AgentId(2), p, 7);
        a.record_contact(AgentId(2), Position::new(0, 0), 8);

        let spans: Vec<_> = a.contacts().iter().map(|t| (t.with.0, t.step, t.until)).collect();
        assert_eq!(spans, [(1, 3, 4), (1, 6, 6), (2, 7, 7), (2, 8, 8)]);
    }

    #[test]
    fn first_contagious_cellmate_wins() {
        let p = Position::new(1, 1);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(
            &mut grid,
            vec![susceptible(0, p), contagious(1, p), contagious(2, p)],
        );
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();
        let traces = pop.get(AgentId(0)).unwrap().contacts();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].with, AgentId(1));
    }

    #[test]
    fn no_contagion_without_contagious_cellmate() {
        let p = Position::new(1, 1);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(&mut grid, vec![susceptible(0, p), susceptible(1, p)]);
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();
        let a = pop.get(AgentId(0)).unwrap();
        assert_eq!(a.stage, Stage::Susceptible);
        assert!(a.contacts().is_empty());
    }

    #[test]
    fn contagious_neighbour_cell_does_not_count() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(
            &mut grid,
            vec![susceptible(0, Position::new(0, 0)), contagious(1, Position::new(1, 0))],
        );
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();
        assert_eq!(pop.get(AgentId(0)).unwrap().stage, Stage::Susceptible);
    }

    #[test]
    fn effective_isolation_blocks_exposure() {
        let p = Position::new(1, 1);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut me = susceptible(1, p);
        me.isolated = true;
        me.curr_dwelling = 0;
        let mut pop = world(&mut grid, vec![contagious(0, p), me]);
        step_agent(AgentId(1), &mut pop, &mut grid, &params(), 3, &mut SimRng::new(1)).unwrap();

        let a = pop.get(AgentId(1)).unwrap();
        assert_eq!(a.stage, Stage::Susceptible);
        assert!(!a.isolated_but_inefficient);
        // The trace is recorded before the isolation trial.
        assert_eq!(a.contacts().len(), 1);
        // Isolated agents never move, even with no dwell left.
        assert_eq!(a.pos, p);
        assert_eq!(a.curr_dwelling, 0);
    }

    #[test]
    fn failed_isolation_is_flagged() {
        let p = Position::new(1, 1);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut me = susceptible(1, p);
        me.isolated = true;
        let mut pop = world(&mut grid, vec![contagious(0, p), me]);
        let mut prm = params();
        prm.prob_isolation_effective = 0.0;
        step_agent(AgentId(1), &mut pop, &mut grid, &prm, 0, &mut SimRng::new(1)).unwrap();

        let a = pop.get(AgentId(1)).unwrap();
        assert!(a.isolated_but_inefficient);
        assert_eq!(a.stage, Stage::Infected);
    }

    #[test]
    fn inbound_traveller_runs_infected_update() {
        let p = Position::new(0, 0);
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut me = susceptible(0, p);
        me.incubation_time = 5;
        me.recovery_time = 5;
        let mut pop = world(&mut grid, vec![me]);
        let mut prm = params();
        prm.rate_inbound = 1.0;
        step_agent(AgentId(0), &mut pop, &mut grid, &prm, 0, &mut SimRng::new(1)).unwrap();

        let a = pop.get(AgentId(0)).unwrap();
        assert_eq!(a.stage, Stage::Infected);
        assert_eq!(a.curr_recovery, 1);
        assert!(a.contacts().is_empty());
    }
}

// ── Disease course ────────────────────────────────────────────────────────────

#[cfg(test)]
mod course {
    use epi_core::{AgentId, SimRng, Stage};
    use epi_grid::{MultiGrid, Position};

    use super::{params, world};
    use crate::{Agent, step_agent};

    fn patient(stage: Stage, incubation: u32, recovery: u32) -> Agent {
        let mut a = Agent::new(AgentId(0), Position::new(1, 1));
        a.stage = stage;
        a.incubation_time = incubation;
        a.recovery_time = recovery;
        a
    }

    #[test]
    fn infected_recovers_after_full_course() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(&mut grid, vec![patient(Stage::Infected, 1, 1)]);
        let mut rng = SimRng::new(1);

        for step in 0..2 {
            step_agent(AgentId(0), &mut pop, &mut grid, &params(), step, &mut rng).unwrap();
            assert_eq!(pop.get(AgentId(0)).unwrap().stage, Stage::Infected);
        }
        assert_eq!(pop.get(AgentId(0)).unwrap().curr_recovery, 2);

        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 2, &mut rng).unwrap();
        let a = pop.get(AgentId(0)).unwrap();
        assert_eq!(a.stage, Stage::Recovered);
        // Infected agents stay put.
        assert_eq!(a.pos, Position::new(1, 1));
    }

    #[test]
    fn certain_severity_escalates() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut a = patient(Stage::Infected, 10, 10);
        a.severity_value = 1.0;
        let mut pop = world(&mut grid, vec![a]);
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();
        assert_eq!(pop.get(AgentId(0)).unwrap().stage, Stage::Severe);
    }

    #[test]
    fn certain_mortality_kills_severe() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut a = patient(Stage::Severe, 10, 10);
        a.mortality_value = 1.0;
        let mut pop = world(&mut grid, vec![a]);
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();
        assert_eq!(pop.get(AgentId(0)).unwrap().stage, Stage::Deceased);
    }

    #[test]
    fn severe_recovers_when_course_ends() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut a = patient(Stage::Severe, 1, 1);
        a.curr_recovery = 2;
        let mut pop = world(&mut grid, vec![a]);
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();
        assert_eq!(pop.get(AgentId(0)).unwrap().stage, Stage::Recovered);
    }

    #[test]
    fn deceased_is_inert() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(&mut grid, vec![patient(Stage::Deceased, 1, 1)]);
        let mut rng = SimRng::new(1);
        for step in 0..50 {
            step_agent(AgentId(0), &mut pop, &mut grid, &params(), step, &mut rng).unwrap();
        }
        let a = pop.get(AgentId(0)).unwrap();
        assert_eq!(a.stage, Stage::Deceased);
        assert_eq!(a.pos, Position::new(1, 1));
    }

    #[test]
    fn recovered_resets_and_moves() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut a = patient(Stage::Recovered, 1, 1);
        a.curr_recovery = 4;
        let mut pop = world(&mut grid, vec![a]);
        step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1)).unwrap();

        let a = pop.get(AgentId(0)).unwrap();
        assert_eq!(a.curr_recovery, 0);
        assert_ne!(a.pos, Position::new(1, 1));
        assert!(grid.are_neighbors(Position::new(1, 1), a.pos));
        assert_eq!(grid.position_of(AgentId(0)), Some(a.pos));
    }
}

// ── Mobility ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mobility {
    use epi_core::{AgentId, SimRng};
    use epi_grid::{MultiGrid, Position};

    use super::{params, world};
    use crate::{Agent, AgentError, step_agent};

    #[test]
    fn moves_land_on_moore_neighbours() {
        let mut grid = MultiGrid::new(5, 5).unwrap();
        let mut pop = world(&mut grid, vec![Agent::new(AgentId(0), Position::new(0, 0))]);
        let mut rng = SimRng::new(21);
        let mut prm = params();
        prm.avg_dwell = 0.0;

        let mut prev = Position::new(0, 0);
        for step in 0..200 {
            step_agent(AgentId(0), &mut pop, &mut grid, &prm, step, &mut rng).unwrap();
            let now = pop.get(AgentId(0)).unwrap().pos;
            assert!(grid.are_neighbors(prev, now), "{prev} -> {now}");
            assert_eq!(grid.position_of(AgentId(0)), Some(now));
            prev = now;
        }
    }

    #[test]
    fn single_cell_grid_stays() {
        let mut grid = MultiGrid::new(1, 1).unwrap();
        let mut pop = world(&mut grid, vec![Agent::new(AgentId(0), Position::new(0, 0))]);
        let mut rng = SimRng::new(2);
        for step in 0..10 {
            step_agent(AgentId(0), &mut pop, &mut grid, &params(), step, &mut rng).unwrap();
        }
        assert_eq!(pop.get(AgentId(0)).unwrap().pos, Position::new(0, 0));
    }

    #[test]
    fn desynced_position_is_an_error() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(&mut grid, vec![Agent::new(AgentId(0), Position::new(0, 0))]);
        pop.get_mut(AgentId(0)).unwrap().pos = Position::new(2, 2);
        let err = step_agent(AgentId(0), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1))
            .unwrap_err();
        assert!(matches!(err, AgentError::PositionMismatch { .. }));
    }

    #[test]
    fn unknown_agent_is_an_error() {
        let mut grid = MultiGrid::new(3, 3).unwrap();
        let mut pop = world(&mut grid, vec![]);
        let err = step_agent(AgentId(5), &mut pop, &mut grid, &params(), 0, &mut SimRng::new(1))
            .unwrap_err();
        assert!(matches!(err, AgentError::UnknownAgent(AgentId(5))));
    }
}
