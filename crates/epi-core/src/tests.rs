//! Unit tests for epi-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod stage {
    use crate::{MobilityType, Stage};

    #[test]
    fn contagious_stages() {
        assert!(Stage::Infected.is_contagious());
        assert!(Stage::Severe.is_contagious());
        assert!(!Stage::Susceptible.is_contagious());
        assert!(!Stage::Recovered.is_contagious());
        assert!(!Stage::Deceased.is_contagious());
    }

    #[test]
    fn terminal_stages() {
        assert!(Stage::Recovered.is_terminal());
        assert!(Stage::Deceased.is_terminal());
        assert!(!Stage::Severe.is_terminal());
    }

    #[test]
    fn ordinals_match_all() {
        for (i, s) in Stage::ALL.iter().enumerate() {
            assert_eq!(s.ordinal(), i);
        }
    }

    #[test]
    fn display_and_color() {
        assert_eq!(Stage::Susceptible.to_string(), "susceptible");
        assert_eq!(Stage::Deceased.color(), "black");
        assert_eq!(MobilityType::LocalOnly.to_string(), "local_only");
    }
}

#[cfg(test)]
mod time {
    use crate::StepClock;

    #[test]
    fn day_boundaries() {
        let mut clock = StepClock::new(4);
        assert!(clock.is_day_start());
        clock.advance();
        assert!(!clock.is_day_start());
        for _ in 0..3 {
            clock.advance();
        }
        assert_eq!(clock.current(), 4);
        assert_eq!(clock.day(), 1);
        assert!(clock.is_day_start());
    }

    #[test]
    fn zero_steps_per_day_is_clamped() {
        let clock = StepClock::new(0);
        assert_eq!(clock.steps_per_day(), 1);
        assert_eq!(clock.steps_for_days(3), 3);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(!rng.gen_bool(f64::NAN));
    }

    #[test]
    fn poisson_zero_mean_is_zero() {
        let mut rng = SimRng::new(3);
        assert_eq!(rng.poisson(0.0), 0);
        assert_eq!(rng.poisson(-2.0), 0);
    }

    #[test]
    fn poisson_mean_is_close() {
        let mut rng = SimRng::new(9);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| rng.poisson(5.0) as u64).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 5.0).abs() < 0.1, "sample mean {mean}");
    }

    #[test]
    fn sample_indices_distinct_and_capped() {
        let mut rng = SimRng::new(1);
        let mut picked = rng.sample_indices(10, 4);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|&i| i < 10));
        assert_eq!(rng.sample_indices(3, 10).len(), 3);
    }
}

#[cfg(test)]
mod config {
    use std::io::Cursor;

    use crate::{EpiError, ModelConfig, ScenarioFile};

    const SCENARIO: &str = r#"{
        "description": "test",
        "prepared-by": "unit",
        "date": "2021-01-01",
        "model": {
            "epidemiology": {
                "prop_initial_infected": 0.01,
                "avg_incubation_time": 5,
                "avg_recovery_time": 15,
                "mortality_rate": 0.13,
                "prob_contagion": 0.03,
                "avg_dwell": 4
            },
            "gridworld": { "width": 10, "height": 8, "num_agents": 100 },
            "scheduler": { "kind": "graham", "partitions": 3 },
            "seed": 7
        },
        "ensemble": { "runs": 2, "days": 3 },
        "output": { "prefix": "out" }
    }"#;

    #[test]
    fn default_config_is_valid() {
        ModelConfig::default().validate().unwrap();
    }

    #[test]
    fn scenario_parses_with_defaults() {
        let s = ScenarioFile::from_reader(Cursor::new(SCENARIO)).unwrap();
        assert_eq!(s.prepared_by, "unit");
        assert_eq!(s.model.seed, 7);
        assert_eq!(s.model.scheduler.kind, "graham");
        assert_eq!(s.model.scheduler.partitions, Some(3));
        assert_eq!(s.model.config.gridworld.width, 10);
        assert_eq!(s.model.config.epidemiology.steps_per_day, 96);
        assert_eq!(s.model.config.epidemiology.prob_isolation_effective, 1.0);
        assert_eq!(s.ensemble.replicates, vec![0]);
        assert_eq!(s.output.prefix, "out");
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let broken = SCENARIO.replace("\"prob_contagion\": 0.03,", "");
        let err = ScenarioFile::from_reader(Cursor::new(broken)).unwrap_err();
        assert!(matches!(err, EpiError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let mut cfg = ModelConfig::default();
        cfg.epidemiology.prob_contagion = 1.5;
        assert!(matches!(cfg.validate(), Err(EpiError::Config(_))));
    }

    #[test]
    fn zero_grid_rejected() {
        let mut cfg = ModelConfig::default();
        cfg.gridworld.width = 0;
        assert!(matches!(cfg.validate(), Err(EpiError::Config(_))));
    }

    #[test]
    fn derived_step_means() {
        let cfg = ModelConfig::default();
        assert_eq!(cfg.incubation_mean_steps(), 480.0);
        assert_eq!(cfg.recovery_mean_steps(), 1440.0);
    }

    #[test]
    fn initial_infected_rounds() {
        let mut cfg = ModelConfig::default();
        cfg.gridworld.num_agents = 100;
        cfg.epidemiology.prop_initial_infected = 0.01;
        assert_eq!(cfg.initial_infected_count(), 1);
        cfg.epidemiology.prop_initial_infected = 0.29;
        assert_eq!(cfg.initial_infected_count(), 29);
    }

    #[test]
    fn scenario_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScenarioFile::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, EpiError::Io(_)));
    }
}
