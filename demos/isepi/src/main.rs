//! isepi — command-line runner for the epidemic simulator.
//!
//! ```text
//! isepi run scenarios/baseline.json             # one model, per-step table
//! isepi ensemble scenarios/baseline.json        # runs x replicates, one table
//! isepi --log-level debug run scenarios/baseline.json --days 3
//! ```
//!
//! Tables land in `--out-dir` (default `output/`) named after the scenario's
//! `output.prefix`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info, warn};
use log4rs::Config;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use epi_core::{ScenarioFile, Stage};
use epi_output::{CsvWriter, EnsembleRecord, OutputWriter, SimOutputObserver};
use epi_sim::{EnsembleSpec, ModelBuilder, run_ensemble};

// ── Constants ─────────────────────────────────────────────────────────────────

const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S)} {h({l})} {t} - {m}{n}";

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "isepi")]
#[command(about = "Spatial epidemic agent-based simulation")]
struct Cli {
    /// off, error, warn, info, debug, or trace
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Directory for output tables; created if missing
    #[arg(long, global = true, default_value = "output")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one model and write its per-step metrics
    Run {
        scenario: PathBuf,
        /// Days to simulate; defaults to `ensemble.days`
        #[arg(long)]
        days: Option<u64>,
        /// Overrides `model.seed`
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the scenario's ensemble and write the combined table
    Ensemble { scenario: PathBuf },
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| anyhow!("unknown log level {level:?}"))?;
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn load(path: &Path) -> Result<ScenarioFile> {
    let scenario = ScenarioFile::from_path(path)
        .with_context(|| format!("loading scenario {}", path.display()))?;

    println!("Scenario: {}", scenario.description);
    if !scenario.prepared_by.is_empty() {
        println!("Prepared by {} on {}", scenario.prepared_by, scenario.date);
    }
    println!();
    println!("Parametrization complete:");
    println!("{}", serde_json::to_string_pretty(&scenario.model)?);
    println!();
    Ok(scenario)
}

fn run_single(scenario: &ScenarioFile, out_dir: &Path, days: Option<u64>, seed: Option<u64>) -> Result<()> {
    let mut builder = ModelBuilder::from_section(&scenario.model)?;
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let mut model = builder.build()?;
    let days = days.unwrap_or(scenario.ensemble.days);

    let writer = CsvWriter::steps(out_dir, &scenario.output.prefix)?;
    let steps_path = writer.steps_path();
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    model.run_days(days, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  {} : {} rows", steps_path.display(), obs.rows_written());
    println!();

    // Final stage distribution, with the colour each stage is drawn in.
    let counts = model.population().stage_counts();
    println!("{:<12} {:>8} {:<8}", "Stage", "Agents", "Colour");
    println!("{}", "-".repeat(30));
    for stage in Stage::ALL {
        println!(
            "{:<12} {:>8} {:<8}",
            stage.as_str(),
            counts[stage.ordinal()],
            stage.color()
        );
    }
    Ok(())
}

fn run_batch(scenario: &ScenarioFile, out_dir: &Path) -> Result<()> {
    let spec = EnsembleSpec::from_scenario(scenario)?;
    println!(
        "Executing an ensemble of size {} using {} steps...",
        spec.run_count(),
        spec.max_steps
    );

    let t0 = Instant::now();
    let rows = run_ensemble(&spec)?;
    info!("ensemble finished in {:.3} s", t0.elapsed().as_secs_f64());

    println!("Saving results to file...");
    let records: Vec<EnsembleRecord> = rows.iter().map(EnsembleRecord::from).collect();
    let mut writer = CsvWriter::ensemble(out_dir, &scenario.output.prefix)?;
    writer.write_ensemble(&records)?;
    writer.finish()?;
    println!("  {} : {} rows", writer.ensemble_path().display(), records.len());

    #[cfg(feature = "sqlite")]
    {
        let mut db = epi_output::SqliteWriter::new(out_dir, &scenario.output.prefix)?;
        db.write_ensemble(&records)?;
        db.finish()?;
    }

    println!("Simulation completed without errors.");
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    match cli.command {
        Commands::Run { scenario, days, seed } => {
            let scenario = load(&scenario)?;
            run_single(&scenario, &cli.out_dir, days, seed)
        }
        Commands::Ensemble { scenario } => {
            let scenario = load(&scenario)?;
            run_batch(&scenario, &cli.out_dir)
        }
    }
}
