use std::path::PathBuf;

use clap::Parser;

use euchre_bench::config::{ResolvedOutputs, SimulationConfig};
use euchre_bench::logging::init_logging;
use euchre_bench::runner::SimulationRunner;

/// Self-play harness for the euchre rule engine.
#[derive(Debug, Parser)]
#[command(
    name = "euchre-bench",
    author,
    version,
    about = "Deterministic euchre self-play harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    count: Option<usize>,

    /// Override the master RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the points needed to win a game.
    #[arg(long, value_name = "POINTS")]
    target_score: Option<u32>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(count) = cli.count {
        config.games.count = count;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(target_score) = cli.target_score {
        config.games.game.target_score = target_score;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let count = config.games.count;
    let target = config.games.game.target_score;

    println!(
        "Loaded configuration '{run_id}': {count} game{} to {target} points",
        if count == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Run complete for '{run_id}': {} games, {} rounds → {} rows at {}",
        summary.games_played,
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
