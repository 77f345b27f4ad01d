use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use monty::consts::DEFAULT_TRIALS;
use monty::simulation::{Report, Simulation};
use monty::trial::TrialSet;

#[derive(Debug, Parser)]
#[command(
    name = "monty-hall",
    version,
    about = "Estimate the Monty Hall stay and switch win probabilities"
)]
struct Cli {
    /// Number of simulated games
    #[arg(short = 'n', long, env = "MONTY_TRIALS", default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed for reproducible trials
    #[arg(short, long, env = "MONTY_SEED")]
    seed: Option<u64>,

    /// Print the first K trials before the report
    #[arg(long, value_name = "K", default_value_t = 0, conflicts_with = "json")]
    show: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn simulation(&self) -> Simulation {
        let sim = Simulation::new(self.trials);
        match self.seed {
            Some(seed) => sim.with_seed(seed),
            None => sim,
        }
    }
}

fn print_trials(trials: &TrialSet, k: usize) {
    println!(
        "{:>6} {:>5} {:>4} {:>8} {:>8}",
        "trial", "prize", "pick", "revealed", "switched"
    );
    for (ix, trial) in trials.iter().take(k).enumerate() {
        println!(
            "{:>6} {:>5} {:>4} {:>8} {:>8}",
            ix,
            trial.prize,
            trial.pick,
            trial.revealed(),
            trial.switched()
        );
    }
    println!();
}

#[cfg(feature = "serde1")]
fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

#[cfg(not(feature = "serde1"))]
fn print_json(_report: &Report) -> Result<()> {
    anyhow::bail!("JSON output requires the `serde1` feature")
}

/// Log filter from `RUST_LOG` directives, WARN when none are given
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(&directives))
        .init();

    let cli = Cli::parse();
    let sim = cli.simulation();
    tracing::info!(trials = sim.n_trials(), seed = ?sim.seed(), "starting simulation");

    let trials = sim
        .draw_trials()
        .with_context(|| format!("cannot simulate {} trials", cli.trials))?;

    if cli.show > 0 {
        print_trials(&trials, cli.show);
    }

    let report = Report::from_trials(&trials, sim.seed())
        .context("failed to evaluate strategies")?;

    if cli.json {
        print_json(&report)?;
    } else {
        print!("{}", report);
    }

    Ok(())
}
