//! Hopfield Recall - demo front end
//!
//! Text rendering of the reference glyphs, corrupt-and-recall runs, and
//! recall-rate trials.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hopfield_recall::memory::run_trials;
use hopfield_recall::{reference_library, RecallConfig, RecallSession, ReferencePattern};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hopfield")]
#[command(about = "Associative memory over 5x5 bipolar glyphs")]
struct Cli {
    /// Path to a YAML config file (defaults to ./hopfield.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reference patterns
    Patterns,

    /// Corrupt a reference pattern and recall it
    Recall {
        /// Pattern name (x, o, plus)
        #[arg(short, long)]
        pattern: String,

        /// Add noise at the configured flip probability
        #[arg(long)]
        add_noise: bool,

        /// Add noise at this flip probability (overrides config, implies --add-noise)
        #[arg(short, long)]
        noise: Option<f64>,

        /// Cell indices to flip before recall (comma-separated)
        #[arg(long, value_delimiter = ',')]
        flip: Vec<usize>,

        /// RNG seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,

        /// Sweep cap (overrides config)
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Print the recall outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Measure how often a pattern survives k random flips
    Trial {
        /// Pattern name (x, o, plus)
        #[arg(short, long)]
        pattern: String,

        /// Distinct cells flipped per trial
        #[arg(short, long, default_value = "2")]
        flips: usize,

        /// Number of trials
        #[arg(short, long, default_value = "100")]
        trials: usize,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hopfield_recall=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = RecallConfig::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Patterns => print_patterns(&config),
        Commands::Recall {
            pattern,
            add_noise,
            noise,
            flip,
            seed,
            max_iterations,
            json,
        } => {
            let with_noise = apply_noise_override(&mut config, add_noise, noise);
            if let Some(k) = max_iterations {
                config.max_iterations = k;
            }
            run_recall(config, &pattern, with_noise, &flip, seed, json)
        }
        Commands::Trial {
            pattern,
            flips,
            trials,
            seed,
        } => run_trial(config, &pattern, flips, trials, seed),
    }
}

/// Fold `--noise` into the config. Returns whether noise is applied at all.
fn apply_noise_override(config: &mut RecallConfig, add_noise: bool, noise: Option<f64>) -> bool {
    if let Some(p) = noise {
        config.noise_probability = p;
    }
    add_noise || noise.is_some()
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn print_patterns(config: &RecallConfig) -> Result<()> {
    for p in ReferencePattern::ALL {
        let grid = hopfield_recall::to_grid(&p.vector(), config.rows, config.cols)?;
        println!("{}:\n{}\n", p.name(), grid);
    }
    Ok(())
}

fn run_recall(
    config: RecallConfig,
    pattern: &str,
    with_noise: bool,
    flips: &[usize],
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let target = ReferencePattern::from_name(pattern)?.vector();
    let mut session = RecallSession::new(config, &reference_library())?;
    session.load_pattern(&target)?;

    corrupt(&mut session, flips, with_noise, &mut make_rng(seed))?;

    let corrupted = session.grid()?;
    let outcome = session.restore()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("input:\n{}\n", corrupted);
    println!("recalled:\n{}\n", session.grid()?);
    println!(
        "{:?} after {} sweeps, {} cells differ from '{}'",
        outcome.status,
        outcome.sweeps,
        outcome.state.hamming_distance(&target),
        pattern
    );
    Ok(())
}

/// Toggle the listed cells, then add noise at the session's configured probability.
fn corrupt(
    session: &mut RecallSession,
    flips: &[usize],
    with_noise: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let cols = session.config().cols;
    for &i in flips {
        session.toggle(i / cols, i % cols)?;
    }
    if with_noise {
        session.add_noise(rng)?;
    }
    Ok(())
}

fn run_trial(
    config: RecallConfig,
    pattern: &str,
    flips: usize,
    trials: usize,
    seed: Option<u64>,
) -> Result<()> {
    let target = ReferencePattern::from_name(pattern)?.vector();
    let session = RecallSession::new(config, &reference_library())?;
    let report = run_trials(
        session.memory(),
        &target,
        flips,
        trials,
        session.config().max_iterations,
        &mut make_rng(seed),
    )?;
    println!(
        "{}: {}/{} recovered with {} flips ({:.1}%)",
        pattern,
        report.recovered,
        report.trials,
        flips,
        report.recall_rate() * 100.0
    );
    Ok(())
}
