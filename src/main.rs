//! CLI driver: generate data, train, classify and evaluate

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use proxy_search::config::DynIndex;
use proxy_search::persistence::dataset::{load_dataset, save_dataset};
use proxy_search::persistence::snapshot::{SnapshotManager, TrainedSnapshot};
use proxy_search::persistence::synthetic;
use proxy_search::{Classifier, Sample, SearchConfig, Sequence, Strategy};

#[derive(Parser)]
#[command(name = "proxysearch")]
#[command(about = "Proxy-key nearest-candidate search for sample classification", long_about = None)]
struct Cli {
    /// JSON configuration file; command-line flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search strategy
    #[arg(long, value_enum, global = true)]
    strategy: Option<StrategyArg>,

    /// Refinement window width for the proxy strategy (0 checks the anchor only)
    #[arg(short = 'k', long, global = true)]
    window: Option<usize>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum StrategyArg {
    Linear,
    Parallel,
    Proxy,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Linear => Strategy::Linear,
            StrategyArg::Parallel => Strategy::Parallel,
            StrategyArg::Proxy => Strategy::Proxy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic labeled dataset
    Generate {
        /// Output JSON file
        output: PathBuf,
        /// Number of samples
        #[arg(short, long, default_value = "1000")]
        count: usize,
        /// Grid side length
        #[arg(long, default_value = "28")]
        side: usize,
        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Train on one dataset and report accuracy on another
    Evaluate {
        /// Labeled test dataset
        test: PathBuf,
        /// Labeled training dataset
        #[arg(long, conflicts_with = "snapshot", required_unless_present = "snapshot")]
        train: Option<PathBuf>,
        /// Snapshot directory to train from instead of a dataset
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Only classify the first N test samples
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Classify a single sample given as "<rows>x<cols>:<p0>,<p1>,..."
    Classify {
        /// Sample to classify
        query: String,
        /// Labeled training dataset
        #[arg(long)]
        train: PathBuf,
    },
    /// Sort a training set by proxy key and store it as a snapshot
    Snapshot {
        /// Labeled training dataset
        train: PathBuf,
        /// Snapshot directory
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.into();
    }
    if let Some(window) = cli.window {
        config.window = window;
    }
    Ok(config)
}

fn load(path: &Path) -> Result<Vec<Sample>> {
    load_dataset(path).with_context(|| format!("reading dataset {}", path.display()))
}

fn trained_classifier(config: &SearchConfig, training: Sequence<Sample>) -> Result<Classifier<DynIndex>> {
    let mut classifier = Classifier::with_index(config.build_index());
    classifier.train_sequence(training)?;
    Ok(classifier)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Generate {
            output,
            count,
            side,
            seed,
        } => {
            let samples = synthetic::generate(count, side, seed)?;
            save_dataset(&output, &samples)
                .with_context(|| format!("writing dataset {}", output.display()))?;
            println!("Wrote {} samples to {}", samples.len(), output.display());
        }
        Commands::Evaluate {
            test,
            train,
            snapshot,
            limit,
        } => {
            let training = match (train, snapshot) {
                (Some(path), _) => Sequence::from_vec(load(&path)?),
                (None, Some(dir)) => {
                    let mgr = SnapshotManager::new(&dir)?;
                    let snapshot = mgr
                        .load()?
                        .with_context(|| format!("no snapshot in {}", dir.display()))?;
                    snapshot.into_sequence()?
                }
                (None, None) => anyhow::bail!("either --train or --snapshot is required"),
            };
            let classifier = trained_classifier(&config, training)?;

            let mut queries = load(&test)?;
            if let Some(limit) = limit {
                queries.truncate(limit);
            }
            let evaluation = classifier.evaluate(&queries)?;

            println!("Strategy:  {}", evaluation.strategy);
            println!("Queries:   {}", evaluation.total);
            println!(
                "Accuracy:  {:.2}% ({} / {})",
                evaluation.accuracy() * 100.0,
                evaluation.metrics.correct(),
                evaluation.metrics.correct() + evaluation.metrics.incorrect()
            );
            println!(
                "Latency:   avg {:.1}us, p50 {:.1}us, p99 {:.1}us",
                evaluation.metrics.avg_query_latency_us(),
                evaluation.metrics.percentile_query_latency_us(50.0),
                evaluation.metrics.percentile_query_latency_us(99.0)
            );
            for (label, stats) in evaluation.metrics.per_label() {
                println!(
                    "  label {}: {:.2}% ({} / {})",
                    label,
                    stats.accuracy() * 100.0,
                    stats.correct,
                    stats.total
                );
            }
        }
        Commands::Classify { query, train } => {
            let query: Sample = query.parse().context("parsing query sample")?;
            let classifier = trained_classifier(&config, Sequence::from_vec(load(&train)?))?;
            let found = classifier.classify(&query)?;
            let label = found.label().map_or_else(|| "?".to_string(), |l| l.to_string());
            println!("Predicted label: {} (intensity {})", label, found.intensity());
        }
        Commands::Snapshot { train, output } => {
            let mut training = Sequence::from_vec(load(&train)?);
            training.sort_by_proxy_key();
            let mgr = SnapshotManager::new(&output)?;
            mgr.save(&TrainedSnapshot::capture(config, &training))?;
            println!("Saved {} sorted samples to {}", training.len(), output.display());
        }
    }
    Ok(())
}
