//! WGIDA CLI - dashboard backend for global-iceberg detection experiments.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use warp::Filter;

use wgida_cli::config::Config;
use wgida_core::{overall_detected, overall_sliding, Algorithm, DatasetStore, Family, FilterEngine};
use wgida_server::{dashboard_routes, handle_rejection, shared_dashboard};

#[derive(Parser)]
#[command(name = "wgida")]
#[command(version)]
#[command(about = "WGIDA - global iceberg detection analysis dashboard", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, global = true, env = "WGIDA_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard API
    Serve {
        /// Dataset of simulation runs (JSON array)
        #[arg(short, long, env = "WGIDA_DATASET")]
        dataset: Option<PathBuf>,

        /// Server port
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (default: 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print overall precision/recall per algorithm
    Summary {
        /// Dataset of simulation runs (JSON array)
        #[arg(short, long, env = "WGIDA_DATASET")]
        dataset: PathBuf,
    },

    /// Validate a dataset file and report its parameter sweep
    Check {
        /// Dataset of simulation runs (JSON array)
        #[arg(short, long, env = "WGIDA_DATASET")]
        dataset: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => Config::default(),
    };

    init_tracing(cli.verbose, &config)?;

    match cli.command {
        Commands::Serve {
            dataset,
            port,
            bind,
        } => serve(dataset, port, bind, &config).await,
        Commands::Summary { dataset } => summary(&dataset),
        Commands::Check { dataset } => check(&dataset),
    }
}

fn init_tracing(verbose: u8, config: &Config) -> Result<()> {
    let level = match verbose {
        0 => config
            .logging
            .level
            .parse::<Level>()
            .unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;
    Ok(())
}

/// Load the dataset once. A failed load is reported and leaves the caller
/// with an empty store; there is no retry.
fn load_or_empty(path: Option<PathBuf>) -> DatasetStore {
    match path {
        Some(path) => match DatasetStore::load_file(&path) {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, path = %path.display(), "dataset load failed; serving empty store");
                DatasetStore::default()
            }
        },
        None => {
            warn!("no dataset configured; serving empty store");
            DatasetStore::default()
        }
    }
}

async fn serve(
    dataset: Option<PathBuf>,
    port: Option<u16>,
    bind: Option<String>,
    config: &Config,
) -> Result<()> {
    let dataset = dataset.or_else(|| config.dataset.clone());
    let store = load_or_empty(dataset);

    let dashboard = shared_dashboard(store);
    {
        // Install the everything-selected snapshot so charts answer
        // immediately; an empty store stays snapshot-less until a submit.
        let mut state = dashboard.write().await;
        if !state.store().is_empty() {
            state.submit();
        }
    }

    let port = port.unwrap_or(config.server.port);
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {bind}:{port}"))?;

    let routes = dashboard_routes(dashboard).recover(handle_rejection);
    info!(%addr, "dashboard API listening");
    warp::serve(routes).run(addr).await;
    Ok(())
}

fn summary(dataset: &Path) -> Result<()> {
    let store = DatasetStore::load_file(dataset)
        .with_context(|| format!("loading dataset {}", dataset.display()))?;
    let snapshot = FilterEngine::new(store).submit();

    let sliding = overall_sliding(&snapshot.runs);
    let detected = overall_detected(&snapshot.runs);

    println!("{} runs", snapshot.runs.len());
    println!();
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10}",
        "algorithm", "win P", "win R", "sim P", "sim R"
    );
    for algorithm in Algorithm::ALL {
        let win = sliding.get(algorithm);
        let sim = detected.get(algorithm);
        println!(
            "{:<10} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            algorithm.label(),
            win.precision,
            win.recall,
            sim.precision,
            sim.recall
        );
    }
    Ok(())
}

fn check(dataset: &Path) -> Result<()> {
    let store = DatasetStore::load_file(dataset)
        .with_context(|| format!("loading dataset {}", dataset.display()))?;

    println!("{}: {} runs", dataset.display(), store.len());
    for family in Family::ALL {
        let values = store.distinct_values(family);
        let labels: Vec<&str> = values.iter().map(|v| v.label.as_str()).collect();
        println!("  {:<10} {:>3} values: {}", family.name(), values.len(), labels.join(", "));
    }
    Ok(())
}
