use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use wulff_shape::coordinator::{
    Coordinator, InMemoryProvider, InputEvent, OfflineProvider, Outcome, SurfaceDataProvider,
};
use wulff_shape::lattice::LatticeParameters;
use wulff_shape::wulff::{FacetSet, WulffPolytope};
use wulff_shape::WulffError;

#[derive(Parser)]
#[command(name = "wulff-shape")]
#[command(about = "Equilibrium crystal shapes from lattice parameters and facet surface energies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Wulff shape from a JSON file with `lattice` and `facets`
    Construct {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Look up a material in a JSON materials database and build its shape
    Lookup {
        /// Materials database file path
        #[arg(short, long)]
        database: PathBuf,

        /// Material identifier
        #[arg(long)]
        id: String,
    },
    /// Feed event cycles through the coordinator, starting from the initial state
    Replay {
        /// JSON file holding a list of cycles, each a list of events
        #[arg(short, long)]
        events: PathBuf,

        /// Materials database used for lookup events
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

/// Input of the `construct` command
#[derive(Debug, Deserialize)]
struct ConstructInput {
    lattice: LatticeParameters,
    facets: FacetSet,
}

#[derive(Debug, Serialize)]
struct ShapeReport<'a> {
    volume: f64,
    total_area: f64,
    weighted_surface_energy: f64,
    anisotropy: f64,
    shape_factor: f64,
    effective_radius: f64,
    area_fractions: Vec<(String, f64)>,
    polytope: &'a WulffPolytope,
}

impl<'a> ShapeReport<'a> {
    fn new(polytope: &'a WulffPolytope) -> Self {
        Self {
            volume: polytope.volume,
            total_area: polytope.total_area,
            weighted_surface_energy: polytope.weighted_surface_energy(),
            anisotropy: polytope.anisotropy(),
            shape_factor: polytope.shape_factor(),
            effective_radius: polytope.effective_radius(),
            area_fractions: polytope
                .area_fractions()
                .into_iter()
                .map(|(miller, fraction)| (miller.to_string(), fraction))
                .collect(),
            polytope,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    info!("Starting wulff-shape v{}", wulff_shape::VERSION);

    match cli.command {
        Commands::Construct { input } => {
            info!("Constructing Wulff shape from {}", input.display());
            construct_from_file(&input)
        }
        Commands::Lookup { database, id } => {
            info!("Looking up {} in {}", id, database.display());
            lookup(&database, &id)
        }
        Commands::Replay { events, database } => {
            info!("Replaying events from {}", events.display());
            replay(&events, database.as_deref())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

fn construct_from_file(input: &Path) -> Result<ExitCode> {
    let ConstructInput { lattice, facets } = read_json(input)?;
    report(wulff_shape::wulff_shape(&lattice, &facets))
}

fn lookup(database: &Path, id: &str) -> Result<ExitCode> {
    let provider = InMemoryProvider::from_json_file(database)?;
    let data = provider.fetch(id)?;
    report(wulff_shape::wulff_shape(&data.lattice, &data.facet_set()))
}

/// Print the shape, or the geometry/lattice error with exit code 2
fn report(result: wulff_shape::Result<WulffPolytope>) -> Result<ExitCode> {
    match result {
        Ok(polytope) => {
            println!("{}", serde_json::to_string_pretty(&ShapeReport::new(&polytope))?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ (WulffError::InvalidLattice(_) | WulffError::Degenerate(_))) => {
            warn!("{e}");
            eprintln!("{e}");
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

fn replay(events: &Path, database: Option<&Path>) -> Result<ExitCode> {
    let cycles: Vec<Vec<InputEvent>> = read_json(events)?;
    match database {
        Some(path) => replay_cycles(Coordinator::new(InMemoryProvider::from_json_file(path)?), &cycles),
        None => replay_cycles(Coordinator::new(OfflineProvider), &cycles),
    }
}

fn replay_cycles<P: SurfaceDataProvider>(
    mut coordinator: Coordinator<P>,
    cycles: &[Vec<InputEvent>],
) -> Result<ExitCode> {
    let startup = coordinator.startup();
    println!("{}", serde_json::to_string(&startup)?);

    for (index, events) in cycles.iter().enumerate() {
        let output = coordinator.handle(events);
        match &output.outcome {
            Outcome::Rendered => info!("cycle {}: rendered", index + 1),
            other => warn!("cycle {}: {:?}", index + 1, other),
        }
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(ExitCode::SUCCESS)
}
