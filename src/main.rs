//! # Stimgrid Main Entry Point
//!
//! Reads the study configuration, generates every grid from a seeded random
//! stream, and writes the output document. Runs with no arguments using the
//! defaults from [`stimgrid::defaults`].

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use stimgrid::{
    defaults, generation::utils, write_records, BatchRunner, StimgridResult, StudyConfig,
};

/// Command line arguments for the stimulus generator.
#[derive(Parser, Debug)]
#[command(name = "stimgrid")]
#[command(about = "Generates visual search stimulus grids for dual-task studies")]
#[command(version)]
struct Args {
    /// Study configuration file
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    config: PathBuf,

    /// Output file for the generated grids
    #[arg(short, long, default_value = defaults::OUTPUT_FILE)]
    output: PathBuf,

    /// Random seed for grid generation
    #[arg(short, long, default_value_t = defaults::SEED)]
    seed: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Stimgrid v{}", stimgrid::VERSION);

    if let Err(e) = run(&args) {
        error!("Generation aborted: {}", e);
        process::exit(1);
    }
}

/// Initializes the logging system, letting `RUST_LOG` override the level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

/// Loads the configuration, generates the batch, and writes it out.
fn run(args: &Args) -> StimgridResult<()> {
    info!("Loading configuration from {}", args.config.display());
    let config = StudyConfig::load(&args.config)?;

    let runner = BatchRunner::new(config)?;

    info!("Generating grids with seed: {}", args.seed);
    let mut rng = utils::create_rng(args.seed);
    let records = runner.run(&mut rng)?;

    write_records(&args.output, &records)
}
