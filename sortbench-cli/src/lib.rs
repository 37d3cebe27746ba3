#![warn(missing_docs)]
//! sortbench CLI Library
//!
//! Orchestrates benchmark sweeps over external sorting executables: parses
//! arguments, layers configuration, validates it, and drives the sweep.
//! The `sortbench` binary is a thin wrapper over [`run_with_cli`].

mod config;
mod provision;
mod sweep;

pub use config::{
    ConfigError, FileConfig, PathsSection, SweepConfig, SweepSection, DEFAULT_BIN_DIR,
    DEFAULT_INPUT_DIR, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_REPEATS, DEFAULT_RESULTS_DIR,
    DEFAULT_STEP,
};
pub use provision::{InputProvisioner, ProvisionError, ProvisionedInput};
pub use sweep::{SweepController, SweepError, SweepSummary};

use std::path::PathBuf;

use clap::Parser;

use sortbench_exec::SystemRunner;
use sortbench_report::BenchmarkTarget;

/// sortbench CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "sortbench")]
#[command(about = "Benchmark external sorting executables across a sweep of input sizes")]
pub struct Cli {
    /// Minimum array size (default: 1000)
    #[arg(long)]
    pub min: Option<u64>,

    /// Maximum array size (default: 1000000)
    #[arg(long)]
    pub max: Option<u64>,

    /// Step size between benchmarks (default: 100000)
    #[arg(long)]
    pub step: Option<u64>,

    /// Number of repetitions per size (default: 3)
    #[arg(long)]
    pub repeats: Option<u32>,

    /// Algorithm to benchmark: 'heap', 'quick', or 'both' (default: 'heap')
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Compare heapsort and quicksort (shorthand for --algorithm both)
    #[arg(long)]
    pub algorithm_compare: bool,

    /// Directory containing the sort and generator executables
    #[arg(long)]
    pub bin_dir: Option<PathBuf>,

    /// Directory for generated input files
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory for benchmark reports
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse CLI arguments and run a sweep. Entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run a sweep with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Diagnostics go to stderr so the report and the stdout summary stay
    // clean.
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("sortbench_cli=debug,sortbench_exec=debug,sortbench_report=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("sortbench_cli=info,sortbench_exec=info,sortbench_report=info")
            .with_writer(std::io::stderr)
            .init();
    }

    // Discover sortbench.toml (CLI flags override)
    let file_config = FileConfig::discover().unwrap_or_default();
    let config = build_sweep_config(&cli, &file_config)?;

    println!("Running {} Benchmarks", config.target.title());
    println!("=====================================");
    println!(
        "Size range: {} to {} (step {})",
        config.min_size, config.max_size, config.step
    );
    println!("Repetitions per size: {}\n", config.repeats);

    let controller = SweepController::new(config, SystemRunner);
    let summary = controller.run()?;

    println!(
        "\nBenchmark complete. Results saved to {}",
        summary.report_path.display()
    );
    println!("Note: The benchmark focused solely on the sorting algorithm performance,");
    println!("      excluding file I/O operations.");

    if summary.sizes_skipped > 0 {
        eprintln!(
            "Warning: {} size(s) skipped because input provisioning failed",
            summary.sizes_skipped
        );
    }
    if summary.degraded_rows > 0 {
        eprintln!(
            "Warning: {} row(s) contain no usable measurement for at least one algorithm",
            summary.degraded_rows
        );
    }

    println!("\nTo visualize the results, run:");
    println!("{}", summary.visualization_hint());

    Ok(())
}

/// Merge CLI flags over file configuration over built-in defaults, then
/// validate. No filesystem or process activity happens before this passes.
pub fn build_sweep_config(cli: &Cli, file: &FileConfig) -> Result<SweepConfig, ConfigError> {
    let config = SweepConfig {
        min_size: cli.min.or(file.sweep.min).unwrap_or(DEFAULT_MIN_SIZE),
        max_size: cli.max.or(file.sweep.max).unwrap_or(DEFAULT_MAX_SIZE),
        step: cli.step.or(file.sweep.step).unwrap_or(DEFAULT_STEP),
        repeats: cli
            .repeats
            .or(file.sweep.repeats)
            .unwrap_or(DEFAULT_REPEATS),
        target: resolve_target(cli, file)?,
        bin_dir: cli
            .bin_dir
            .clone()
            .or_else(|| file.paths.bin_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BIN_DIR)),
        input_dir: cli
            .input_dir
            .clone()
            .or_else(|| file.paths.input_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
        results_dir: cli
            .results_dir
            .clone()
            .or_else(|| file.paths.results_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR)),
    };

    config.validate()?;
    Ok(config)
}

fn resolve_target(cli: &Cli, file: &FileConfig) -> Result<BenchmarkTarget, ConfigError> {
    if cli.algorithm_compare {
        return Ok(BenchmarkTarget::Both);
    }

    match cli.algorithm.as_deref().or(file.sweep.algorithm.as_deref()) {
        None => Ok(BenchmarkTarget::HeapSort),
        Some(name) => name
            .parse()
            .map_err(|_| ConfigError::UnknownAlgorithm(name.to_string())),
    }
}
