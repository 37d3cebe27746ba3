//! Sweep Configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `sortbench.toml` discovered by walking up from the current directory,
//! then CLI flags. The merged result is validated once at startup and
//! immutable afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use sortbench_report::BenchmarkTarget;

/// Default minimum array size.
pub const DEFAULT_MIN_SIZE: u64 = 1000;
/// Default maximum array size.
pub const DEFAULT_MAX_SIZE: u64 = 1_000_000;
/// Default step between benchmarked sizes.
pub const DEFAULT_STEP: u64 = 100_000;
/// Default repetitions per size.
pub const DEFAULT_REPEATS: u32 = 3;
/// Default directory holding the sort and generator executables.
pub const DEFAULT_BIN_DIR: &str = "./bin";
/// Default directory for generated input files.
pub const DEFAULT_INPUT_DIR: &str = "input";
/// Default directory for benchmark reports.
pub const DEFAULT_RESULTS_DIR: &str = "benchmark_results";

/// Name of the sort executables and the generator inside the bin directory.
const HEAP_SORT_BIN: &str = "heapsort";
const QUICK_SORT_BIN: &str = "quicksort";
const GENERATOR_BIN: &str = "genrand_f";

/// Configuration validation failures. All are fatal before any filesystem
/// or process activity begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A size or repeat parameter was zero.
    #[error("all size and repeat parameters must be positive")]
    NonPositive,

    /// The size range is inverted.
    #[error("minimum size must be less than or equal to maximum size")]
    MinAboveMax,

    /// The algorithm name matched none of the known targets.
    #[error("unknown algorithm '{0}' (expected 'heap', 'quick', or 'both')")]
    UnknownAlgorithm(String),
}

/// Validated, immutable configuration for one sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Smallest array size benchmarked.
    pub min_size: u64,
    /// Largest array size benchmarked (inclusive).
    pub max_size: u64,
    /// Step between consecutive sizes.
    pub step: u64,
    /// Timing trials per (algorithm, size) pair.
    pub repeats: u32,
    /// Which executables participate.
    pub target: BenchmarkTarget,
    /// Directory holding the sort and generator executables.
    pub bin_dir: PathBuf,
    /// Directory the generator writes input files into.
    pub input_dir: PathBuf,
    /// Directory reports are written into.
    pub results_dir: PathBuf,
}

impl SweepConfig {
    /// Check the startup invariants. Must pass before any subprocess is
    /// spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size == 0 || self.max_size == 0 || self.step == 0 || self.repeats == 0 {
            return Err(ConfigError::NonPositive);
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::MinAboveMax);
        }
        Ok(())
    }

    /// Path of the heapsort executable.
    pub fn heap_sort_path(&self) -> PathBuf {
        self.bin_dir.join(HEAP_SORT_BIN)
    }

    /// Path of the quicksort executable.
    pub fn quick_sort_path(&self) -> PathBuf {
        self.bin_dir.join(QUICK_SORT_BIN)
    }

    /// Path of the random-input generator executable.
    pub fn generator_path(&self) -> PathBuf {
        self.bin_dir.join(GENERATOR_BIN)
    }

    /// Sizes visited by the sweep, `min_size..=max_size` stepping by `step`.
    pub fn sizes(&self) -> impl Iterator<Item = u64> {
        (self.min_size..=self.max_size).step_by(self.step as usize)
    }

    /// Number of sizes the sweep will visit.
    pub fn size_count(&self) -> u64 {
        (self.max_size - self.min_size) / self.step + 1
    }
}

/// On-disk configuration (`sortbench.toml`). Every field is optional; CLI
/// flags override whatever is set here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// `[sweep]` section.
    #[serde(default)]
    pub sweep: SweepSection,
    /// `[paths]` section.
    #[serde(default)]
    pub paths: PathsSection,
}

/// `[sweep]` section of `sortbench.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweepSection {
    /// Minimum array size.
    pub min: Option<u64>,
    /// Maximum array size.
    pub max: Option<u64>,
    /// Step between sizes.
    pub step: Option<u64>,
    /// Repetitions per size.
    pub repeats: Option<u32>,
    /// Algorithm selection: "heap", "quick", or "both".
    pub algorithm: Option<String>,
}

/// `[paths]` section of `sortbench.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// Executable directory.
    pub bin_dir: Option<PathBuf>,
    /// Input-file directory.
    pub input_dir: Option<PathBuf>,
    /// Report directory.
    pub results_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load `sortbench.toml` by walking up from the
    /// current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("sortbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
