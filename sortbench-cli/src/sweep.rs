//! Sweep Controller
//!
//! Steps array sizes from min to max, provisioning a fresh input and
//! measuring each selected algorithm at every size, streaming one row per
//! size into the report.
//!
//! ```text
//! validate executables
//!       │
//!       ▼
//! ┌────────────┐   per size   ┌───────────────┐   per algorithm   ┌─────────────────┐
//! │ size loop  │ ───────────▶ │ provision     │ ────────────────▶ │ TrialAggregator │
//! └────────────┘              └───────────────┘                   └─────────────────┘
//!       │                                                                  │
//!       ▼                                                                  ▼
//!  SweepSummary ◀──────────────── ReportWriter ◀────────────────── Measurement
//! ```

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use sortbench_exec::{CommandRunner, Measurement, TrialAggregator};
use sortbench_report::{
    BenchmarkTarget, ReportError, ReportWriter, SizeMeasurement, TargetTimings,
};

use crate::config::SweepConfig;
use crate::provision::{InputProvisioner, ProvisionError};

/// Fatal sweep failures. Per-size and per-trial problems never surface
/// here; they are absorbed (logged and skipped) along the way.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A required executable was missing during pre-sweep validation. The
    /// run aborts before any report file is created.
    #[error("required executable not found: {}", .0.display())]
    MissingExecutable(PathBuf),

    /// Input provisioning failed in a way that leaves no way to continue.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// The report stream failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Outcome of a completed sweep.
#[derive(Debug)]
pub struct SweepSummary {
    /// Path of the produced report.
    pub report_path: PathBuf,
    /// Rows written to the report.
    pub rows_written: u64,
    /// Sizes skipped because provisioning failed.
    pub sizes_skipped: u64,
    /// Rows written with at least one algorithm lacking a usable
    /// measurement.
    pub degraded_rows: u64,
    /// Target the sweep ran against.
    pub target: BenchmarkTarget,
}

impl SweepSummary {
    /// Command line for the downstream visualization tooling.
    pub fn visualization_hint(&self) -> String {
        match self.target {
            BenchmarkTarget::Both => format!(
                "python3 visualize_benchmark.py --compare {}",
                self.report_path.display()
            ),
            _ => format!(
                "python3 visualize_benchmark.py {}",
                self.report_path.display()
            ),
        }
    }
}

/// Drives one full benchmark sweep.
pub struct SweepController<R> {
    config: SweepConfig,
    runner: R,
}

impl<R: CommandRunner + Clone> SweepController<R> {
    /// Create a controller for a validated configuration.
    pub fn new(config: SweepConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Validate required executables, then run the full size sweep.
    pub fn run(&self) -> Result<SweepSummary, SweepError> {
        self.validate_executables()?;

        let provisioner = InputProvisioner::new(
            self.runner.clone(),
            self.config.generator_path(),
            self.config.input_dir.clone(),
        );
        let aggregator = TrialAggregator::new(self.runner.clone(), self.config.repeats);

        let mut writer = ReportWriter::create(
            &self.config.results_dir,
            self.config.target,
            self.config.min_size,
            self.config.max_size,
        )?;

        let pb = ProgressBar::new(self.config.size_count());
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut sizes_skipped = 0u64;
        let mut degraded_rows = 0u64;

        for size in self.config.sizes() {
            pb.set_message(format!("size {size}"));

            let input = match provisioner.provision(size) {
                Ok(input) => input,
                Err(err) if err.is_fatal() => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(size, "skipping size: {err}");
                    sizes_skipped += 1;
                    pb.inc(1);
                    continue;
                }
            };

            let timings = self.measure_size(&aggregator, size, &input.path);
            if timings.is_degraded() {
                degraded_rows += 1;
            }

            writer.write_row(&SizeMeasurement {
                size,
                timings,
                generation_secs: input.generation.as_secs_f64(),
            })?;
            pb.inc(1);
        }

        pb.finish_with_message("sweep complete");

        let rows_written = writer.rows_written();
        let report_path = writer.finish()?;

        Ok(SweepSummary {
            report_path,
            rows_written,
            sizes_skipped,
            degraded_rows,
            target: self.config.target,
        })
    }

    /// Ensure every executable the selected target needs (and the
    /// generator) exists before anything is spawned or created.
    fn validate_executables(&self) -> Result<(), SweepError> {
        let mut required = Vec::with_capacity(3);
        if self.config.target.includes_heap() {
            required.push(self.config.heap_sort_path());
        }
        if self.config.target.includes_quick() {
            required.push(self.config.quick_sort_path());
        }
        required.push(self.config.generator_path());

        for exe in required {
            if !exe.exists() {
                return Err(SweepError::MissingExecutable(exe));
            }
        }
        Ok(())
    }

    /// Measure every selected algorithm over one provisioned input. Each
    /// algorithm's outcome is independent; one failing does not block the
    /// other.
    fn measure_size(
        &self,
        aggregator: &TrialAggregator<R>,
        size: u64,
        input: &std::path::Path,
    ) -> TargetTimings {
        match self.config.target {
            BenchmarkTarget::HeapSort => TargetTimings::Single(self.measure_one(
                aggregator,
                size,
                "HeapSort",
                &self.config.heap_sort_path(),
                input,
            )),
            BenchmarkTarget::QuickSort => TargetTimings::Single(self.measure_one(
                aggregator,
                size,
                "QuickSort",
                &self.config.quick_sort_path(),
                input,
            )),
            BenchmarkTarget::Both => TargetTimings::Both {
                heap: self.measure_one(
                    aggregator,
                    size,
                    "HeapSort",
                    &self.config.heap_sort_path(),
                    input,
                ),
                quick: self.measure_one(
                    aggregator,
                    size,
                    "QuickSort",
                    &self.config.quick_sort_path(),
                    input,
                ),
            },
        }
    }

    fn measure_one(
        &self,
        aggregator: &TrialAggregator<R>,
        size: u64,
        label: &str,
        exe: &std::path::Path,
        input: &std::path::Path,
    ) -> Option<f64> {
        let measurement: Measurement = aggregator.average(exe, input);
        match measurement.mean_secs {
            Some(secs) => {
                tracing::debug!(size, label, secs, "measured");
            }
            None => {
                tracing::warn!(
                    size,
                    label,
                    attempts = measurement.attempted_trials,
                    "no usable measurement"
                );
            }
        }
        measurement.mean_secs
    }
}
