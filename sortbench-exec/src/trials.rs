//! Repeated-Trial Aggregation
//!
//! Folds a fixed number of timed invocations into one measurement.
//! Benchmarking tolerates sporadic failures: an individual trial that
//! errors or reports a non-positive time is discarded and never aborts the
//! remaining trials.

use std::path::Path;

use crate::runner::CommandRunner;
use crate::timer::ProcessTimer;

/// Aggregate of one (executable, input) measurement series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Arithmetic mean of the usable trials, or `None` when no trial
    /// produced a strictly positive reading.
    pub mean_secs: Option<f64>,
    /// Trials that produced a strictly positive reading.
    pub usable_trials: u32,
    /// Trials attempted.
    pub attempted_trials: u32,
}

impl Measurement {
    /// Whether at least one trial produced a usable reading.
    pub fn is_usable(&self) -> bool {
        self.mean_secs.is_some()
    }
}

/// Runs a fixed number of timing trials and averages the usable ones.
pub struct TrialAggregator<R> {
    timer: ProcessTimer<R>,
    repeats: u32,
}

impl<R: CommandRunner> TrialAggregator<R> {
    /// Create an aggregator that attempts `repeats` trials per measurement.
    pub fn new(runner: R, repeats: u32) -> Self {
        Self {
            timer: ProcessTimer::new(runner),
            repeats,
        }
    }

    /// Measure `exe` over `input` across all configured trials.
    ///
    /// Failed and non-positive trials are logged at `warn` and excluded
    /// from the mean; only the aggregate outcome is visible to callers.
    pub fn average(&self, exe: &Path, input: &Path) -> Measurement {
        let mut total = 0.0;
        let mut usable = 0u32;

        for trial in 1..=self.repeats {
            match self.timer.measure(exe, input) {
                Ok(secs) if secs > 0.0 => {
                    total += secs;
                    usable += 1;
                }
                Ok(secs) => {
                    tracing::warn!(
                        trial,
                        secs,
                        exe = %exe.display(),
                        "discarding non-positive timing"
                    );
                }
                Err(err) => {
                    tracing::warn!(trial, exe = %exe.display(), "trial failed: {err}");
                }
            }
        }

        Measurement {
            mean_secs: (usable > 0).then(|| total / f64::from(usable)),
            usable_trials: usable,
            attempted_trials: self.repeats,
        }
    }
}
