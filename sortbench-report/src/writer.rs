//! Report Writer
//!
//! Owns the single open report stream for a sweep's duration. Rows are
//! appended in encounter order and the stream is flushed after every row so
//! partial results survive a crash.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::format::format_seconds;
use crate::{BenchmarkTarget, FAILURE_SENTINEL_SECS};

/// Report-writing failures.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The results directory could not be created.
    #[error("failed to create results directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing to the report stream failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// A row's timing shape does not match the writer's target schema.
    #[error("row shape does not match the {target} report schema")]
    SchemaMismatch {
        /// Title of the target the writer was created for.
        target: &'static str,
    },
}

/// Timings for one size, shaped by the benchmark target.
///
/// `None` means "no usable measurement" and renders as the sentinel value
/// in numeric cells and `N/A` in the formatted cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetTimings {
    /// Single-algorithm schema (heapsort or quicksort alone).
    Single(Option<f64>),
    /// Comparison schema carrying both algorithms.
    Both {
        /// Mean heapsort seconds, if usable.
        heap: Option<f64>,
        /// Mean quicksort seconds, if usable.
        quick: Option<f64>,
    },
}

impl TargetTimings {
    /// Whether any selected algorithm ended up without a usable measurement.
    pub fn is_degraded(&self) -> bool {
        match *self {
            TargetTimings::Single(secs) => secs.is_none(),
            TargetTimings::Both { heap, quick } => heap.is_none() || quick.is_none(),
        }
    }
}

/// Everything the report records about one array size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeMeasurement {
    /// Array size this row describes.
    pub size: u64,
    /// Per-algorithm mean timings.
    pub timings: TargetTimings,
    /// Wall-clock cost of input generation for this size (informational).
    pub generation_secs: f64,
}

/// CSV report stream for one sweep.
///
/// Created against a fixed target; the header and the file name both derive
/// from it, so successive configurations do not collide.
pub struct ReportWriter {
    target: BenchmarkTarget,
    path: PathBuf,
    out: BufWriter<File>,
    rows_written: u64,
}

impl ReportWriter {
    /// Create the results directory if needed, open the report file, and
    /// write the header row.
    pub fn create(
        results_dir: &Path,
        target: BenchmarkTarget,
        min_size: u64,
        max_size: u64,
    ) -> Result<Self, ReportError> {
        fs::create_dir_all(results_dir).map_err(|source| ReportError::CreateDir {
            path: results_dir.to_path_buf(),
            source,
        })?;

        let path = results_dir.join(Self::file_name(target, min_size, max_size));
        let mut out = BufWriter::new(File::create(&path)?);

        match target {
            BenchmarkTarget::Both => writeln!(
                out,
                "Size,HeapSort Time (s),HeapSort Time (ms),HeapSort Formatted Time,\
                 QuickSort Time (s),QuickSort Time (ms),QuickSort Formatted Time,\
                 Array Generation Time (s)"
            )?,
            _ => writeln!(
                out,
                "Size,Time (s),Time (ms),Formatted Time,Array Generation Time (s)"
            )?,
        }
        out.flush()?;

        Ok(Self {
            target,
            path,
            out,
            rows_written: 0,
        })
    }

    fn file_name(target: BenchmarkTarget, min_size: u64, max_size: u64) -> String {
        match target {
            BenchmarkTarget::HeapSort => format!("heapsort_benchmark_{min_size}_{max_size}.csv"),
            BenchmarkTarget::QuickSort => format!("quicksort_benchmark_{min_size}_{max_size}.csv"),
            BenchmarkTarget::Both => format!("algorithm_comparison_{min_size}_{max_size}.csv"),
        }
    }

    /// Path of the report file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended so far (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Append one row and flush so a crash preserves everything written.
    pub fn write_row(&mut self, row: &SizeMeasurement) -> Result<(), ReportError> {
        match (self.target, row.timings) {
            (BenchmarkTarget::HeapSort | BenchmarkTarget::QuickSort, TargetTimings::Single(secs)) => {
                writeln!(
                    self.out,
                    "{},{},{:.6}",
                    row.size,
                    timing_cells(secs),
                    row.generation_secs
                )?;
            }
            (BenchmarkTarget::Both, TargetTimings::Both { heap, quick }) => {
                writeln!(
                    self.out,
                    "{},{},{},{:.6}",
                    row.size,
                    timing_cells(heap),
                    timing_cells(quick),
                    row.generation_secs
                )?;
            }
            _ => {
                return Err(ReportError::SchemaMismatch {
                    target: self.target.title(),
                });
            }
        }

        self.out.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush and close the stream, returning the report path.
    pub fn finish(mut self) -> Result<PathBuf, ReportError> {
        self.out.flush()?;
        Ok(self.path)
    }
}

/// `Time (s),Time (ms),Formatted Time` cells for one measurement.
fn timing_cells(secs: Option<f64>) -> String {
    let value = secs.unwrap_or(FAILURE_SENTINEL_SECS);
    let formatted = match secs {
        Some(secs) => format_seconds(secs),
        None => "N/A".to_string(),
    };
    format!("{value:.6},{:.6},{formatted}", value * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn single_algorithm_schema_and_naming() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ReportWriter::create(dir.path(), BenchmarkTarget::HeapSort, 1000, 3000).unwrap();

        assert!(writer.path().ends_with("heapsort_benchmark_1000_3000.csv"));

        writer
            .write_row(&SizeMeasurement {
                size: 1000,
                timings: TargetTimings::Single(Some(0.5)),
                generation_secs: 0.01,
            })
            .unwrap();
        let path = writer.finish().unwrap();

        let lines = read_lines(&path);
        assert_eq!(
            lines[0],
            "Size,Time (s),Time (ms),Formatted Time,Array Generation Time (s)"
        );
        assert_eq!(lines[1], "1000,0.500000,500.000000,500.000 ms,0.010000");
    }

    #[test]
    fn comparison_schema_and_naming() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ReportWriter::create(dir.path(), BenchmarkTarget::Both, 1000, 2000).unwrap();

        assert!(writer.path().ends_with("algorithm_comparison_1000_2000.csv"));

        writer
            .write_row(&SizeMeasurement {
                size: 1000,
                timings: TargetTimings::Both {
                    heap: Some(0.25),
                    quick: Some(0.125),
                },
                generation_secs: 0.02,
            })
            .unwrap();
        let path = writer.finish().unwrap();

        let lines = read_lines(&path);
        assert_eq!(
            lines[0],
            "Size,HeapSort Time (s),HeapSort Time (ms),HeapSort Formatted Time,\
             QuickSort Time (s),QuickSort Time (ms),QuickSort Formatted Time,\
             Array Generation Time (s)"
        );
        assert_eq!(
            lines[1],
            "1000,0.250000,250.000000,250.000 ms,0.125000,125.000000,125.000 ms,0.020000"
        );
    }

    #[test]
    fn failed_measurement_renders_sentinel_and_na() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ReportWriter::create(dir.path(), BenchmarkTarget::QuickSort, 500, 500).unwrap();

        writer
            .write_row(&SizeMeasurement {
                size: 500,
                timings: TargetTimings::Single(None),
                generation_secs: 0.0,
            })
            .unwrap();
        let path = writer.finish().unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[1], "500,-1.000000,-1000.000000,N/A,0.000000");
    }

    #[test]
    fn rows_survive_without_finish() {
        // Flush-per-row durability: the file is complete even if the writer
        // is never closed cleanly.
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ReportWriter::create(dir.path(), BenchmarkTarget::HeapSort, 100, 300).unwrap();

        for size in [100u64, 200, 300] {
            writer
                .write_row(&SizeMeasurement {
                    size,
                    timings: TargetTimings::Single(Some(0.1)),
                    generation_secs: 0.0,
                })
                .unwrap();
        }

        let lines = read_lines(writer.path());
        assert_eq!(lines.len(), 4);
        assert_eq!(writer.rows_written(), 3);
    }

    #[test]
    fn mismatched_row_shape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ReportWriter::create(dir.path(), BenchmarkTarget::Both, 100, 200).unwrap();

        let err = writer
            .write_row(&SizeMeasurement {
                size: 100,
                timings: TargetTimings::Single(Some(0.1)),
                generation_secs: 0.0,
            })
            .unwrap_err();

        assert!(matches!(err, ReportError::SchemaMismatch { .. }));
        assert_eq!(writer.rows_written(), 0);
    }
}
