#![warn(missing_docs)]
//! Report schema and durable CSV writing.
//!
//! The report file is the sweep's sole persisted artifact: one CSV with a
//! header shaped by the benchmark target and one row per processed size,
//! flushed after every row so a crash mid-sweep preserves everything
//! written so far.

mod format;
mod writer;

pub use format::format_seconds;
pub use writer::{ReportError, ReportWriter, SizeMeasurement, TargetTimings};

/// Numeric stand-in for "no usable measurement" in report cells.
///
/// The formatted-time column renders `N/A` instead; downstream tooling keys
/// off the negative value in the numeric columns.
pub const FAILURE_SENTINEL_SECS: f64 = -1.0;

/// Which sorting executables a sweep drives.
///
/// Parsed once from configuration; also shapes the report schema, so the
/// writer is created against a fixed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkTarget {
    /// Benchmark the heapsort executable alone.
    HeapSort,
    /// Benchmark the quicksort executable alone.
    QuickSort,
    /// Benchmark both and emit the comparison schema.
    Both,
}

impl BenchmarkTarget {
    /// Whether the heapsort executable participates.
    pub fn includes_heap(self) -> bool {
        matches!(self, BenchmarkTarget::HeapSort | BenchmarkTarget::Both)
    }

    /// Whether the quicksort executable participates.
    pub fn includes_quick(self) -> bool {
        matches!(self, BenchmarkTarget::QuickSort | BenchmarkTarget::Both)
    }

    /// Display title for run banners.
    pub fn title(self) -> &'static str {
        match self {
            BenchmarkTarget::HeapSort => "HeapSort",
            BenchmarkTarget::QuickSort => "QuickSort",
            BenchmarkTarget::Both => "Algorithm Comparison",
        }
    }
}

impl std::str::FromStr for BenchmarkTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heap" => Ok(BenchmarkTarget::HeapSort),
            "quick" => Ok(BenchmarkTarget::QuickSort),
            "both" => Ok(BenchmarkTarget::Both),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_parsing() {
        assert_eq!("heap".parse(), Ok(BenchmarkTarget::HeapSort));
        assert_eq!("quick".parse(), Ok(BenchmarkTarget::QuickSort));
        assert_eq!("both".parse(), Ok(BenchmarkTarget::Both));
        assert_eq!("BOTH".parse(), Ok(BenchmarkTarget::Both));
        assert!("merge".parse::<BenchmarkTarget>().is_err());
    }

    #[test]
    fn target_selection() {
        assert!(BenchmarkTarget::HeapSort.includes_heap());
        assert!(!BenchmarkTarget::HeapSort.includes_quick());
        assert!(BenchmarkTarget::Both.includes_heap());
        assert!(BenchmarkTarget::Both.includes_quick());
    }
}
