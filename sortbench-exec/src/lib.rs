#![warn(missing_docs)]
//! Subprocess invocation and trial aggregation.
//!
//! This crate owns the fragile boundary of the harness: spawning external
//! sort executables, capturing their single-line timing output, and folding
//! repeated trials into one measurement. Everything above it (sweep control,
//! reporting) stays free of `std::process`.
//!
//! ```text
//! TrialAggregator ──▶ ProcessTimer ──▶ CommandRunner ──▶ child process
//!        │                  │
//!        ▼                  ▼
//!   Measurement      Result<f64, ExecError>
//! ```

mod runner;
mod timer;
mod trials;

pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use timer::{ExecError, ProcessTimer};
pub use trials::{Measurement, TrialAggregator};
