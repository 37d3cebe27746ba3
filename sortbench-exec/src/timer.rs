//! Single-Invocation Timing
//!
//! Runs one sort executable in timing-only mode and parses the elapsed
//! seconds it reports on stdout.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::runner::CommandRunner;

/// Flag that puts a sort executable into timing-only mode.
const BENCH_TIME_FLAG: &str = "--bench-time";

/// Failure modes of a single timed invocation.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The sort executable does not exist on disk.
    #[error("sort binary not found: {}", .0.display())]
    MissingBinary(PathBuf),

    /// The input file does not exist on disk.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The process could not be spawned at all.
    #[error("failed to execute {}: {source}", .program.display())]
    Spawn {
        /// Executable that failed to start.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process produced no stdout line to parse.
    #[error("no output from {}", .0.display())]
    NoOutput(PathBuf),

    /// The process exited with a non-zero status.
    #[error("{} returned error status {code}", .program.display())]
    ProcessFailure {
        /// Executable that failed.
        program: PathBuf,
        /// Exit code (-1 when terminated by a signal).
        code: i32,
    },

    /// The stdout line was not a decimal number.
    #[error("failed to parse time output {line:?}")]
    ParseFailure {
        /// The line that could not be parsed.
        line: String,
    },
}

/// Times one run of a sort executable over one input file.
///
/// The executable is invoked as `<exe> -f <input> --bench-time` and is
/// expected to print exactly one line containing its elapsed time in
/// seconds, then exit zero.
pub struct ProcessTimer<R> {
    runner: R,
}

impl<R: CommandRunner> ProcessTimer<R> {
    /// Create a timer over the given command runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run the executable once and parse the seconds it reports.
    ///
    /// Both paths are checked before anything is spawned. A parsed value of
    /// zero or below is returned as-is; callers decide whether a
    /// non-positive reading counts as usable.
    pub fn measure(&self, exe: &Path, input: &Path) -> Result<f64, ExecError> {
        if !exe.exists() {
            return Err(ExecError::MissingBinary(exe.to_path_buf()));
        }
        if !input.exists() {
            return Err(ExecError::MissingInput(input.to_path_buf()));
        }

        let args: [&OsStr; 3] = [
            OsStr::new("-f"),
            input.as_os_str(),
            OsStr::new(BENCH_TIME_FLAG),
        ];
        let output = self
            .runner
            .run(exe, &args)
            .map_err(|source| ExecError::Spawn {
                program: exe.to_path_buf(),
                source,
            })?;

        // Checked in the order the information becomes available when
        // reading from a pipe: output line, exit status, parsed value.
        let line = match output.stdout.lines().next() {
            Some(line) => line.trim(),
            None => return Err(ExecError::NoOutput(exe.to_path_buf())),
        };

        if !output.success() {
            return Err(ExecError::ProcessFailure {
                program: exe.to_path_buf(),
                code: output.code.unwrap_or(-1),
            });
        }

        line.parse::<f64>().map_err(|_| ExecError::ParseFailure {
            line: line.to_string(),
        })
    }
}
