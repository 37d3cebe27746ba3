//! Command Execution Seam
//!
//! External-process invocation with text-based output parsing is the most
//! fragile boundary in the harness, so it lives behind a small capability
//! trait. Production code uses [`SystemRunner`]; tests substitute fakes and
//! never spawn a real process.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of one finished child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Everything the child wrote to stdout, lossily decoded as UTF-8.
    pub stdout: String,
    /// Exit code, if the process exited normally (None when killed by a
    /// signal).
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run an external command to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits, and capture its
    /// stdout.
    fn run(&self, program: &Path, args: &[&OsStr]) -> io::Result<CommandOutput>;
}

/// Runner backed by `std::process::Command`.
///
/// Stdin is closed and stderr is inherited so child diagnostics reach the
/// operator's terminal directly. The call blocks until the child exits; no
/// timeout is enforced, so a hung child blocks the whole harness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&OsStr]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            code: output.status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn system_runner_captures_stdout() {
        let output = SystemRunner
            .run(
                Path::new("sh"),
                &[OsStr::new("-c"), OsStr::new("echo 0.25")],
            )
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "0.25");
    }

    #[test]
    #[cfg(unix)]
    fn system_runner_reports_exit_code() {
        let output = SystemRunner
            .run(Path::new("sh"), &[OsStr::new("-c"), OsStr::new("exit 3")])
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.code, Some(3));
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let result = SystemRunner.run(Path::new("/nonexistent/definitely-not-here"), &[]);
        assert!(result.is_err());
    }
}
