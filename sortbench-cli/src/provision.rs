//! Input Provisioning
//!
//! Drives the external random-number generator and locates the file it
//! produced. Discovery is by newest modification time, which is safe only
//! because the sweep runs strictly sequentially; parallel provisioning
//! would need the generator to report the created path instead.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use thiserror::Error;

use sortbench_exec::CommandRunner;

/// Name prefix of generator output files inside the input directory.
const INPUT_FILE_PREFIX: &str = "randnum_";

/// Provisioning failures.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The input directory could not be created. Fatal: no benchmarking
    /// can proceed without inputs.
    #[error("failed to create input directory {}: {source}", .path.display())]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The generator could not be spawned.
    #[error("failed to execute generator {}: {source}", .program.display())]
    Spawn {
        /// Generator executable.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The generator exited with a non-zero status.
    #[error("generator returned error status {code}")]
    GeneratorFailed {
        /// Exit code (-1 when terminated by a signal).
        code: i32,
    },

    /// The input directory could not be scanned for the generated file.
    #[error("failed to scan input directory {}: {source}", .path.display())]
    Scan {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// No generated file was found after a successful generator run.
    #[error("no randnum_* file found in {}", .path.display())]
    NoInputFile {
        /// Directory that was scanned.
        path: PathBuf,
    },
}

impl ProvisionError {
    /// Whether this failure must abort the sweep rather than skip the size.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProvisionError::DirectoryCreation { .. })
    }
}

/// A freshly generated input file.
#[derive(Debug)]
pub struct ProvisionedInput {
    /// Path of the generated file.
    pub path: PathBuf,
    /// Wall-clock cost of the generation step. Recorded for the report
    /// only; not part of the timing being benchmarked.
    pub generation: Duration,
}

/// Provisions one random input file per requested size.
pub struct InputProvisioner<R> {
    runner: R,
    generator: PathBuf,
    input_dir: PathBuf,
}

impl<R: CommandRunner> InputProvisioner<R> {
    /// Create a provisioner around the generator executable.
    pub fn new(runner: R, generator: PathBuf, input_dir: PathBuf) -> Self {
        Self {
            runner,
            generator,
            input_dir,
        }
    }

    /// Generate a fresh input of `size` values and locate it on disk.
    ///
    /// Files accumulate across runs; cleanup is out of scope here.
    pub fn provision(&self, size: u64) -> Result<ProvisionedInput, ProvisionError> {
        fs::create_dir_all(&self.input_dir).map_err(|source| ProvisionError::DirectoryCreation {
            path: self.input_dir.clone(),
            source,
        })?;

        let started = Instant::now();
        let size_arg = size.to_string();
        let args: [&OsStr; 2] = [OsStr::new("-c"), OsStr::new(&size_arg)];
        let output = self
            .runner
            .run(&self.generator, &args)
            .map_err(|source| ProvisionError::Spawn {
                program: self.generator.clone(),
                source,
            })?;

        if !output.success() {
            return Err(ProvisionError::GeneratorFailed {
                code: output.code.unwrap_or(-1),
            });
        }
        let generation = started.elapsed();

        let path = self.newest_input_file()?;
        Ok(ProvisionedInput { path, generation })
    }

    /// Newest `randnum_*` regular file in the input directory.
    fn newest_input_file(&self) -> Result<PathBuf, ProvisionError> {
        let scan_err = |source| ProvisionError::Scan {
            path: self.input_dir.clone(),
            source,
        };

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in fs::read_dir(&self.input_dir).map_err(scan_err)? {
            let entry = entry.map_err(scan_err)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(INPUT_FILE_PREFIX) {
                continue;
            }

            let metadata = entry.metadata().map_err(scan_err)?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().map_err(scan_err)?;

            if newest.as_ref().map_or(true, |(when, _)| modified >= *when) {
                newest = Some((modified, entry.path()));
            }
        }

        newest
            .map(|(_, path)| path)
            .ok_or_else(|| ProvisionError::NoInputFile {
                path: self.input_dir.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortbench_exec::CommandOutput;
    use std::fs::File;
    use std::time::Duration as StdDuration;

    /// Runner whose "generator" writes a file as a side effect.
    struct WritingRunner {
        file_to_write: Option<PathBuf>,
        code: i32,
    }

    impl CommandRunner for WritingRunner {
        fn run(&self, _program: &Path, _args: &[&OsStr]) -> io::Result<CommandOutput> {
            if let Some(path) = &self.file_to_write {
                fs::write(path, b"8 6 7 5 3 0 9")?;
            }
            Ok(CommandOutput {
                stdout: String::new(),
                code: Some(self.code),
            })
        }
    }

    fn set_mtime(path: &Path, age: StdDuration) {
        let file = File::options().append(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn provisions_and_discovers_the_generated_file() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("input");
        let expected = input_dir.join("randnum_1000");

        let provisioner = InputProvisioner::new(
            WritingRunner {
                file_to_write: Some(expected.clone()),
                code: 0,
            },
            dir.path().join("genrand_f"),
            input_dir,
        );

        // create_dir_all runs before the generator, so the side-effect write
        // lands in an existing directory.
        let provisioned = provisioner.provision(1000).unwrap();
        assert_eq!(provisioned.path, expected);
    }

    #[test]
    fn picks_the_newest_matching_file() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().to_path_buf();

        let stale = input_dir.join("randnum_old");
        let fresh = input_dir.join("randnum_new");
        let unrelated = input_dir.join("notes.txt");
        fs::write(&stale, b"1").unwrap();
        fs::write(&fresh, b"2").unwrap();
        fs::write(&unrelated, b"3").unwrap();
        set_mtime(&stale, StdDuration::from_secs(3600));

        let provisioner = InputProvisioner::new(
            WritingRunner {
                file_to_write: None,
                code: 0,
            },
            dir.path().join("genrand_f"),
            input_dir,
        );

        let provisioned = provisioner.provision(500).unwrap();
        assert_eq!(provisioned.path, fresh);
    }

    #[test]
    fn generator_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let provisioner = InputProvisioner::new(
            WritingRunner {
                file_to_write: None,
                code: 1,
            },
            dir.path().join("genrand_f"),
            dir.path().join("input"),
        );

        let err = provisioner.provision(1000).unwrap_err();
        assert!(matches!(err, ProvisionError::GeneratorFailed { code: 1 }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn missing_output_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let provisioner = InputProvisioner::new(
            WritingRunner {
                file_to_write: None,
                code: 0,
            },
            dir.path().join("genrand_f"),
            dir.path().join("input"),
        );

        let err = provisioner.provision(1000).unwrap_err();
        assert!(matches!(err, ProvisionError::NoInputFile { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    #[cfg(unix)]
    fn unwritable_input_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should go makes create_dir_all
        // fail.
        let blocked = dir.path().join("input");
        fs::write(&blocked, b"").unwrap();

        let provisioner = InputProvisioner::new(
            WritingRunner {
                file_to_write: None,
                code: 0,
            },
            dir.path().join("genrand_f"),
            blocked,
        );

        let err = provisioner.provision(1000).unwrap_err();
        assert!(matches!(err, ProvisionError::DirectoryCreation { .. }));
        assert!(err.is_fatal());
    }
}
