use clap::ValueEnum;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{OspreyError, Result};

/// Which external scaffolder backend drives each pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaffolderKind {
    Links,
    Sspace,
}

/// Trigger mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunModeArg {
    /// Fire a scaffold pass on a wall-clock interval
    Time,
    /// Fire a scaffold pass every N accumulated reads
    Reads,
}

/// Trigger mode with the intensity folded in. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Time(Duration),
    Reads(usize),
}

/// Validated startup configuration for one scaffolding run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scaffolder: ScaffolderKind,
    pub watch_dir: PathBuf,
    pub short_reads: PathBuf,
    pub trigger: TriggerMode,
    pub stop_threshold: u64,
    pub genome_size: u64,
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Check the configuration before the watch loop starts.
    ///
    /// Every problem found here is fatal; nothing has been spawned yet.
    pub fn validate(&self) -> Result<()> {
        if !self.watch_dir.is_dir() {
            return Err(OspreyError::Config(format!(
                "watch directory {} does not exist or is not a directory",
                self.watch_dir.display()
            )));
        }
        if !self.short_reads.is_file() {
            return Err(OspreyError::Config(format!(
                "short-read assembly {} is not a readable file",
                self.short_reads.display()
            )));
        }
        match self.trigger {
            TriggerMode::Reads(0) => {
                return Err(OspreyError::Config(
                    "read-count intensity must be nonzero".into(),
                ));
            }
            TriggerMode::Time(interval) if interval.is_zero() => {
                return Err(OspreyError::Config(
                    "time intensity must be nonzero".into(),
                ));
            }
            _ => {}
        }
        if self.genome_size == 0 {
            return Err(OspreyError::Config("target genome size must be nonzero".into()));
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            OspreyError::io(
                format!("creating output directory {}", self.output_dir.display()),
                e,
            )
        })?;
        Ok(())
    }
}
