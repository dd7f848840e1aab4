use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::error::Result;
use crate::fastainfo::{assembly_info, AssemblyInfo};
use crate::scaffold::ScaffoldBackend;
use crate::state::MetricsState;

/// Runs one scaffold pass at a time and owns all metric updates.
///
/// The run guard serializes invocations: a pass is never re-entered while a
/// prior one is in flight, and no two passes ever write the same output
/// directory concurrently.
pub struct ScaffoldInvoker {
    backend: Box<dyn ScaffoldBackend>,
    short_reads: PathBuf,
    output_dir: PathBuf,
    state: Arc<Mutex<MetricsState>>,
    run_guard: Mutex<()>,
}

impl ScaffoldInvoker {
    pub fn new(
        backend: Box<dyn ScaffoldBackend>,
        short_reads: PathBuf,
        output_dir: PathBuf,
        state: Arc<Mutex<MetricsState>>,
    ) -> Self {
        ScaffoldInvoker { backend, short_reads, output_dir, state, run_guard: Mutex::new(()) }
    }

    /// Run one full re-scaffold over the accumulated long-read set.
    ///
    /// On success, appends one aligned entry to every history and replaces
    /// the contig size mapping. On failure nothing is recorded; the caller
    /// logs and the next trigger retries from the accumulated state.
    pub fn run(&self) -> Result<AssemblyInfo> {
        let _running = self.run_guard.lock().expect("scaffold run guard poisoned");

        let fasta_files = {
            let state = self.state.lock().expect("metrics state poisoned");
            state.fasta_files.clone()
        };
        info!(
            "Scaffolding with {} over {} accumulated read files",
            self.backend.name(),
            fasta_files.len()
        );

        let scaffold_fasta =
            self.backend.run(&self.short_reads, &fasta_files, &self.output_dir)?;
        let result = assembly_info(&scaffold_fasta)?;

        let mut state = self.state.lock().expect("metrics state poisoned");
        state.record_pass(&result);

        let snapshot = self.output_dir.join("metrics.json");
        if let Err(e) = state.write_snapshot(&snapshot) {
            warn!("Could not write metrics snapshot: {}", e);
        }

        Ok(result)
    }
}
