use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::convert::ReadConverter;
use crate::error::Result;
use crate::invoker::ScaffoldInvoker;
use crate::plot::MetricsPlotter;
use crate::state::{MetricsState, ShutdownSignal};
use crate::termination::TerminationController;
use crate::trigger::TriggerPolicy;

/// Extension of the raw read files produced by the sequencer.
pub const FAST5_EXT: &str = "fast5";

/// How often the ingest thread re-checks the shutdown flag while idle.
const IDLE_POLL: Duration = Duration::from_millis(200);

/// Start watching a directory for newly created fast5 files.
///
/// The watcher callback only enqueues paths; all processing happens on the
/// ingest thread, so events are handled strictly in arrival order. Dropping
/// the returned watcher stops the stream.
pub fn spawn_watcher(dir: &Path, events: Sender<PathBuf>) -> Result<RecommendedWatcher> {
    let mut watcher =
        notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_)) {
                    return;
                }
                for path in event.paths {
                    if path.extension().is_some_and(|ext| ext == FAST5_EXT) {
                        let _ = events.send(path);
                    }
                }
            }
            Err(e) => warn!("Watch error: {}", e),
        })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Consumes file-arrival events and drives the scaffolding control loop:
/// convert, accumulate, evaluate the trigger, scaffold, check termination.
pub struct EventIngestLoop {
    converter: Box<dyn ReadConverter>,
    policy: TriggerPolicy,
    invoker: ScaffoldInvoker,
    termination: TerminationController,
    plotter: MetricsPlotter,
    state: Arc<Mutex<MetricsState>>,
    signal: ShutdownSignal,
}

impl EventIngestLoop {
    pub fn new(
        converter: Box<dyn ReadConverter>,
        policy: TriggerPolicy,
        invoker: ScaffoldInvoker,
        termination: TerminationController,
        plotter: MetricsPlotter,
        state: Arc<Mutex<MetricsState>>,
        signal: ShutdownSignal,
    ) -> Self {
        EventIngestLoop { converter, policy, invoker, termination, plotter, state, signal }
    }

    /// Process one arrived raw-read file, synchronously.
    ///
    /// Events are serialized by the ingest thread, so a scaffold pass is
    /// always finished before the next arrival is looked at.
    pub fn handle_arrival(&mut self, raw: &Path) {
        if self.signal.is_set() {
            return;
        }

        let fasta = match self.converter.convert(raw) {
            Ok(Some(path)) => path,
            Ok(None) => {
                debug!("No usable read in {}", raw.display());
                return;
            }
            Err(e) => {
                warn!("Converter failed on {}: {}", raw.display(), e);
                return;
            }
        };

        let fasta_count = {
            let mut state = self.state.lock().expect("metrics state poisoned");
            state.fasta_files.push(fasta);
            state.fasta_files.len()
        };
        info!("Number of fasta files: {}", fasta_count);

        if !self.policy.should_fire(fasta_count) {
            return;
        }

        match self.invoker.run() {
            Ok(result) => {
                println!("Scaffolds: {}", result.total_contigs);
                let largest = result.contig_sizes.values().copied().max().unwrap_or(0);
                self.termination.check(result.total_contigs, largest);

                let state = self.state.lock().expect("metrics state poisoned");
                if let Err(e) = self.plotter.render(&state) {
                    warn!("Plot update failed: {}", e);
                }
            }
            Err(e) => {
                warn!("Scaffold pass failed, retrying on next trigger: {}", e);
            }
        }
    }

    /// Drain events until the shutdown signal is raised or the watcher side
    /// of the channel goes away.
    pub fn run(mut self, events: Receiver<PathBuf>) {
        while !self.signal.is_set() {
            match events.recv_timeout(IDLE_POLL) {
                Ok(path) => self.handle_arrival(&path),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}
