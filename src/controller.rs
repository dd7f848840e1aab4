use crossbeam::channel::unbounded;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::convert::PoretoolsConverter;
use crate::error::Result;
use crate::fastainfo::assembly_info;
use crate::invoker::ScaffoldInvoker;
use crate::plot::MetricsPlotter;
use crate::scaffold::backend_for;
use crate::state::{MetricsState, ShutdownSignal};
use crate::termination::TerminationController;
use crate::trigger::TriggerPolicy;
use crate::watch::{spawn_watcher, EventIngestLoop, FAST5_EXT};

/// Poll interval of the main wait loop.
const WAIT_POLL: Duration = Duration::from_secs(1);

/// Wires the whole run together: seeds the metrics record from the
/// short-read assembly, starts the watcher and ingest thread, then blocks
/// until the shutdown signal is raised.
pub struct RunController {
    config: RunConfig,
}

impl RunController {
    pub fn new(config: RunConfig) -> Self {
        RunController { config }
    }

    pub fn run(self) -> Result<()> {
        self.config.validate()?;

        let seed = assembly_info(&self.config.short_reads)?;
        info!(
            "Short-read assembly: {} contigs, N50 {}",
            seed.total_contigs, seed.n50
        );

        let state = Arc::new(Mutex::new(MetricsState::seeded(&seed)));
        let signal = ShutdownSignal::new();
        let policy = TriggerPolicy::new(&self.config.trigger)?;
        let invoker = ScaffoldInvoker::new(
            backend_for(self.config.scaffolder),
            self.config.short_reads.clone(),
            self.config.output_dir.clone(),
            Arc::clone(&state),
        );
        let termination = TerminationController::new(
            self.config.stop_threshold,
            self.config.genome_size,
            signal.clone(),
        );
        let plotter = MetricsPlotter::new(self.config.output_dir.clone());

        {
            let seeded = state.lock().expect("metrics state poisoned");
            if let Err(e) = plotter.render(&seeded) {
                warn!("Initial plot render failed: {}", e);
            }
        }

        let (events_tx, events_rx) = unbounded();
        let watcher = spawn_watcher(&self.config.watch_dir, events_tx)?;
        info!(
            "Watching {} for new .{} files",
            self.config.watch_dir.display(),
            FAST5_EXT
        );

        let ingest = EventIngestLoop::new(
            Box::new(PoretoolsConverter::new()),
            policy,
            invoker,
            termination,
            plotter,
            Arc::clone(&state),
            signal.clone(),
        );
        let ingest_handle = thread::spawn(move || ingest.run(events_rx));

        while !signal.is_set() {
            thread::sleep(WAIT_POLL);
        }
        println!("Completed!");

        drop(watcher);
        if ingest_handle.join().is_err() {
            warn!("Ingest thread terminated abnormally");
        }
        Ok(())
    }
}
