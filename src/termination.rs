use tracing::info;

use crate::state::ShutdownSignal;

/// How close the largest scaffold must get to the target genome size before
/// the run is considered converged.
pub const GENOME_PROXIMITY_TOLERANCE: f64 = 0.10;

/// Evaluates the stop condition after each completed scaffold pass.
pub struct TerminationController {
    stop_threshold: u64,
    genome_size: u64,
    signal: ShutdownSignal,
}

impl TerminationController {
    pub fn new(stop_threshold: u64, genome_size: u64, signal: ShutdownSignal) -> Self {
        TerminationController { stop_threshold, genome_size, signal }
    }

    /// Returns true and raises the shutdown signal once the run converged.
    ///
    /// The run converges when the scaffold count drops to the configured
    /// threshold, or when the largest scaffold lands within
    /// `GENOME_PROXIMITY_TOLERANCE` of the target genome size.
    pub fn check(&self, scaffold_count: u64, largest_scaffold: u64) -> bool {
        let converged =
            scaffold_count <= self.stop_threshold || self.near_target(largest_scaffold);
        if converged {
            info!(
                "Stop condition reached: {} scaffolds, largest {} bp",
                scaffold_count, largest_scaffold
            );
            println!("Stop sequencing");
            self.signal.trigger();
        }
        converged
    }

    fn near_target(&self, largest_scaffold: u64) -> bool {
        if self.genome_size == 0 {
            return false;
        }
        let target = self.genome_size as f64;
        (largest_scaffold as f64 - target).abs() / target <= GENOME_PROXIMITY_TOLERANCE
    }
}
