use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{OspreyError, Result};
use crate::fastainfo::AssemblyInfo;

/// Shared mutable record of the run's evolving statistics.
///
/// The histories are append-only and index-aligned: the i-th entry of each
/// describes the same scaffold pass. Entry 0 is seeded from the short-read
/// assembly before any long reads arrive.
#[derive(Debug, Serialize)]
pub struct MetricsState {
    pub fasta_files: Vec<PathBuf>,
    pub n50_history: Vec<u64>,
    pub read_count_history: Vec<u64>,
    pub scaffold_count_history: Vec<u64>,
    pub contig_sizes: HashMap<String, u64>,
}

impl MetricsState {
    /// Seed the record from the short-read-only assembly.
    pub fn seeded(info: &AssemblyInfo) -> Self {
        MetricsState {
            fasta_files: Vec::new(),
            n50_history: vec![info.n50],
            read_count_history: vec![0],
            scaffold_count_history: vec![info.total_contigs],
            contig_sizes: info.contig_sizes.clone(),
        }
    }

    /// Record one completed scaffold pass.
    ///
    /// Appends exactly one entry to each history and replaces the contig
    /// size mapping wholesale.
    pub fn record_pass(&mut self, info: &AssemblyInfo) {
        self.n50_history.push(info.n50);
        self.read_count_history.push(self.fasta_files.len() as u64);
        self.scaffold_count_history.push(info.total_contigs);
        self.contig_sizes = info.contig_sizes.clone();
    }

    /// Number of completed scaffold passes, not counting the seed entry.
    pub fn passes(&self) -> usize {
        self.scaffold_count_history.len().saturating_sub(1)
    }

    /// Size of the largest scaffold in the current assembly.
    pub fn largest_contig(&self) -> u64 {
        self.contig_sizes.values().copied().max().unwrap_or(0)
    }

    /// Write the current record as pretty JSON.
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| OspreyError::io(format!("creating {}", path.display()), e))?;
        serde_json::to_writer_pretty(file, self).map_err(|e| {
            OspreyError::io(
                format!("writing {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        Ok(())
    }
}

/// One-way stop flag shared between the ingest thread and the wait loop.
///
/// Transitions false to true exactly once; once set, the run never resumes.
#[derive(Debug, Clone)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        ShutdownSignal(Arc::new(AtomicBool::new(false)))
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(total_contigs: u64, n50: u64, sizes: &[(&str, u64)]) -> AssemblyInfo {
        let contig_sizes: HashMap<String, u64> =
            sizes.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let total_length: u64 = contig_sizes.values().sum();
        AssemblyInfo {
            total_contigs,
            total_length,
            average_length: if total_contigs > 0 {
                total_length as f64 / total_contigs as f64
            } else {
                0.0
            },
            n50,
            contig_sizes,
        }
    }

    #[test]
    fn test_seeded_state_has_one_entry_per_history() {
        let state = MetricsState::seeded(&info(44, 90152, &[("contig_1", 90152)]));
        assert_eq!(state.n50_history, vec![90152]);
        assert_eq!(state.read_count_history, vec![0]);
        assert_eq!(state.scaffold_count_history, vec![44]);
        assert_eq!(state.passes(), 0);
    }

    #[test]
    fn test_record_pass_appends_aligned_entries() {
        let mut state = MetricsState::seeded(&info(44, 90152, &[("contig_1", 90152)]));
        state.fasta_files.push(PathBuf::from("read_1.fasta"));
        state.fasta_files.push(PathBuf::from("read_2.fasta"));

        state.record_pass(&info(10, 400_000, &[("scaffold_1", 400_000), ("scaffold_2", 90_000)]));

        assert_eq!(state.n50_history.len(), 2);
        assert_eq!(state.read_count_history, vec![0, 2]);
        assert_eq!(state.scaffold_count_history, vec![44, 10]);
        assert_eq!(state.passes(), 1);
    }

    #[test]
    fn test_record_pass_replaces_contig_sizes_wholesale() {
        let mut state = MetricsState::seeded(&info(2, 100, &[("a", 100), ("b", 50)]));
        state.record_pass(&info(1, 150, &[("scaffold_1", 150)]));
        assert_eq!(state.contig_sizes.len(), 1);
        assert_eq!(state.contig_sizes["scaffold_1"], 150);
        assert_eq!(state.largest_contig(), 150);
    }

    #[test]
    fn test_shutdown_signal_is_one_way() {
        let signal = ShutdownSignal::new();
        let observer = signal.clone();
        assert!(!observer.is_set());
        signal.trigger();
        assert!(observer.is_set());
        signal.trigger();
        assert!(observer.is_set());
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let state = MetricsState::seeded(&info(44, 90152, &[("contig_1", 90152)]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        state.write_snapshot(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["n50_history"][0], 90152);
        assert_eq!(value["scaffold_count_history"][0], 44);
    }
}
