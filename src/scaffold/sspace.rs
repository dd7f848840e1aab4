use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

use super::{require_output, write_fof, ScaffoldBackend};
use crate::error::{OspreyError, Result};

/// Scaffolds with SSPACE-LongRead.
///
/// SSPACE takes the short-read contigs and a file-of-filenames of long-read
/// FASTAs; it writes `scaffolds.fasta` into its output directory.
pub struct SspaceBackend;

impl ScaffoldBackend for SspaceBackend {
    fn name(&self) -> &'static str {
        "SSPACE"
    }

    fn run(
        &self,
        short_reads: &Path,
        fasta_files: &[PathBuf],
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let fof = output_dir.join("pacbio.fof");
        write_fof(&fof, fasta_files)?;

        info!("Running SSPACE-LongRead on {} long-read files", fasta_files.len());
        let status = Command::new("SSPACE-LongRead.pl")
            .arg("-c")
            .arg(short_reads)
            .arg("-p")
            .arg(&fof)
            .arg("-b")
            .arg(output_dir)
            .status()
            .map_err(|e| OspreyError::tool("SSPACE", e.to_string()))?;

        if !status.success() {
            return Err(OspreyError::tool("SSPACE", status.to_string()));
        }

        require_output("SSPACE", output_dir.join("scaffolds.fasta"))
    }
}
