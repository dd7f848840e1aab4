use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

use super::{require_output, write_fof, ScaffoldBackend};
use crate::error::{OspreyError, Result};

/// Scaffolds with the LINKS long-read scaffolder.
///
/// LINKS takes the short-read assembly, a file-of-filenames of long-read
/// FASTAs and a base name; it writes `<base>.scaffolds.fa`.
pub struct LinksBackend;

impl ScaffoldBackend for LinksBackend {
    fn name(&self) -> &'static str {
        "LINKS"
    }

    fn run(
        &self,
        short_reads: &Path,
        fasta_files: &[PathBuf],
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let fof = output_dir.join("longreads.fof");
        write_fof(&fof, fasta_files)?;
        let base = output_dir.join("links");

        info!("Running LINKS on {} long-read files", fasta_files.len());
        let status = Command::new("LINKS")
            .arg("-f")
            .arg(short_reads)
            .arg("-s")
            .arg(&fof)
            .arg("-b")
            .arg(&base)
            .status()
            .map_err(|e| OspreyError::tool("LINKS", e.to_string()))?;

        if !status.success() {
            return Err(OspreyError::tool("LINKS", status.to_string()));
        }

        require_output("LINKS", PathBuf::from(format!("{}.scaffolds.fa", base.display())))
    }
}
