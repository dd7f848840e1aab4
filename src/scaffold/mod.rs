pub mod links;
pub mod sspace;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::ScaffolderKind;
use crate::error::{OspreyError, Result};

pub use links::LinksBackend;
pub use sspace::SspaceBackend;

/// One external scaffolder.
///
/// Each invocation is a full re-scaffold: the backend receives the entire
/// accumulated long-read set plus the fixed short-read assembly, and returns
/// the path of the scaffold FASTA it produced.
pub trait ScaffoldBackend: Send {
    fn name(&self) -> &'static str;

    fn run(
        &self,
        short_reads: &Path,
        fasta_files: &[PathBuf],
        output_dir: &Path,
    ) -> Result<PathBuf>;
}

/// Build the backend selected at startup.
pub fn backend_for(kind: ScaffolderKind) -> Box<dyn ScaffoldBackend> {
    match kind {
        ScaffolderKind::Links => Box::new(LinksBackend),
        ScaffolderKind::Sspace => Box::new(SspaceBackend),
    }
}

/// Write a file-of-filenames listing the accumulated long-read FASTAs, one
/// path per line, the layout both scaffolders consume.
pub(crate) fn write_fof(path: &Path, fasta_files: &[PathBuf]) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| OspreyError::io(format!("creating {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    for fasta in fasta_files {
        writeln!(writer, "{}", fasta.display())
            .map_err(|e| OspreyError::io(format!("writing {}", path.display()), e))?;
    }
    writer
        .flush()
        .map_err(|e| OspreyError::io(format!("writing {}", path.display()), e))?;
    Ok(())
}

/// Check that the scaffolder actually produced its output file.
pub(crate) fn require_output(tool: &'static str, path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(OspreyError::ToolOutput {
            tool,
            detail: format!("expected scaffold file {} is missing", path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_fof_one_path_per_line() {
        let dir = tempdir().unwrap();
        let fof = dir.path().join("longreads.fof");
        let files = vec![
            PathBuf::from("/run/reads/read_1.fasta"),
            PathBuf::from("/run/reads/read_2.fasta"),
        ];

        write_fof(&fof, &files).unwrap();

        let content = std::fs::read_to_string(&fof).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["/run/reads/read_1.fasta", "/run/reads/read_2.fasta"]);
    }

    #[test]
    fn test_require_output_flags_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("links.scaffolds.fa");
        let err = require_output("LINKS", missing).unwrap_err();
        assert!(err.is_recoverable());

        let present = dir.path().join("scaffolds.fasta");
        std::fs::write(&present, ">scaffold_1\nATCG\n").unwrap();
        assert!(require_output("SSPACE", present).is_ok());
    }
}
