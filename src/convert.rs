use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{OspreyError, Result};

/// Turns one raw long-read file into a readable sequence file.
///
/// `Ok(None)` means the raw file held no usable read; the event is simply
/// dropped. Tool failures are recoverable: the event is dropped and the run
/// continues.
pub trait ReadConverter: Send {
    fn convert(&self, raw: &Path) -> Result<Option<PathBuf>>;
}

/// Derived output path for a converted read: same path, extension swapped.
pub fn fasta_path_for(raw: &Path) -> PathBuf {
    raw.with_extension("fasta")
}

/// Converter that shells out to a poretools-style extractor.
///
/// The extractor prints the 2D read of the fast5 file in FASTA format on
/// stdout, or nothing when the file has no 2D read.
pub struct PoretoolsConverter {
    program: String,
}

impl PoretoolsConverter {
    pub fn new() -> Self {
        Self::with_program("poretools")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        PoretoolsConverter { program: program.into() }
    }
}

impl Default for PoretoolsConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadConverter for PoretoolsConverter {
    fn convert(&self, raw: &Path) -> Result<Option<PathBuf>> {
        let output = Command::new(&self.program)
            .arg("fasta")
            .arg("--type")
            .arg("2D")
            .arg(raw)
            .output()
            .map_err(|e| OspreyError::tool("converter", e.to_string()))?;

        if !output.status.success() {
            return Err(OspreyError::tool(
                "converter",
                format!("{} on {}", output.status, raw.display()),
            ));
        }
        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let target = fasta_path_for(raw);
        fs::write(&target, &output.stdout)
            .map_err(|e| OspreyError::io(format!("writing {}", target.display()), e))?;
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fasta_path_swaps_extension() {
        assert_eq!(
            fasta_path_for(Path::new("/run/reads/read_42.fast5")),
            PathBuf::from("/run/reads/read_42.fasta")
        );
    }

    #[test]
    fn test_empty_extractor_output_means_no_usable_read() {
        // `true` exits cleanly with empty stdout, like a fast5 with no 2D read.
        let dir = tempdir().unwrap();
        let raw = dir.path().join("read_1.fast5");
        std::fs::write(&raw, b"").unwrap();

        let converter = PoretoolsConverter::with_program("true");
        assert!(converter.convert(&raw).unwrap().is_none());
        assert!(!fasta_path_for(&raw).exists());
    }

    #[test]
    fn test_extractor_output_lands_in_derived_file() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("read_1.fast5");
        std::fs::write(&raw, b"").unwrap();

        // `echo` stands in for the extractor; its stdout becomes the record.
        let converter = PoretoolsConverter::with_program("echo");
        let fasta = converter.convert(&raw).unwrap().expect("stdout was non-empty");
        assert_eq!(fasta, dir.path().join("read_1.fasta"));
        assert!(fasta.exists());
    }

    #[test]
    fn test_missing_extractor_is_a_tool_failure() {
        let converter = PoretoolsConverter::with_program("no-such-extractor-binary");
        let err = converter.convert(Path::new("read_1.fast5")).unwrap_err();
        assert!(err.is_recoverable());
    }
}
