use flate2::read::MultiGzDecoder;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{OspreyError, Result};

/// Assembly-quality metrics for one FASTA file.
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyInfo {
    pub total_contigs: u64,
    pub total_length: u64,
    pub average_length: f64,
    pub n50: u64,
    pub contig_sizes: HashMap<String, u64>,
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .map_err(|e| OspreyError::io(format!("opening {}", path.display()), e))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Stream a FASTA file and compute contig count, N50 and per-contig sizes.
pub fn assembly_info(path: &Path) -> Result<AssemblyInfo> {
    let reader = open_fasta(path)?;
    let mut contig_sizes = HashMap::new();
    let mut current_id: Option<String> = None;
    let mut current_len: u64 = 0;

    for line in reader.lines() {
        let line =
            line.map_err(|e| OspreyError::io(format!("reading {}", path.display()), e))?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                contig_sizes.insert(id, current_len);
            }
            let id = header.split_whitespace().next().unwrap_or(header).to_string();
            current_id = Some(id);
            current_len = 0;
        } else if current_id.is_some() {
            current_len += line.trim().len() as u64;
        }
    }
    if let Some(id) = current_id.take() {
        contig_sizes.insert(id, current_len);
    }

    let mut lengths: Vec<u64> = contig_sizes.values().copied().collect();
    lengths.sort_unstable();
    let total: u64 = lengths.iter().sum();
    let total_contigs = lengths.len() as u64;
    let average_length = if total_contigs > 0 {
        total as f64 / total_contigs as f64
    } else {
        0.0
    };

    // N50: the contig length at which half the assembly is contained in
    // contigs of that length or longer.
    let mut acc = 0;
    let half_total = total / 2;
    let n50 = lengths
        .iter()
        .rev()
        .find(|&&len| {
            acc += len;
            acc >= half_total
        })
        .copied()
        .unwrap_or(0);

    Ok(AssemblyInfo {
        total_contigs,
        total_length: total,
        average_length,
        n50,
        contig_sizes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_assembly_info() {
        // Create a temporary FASTA file
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">contig_1").unwrap();
        writeln!(file, "ATCGATCGATCGATCGATCG").unwrap(); // 20 bp
        writeln!(file, ">contig_2 extra description").unwrap();
        writeln!(file, "GCTAGCTAGCTAGCTAGCTAGCTA").unwrap(); // 24 bp
        writeln!(file, ">contig_3").unwrap();
        writeln!(file, "ATCG").unwrap(); // 4 bp

        let info = assembly_info(file.path()).unwrap();

        assert_eq!(info.total_contigs, 3);
        assert_eq!(info.total_length, 48);
        assert_eq!(info.average_length, 16.0);
        assert_eq!(info.n50, 24); // N50 should be 24
        assert_eq!(info.contig_sizes["contig_1"], 20);
        assert_eq!(info.contig_sizes["contig_2"], 24);
        assert_eq!(info.contig_sizes["contig_3"], 4);
    }

    #[test]
    fn test_multiline_records_are_summed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">contig_1").unwrap();
        writeln!(file, "ATCGATCG").unwrap();
        writeln!(file, "ATCGATCG").unwrap();

        let info = assembly_info(file.path()).unwrap();
        assert_eq!(info.total_contigs, 1);
        assert_eq!(info.contig_sizes["contig_1"], 16);
    }

    #[test]
    fn test_gzipped_fasta_is_transparent() {
        let file = tempfile::Builder::new().suffix(".fa.gz").tempfile().unwrap();
        {
            let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
            writeln!(encoder, ">contig_1").unwrap();
            writeln!(encoder, "ATCGATCGATCG").unwrap();
            encoder.finish().unwrap();
        }

        let info = assembly_info(file.path()).unwrap();
        assert_eq!(info.total_contigs, 1);
        assert_eq!(info.contig_sizes["contig_1"], 12);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = assembly_info(Path::new("/no/such/assembly.fa")).unwrap_err();
        assert!(err.to_string().contains("assembly.fa"));
    }
}
