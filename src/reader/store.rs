//! Physical access to sequence bytes.
//!
//! [`SequenceStore`] is the seam between the reader and the bytes on disk.
//! It addresses bases with an **inclusive** end, mirroring how faidx-style
//! indexes are consumed; the reader owns the translation from its public
//! half-open intervals. Keeping the seam a trait lets tests substitute an
//! in-memory store with a fetch counter.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::parsing::fai::FaiRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown sequence {0}")]
    UnknownSequence(String),

    #[error("Request [{start}, {end_inclusive}] out of bounds for {name}")]
    OutOfBounds {
        name: String,
        start: u64,
        end_inclusive: u64,
    },

    #[error("Fetched {actual} bases, expected {expected}")]
    ShortFetch { expected: u64, actual: u64 },

    #[error("Fetched bases are not valid UTF-8 (first bad byte at offset {0})")]
    InvalidBases(usize),

    #[error("Invalid line geometry for sequence {0}")]
    InvalidGeometry(String),
}

/// Byte-level access to named sequences, addressed with an inclusive end.
///
/// `fetch` must return exactly `end_inclusive - start + 1` bases or an error;
/// it never returns a partial window.
pub trait SequenceStore {
    /// Fetch bases `[start, end_inclusive]` (0-based, both ends included)
    /// from the named sequence.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for an unknown name, an out-of-bounds request,
    /// or an I/O failure.
    fn fetch(&mut self, name: &str, start: u64, end_inclusive: u64) -> Result<Vec<u8>, StoreError>;
}

/// Per-sequence byte layout taken from the FASTA index
#[derive(Debug, Clone)]
struct SequenceGeometry {
    length: u64,
    offset: u64,
    line_bases: u64,
    line_width: u64,
}

/// Random-access store over an uncompressed FASTA file and its .fai layout
#[derive(Debug)]
pub struct FastaStore {
    file: File,
    sequences: HashMap<String, SequenceGeometry>,
}

impl FastaStore {
    /// Open a FASTA file for random access using parsed index records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the FASTA cannot be opened, or
    /// `StoreError::InvalidGeometry` if a record's line layout is unusable
    /// (zero bases per line, or a line width shorter than its bases).
    pub fn open(path: &Path, records: &[FaiRecord]) -> Result<Self, StoreError> {
        let file = File::open(path)?;

        let mut sequences = HashMap::with_capacity(records.len());
        for record in records {
            if record.line_bases == 0 || record.line_width < record.line_bases {
                return Err(StoreError::InvalidGeometry(record.name.clone()));
            }
            sequences.insert(
                record.name.clone(),
                SequenceGeometry {
                    length: record.length,
                    offset: record.offset,
                    line_bases: record.line_bases,
                    line_width: record.line_width,
                },
            );
        }

        Ok(Self { file, sequences })
    }
}

impl SequenceStore for FastaStore {
    fn fetch(&mut self, name: &str, start: u64, end_inclusive: u64) -> Result<Vec<u8>, StoreError> {
        let geometry = self
            .sequences
            .get(name)
            .ok_or_else(|| StoreError::UnknownSequence(name.to_string()))?;

        if end_inclusive < start || end_inclusive >= geometry.length {
            return Err(StoreError::OutOfBounds {
                name: name.to_string(),
                start,
                end_inclusive,
            });
        }

        // Convert base coordinates to byte offsets. Each FASTA line holds
        // line_bases bases in line_width bytes.
        let start_line = start / geometry.line_bases;
        let end_line = end_inclusive / geometry.line_bases;

        let byte_start =
            geometry.offset + start_line * geometry.line_width + (start % geometry.line_bases);
        let byte_end = geometry.offset
            + end_line * geometry.line_width
            + (end_inclusive % geometry.line_bases)
            + 1;

        debug!(name, start, end_inclusive, byte_start, byte_end, "store fetch");

        let mut buf = vec![0u8; (byte_end - byte_start) as usize];
        self.file.seek(SeekFrom::Start(byte_start))?;
        self.file.read_exact(&mut buf)?;

        // Drop the line terminators interleaved with the bases.
        buf.retain(|&b| b != b'\n' && b != b'\r');

        let expected = end_inclusive - start + 1;
        if buf.len() as u64 != expected {
            return Err(StoreError::ShortFetch {
                expected,
                actual: buf.len() as u64,
            });
        }

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// A FASTA with 10-base lines: chrM spans three lines, chr1 one partial line.
    fn fixture() -> (NamedTempFile, Vec<FaiRecord>) {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chrM\nGATCACAGGT\nCTATCACCCT\nATTAA\n>chr1\nACGTAC\n")
            .unwrap();
        temp.flush().unwrap();

        let records = vec![
            FaiRecord {
                name: "chrM".to_string(),
                length: 25,
                offset: 6,
                line_bases: 10,
                line_width: 11,
            },
            FaiRecord {
                name: "chr1".to_string(),
                length: 6,
                offset: 40,
                line_bases: 10,
                line_width: 11,
            },
        ];
        (temp, records)
    }

    #[test]
    fn test_fetch_within_one_line() {
        let (temp, records) = fixture();
        let mut store = FastaStore::open(temp.path(), &records).unwrap();

        assert_eq!(store.fetch("chrM", 0, 9).unwrap(), b"GATCACAGGT");
        assert_eq!(store.fetch("chrM", 3, 6).unwrap(), b"CACA");
        assert_eq!(store.fetch("chrM", 0, 0).unwrap(), b"G");
    }

    #[test]
    fn test_fetch_across_lines_strips_newlines() {
        let (temp, records) = fixture();
        let mut store = FastaStore::open(temp.path(), &records).unwrap();

        assert_eq!(store.fetch("chrM", 8, 12).unwrap(), b"GTCTA");
        assert_eq!(
            store.fetch("chrM", 0, 24).unwrap(),
            b"GATCACAGGTCTATCACCCTATTAA"
        );
    }

    #[test]
    fn test_fetch_second_sequence() {
        let (temp, records) = fixture();
        let mut store = FastaStore::open(temp.path(), &records).unwrap();

        assert_eq!(store.fetch("chr1", 0, 5).unwrap(), b"ACGTAC");
        assert_eq!(store.fetch("chr1", 2, 3).unwrap(), b"GT");
    }

    #[test]
    fn test_fetch_unknown_sequence() {
        let (temp, records) = fixture();
        let mut store = FastaStore::open(temp.path(), &records).unwrap();

        let err = store.fetch("chr9", 0, 1).unwrap_err();
        assert!(matches!(err, StoreError::UnknownSequence(name) if name == "chr9"));
    }

    #[test]
    fn test_fetch_out_of_bounds() {
        let (temp, records) = fixture();
        let mut store = FastaStore::open(temp.path(), &records).unwrap();

        assert!(matches!(
            store.fetch("chrM", 0, 25),
            Err(StoreError::OutOfBounds { .. })
        ));
        assert!(matches!(
            store.fetch("chrM", 10, 9),
            Err(StoreError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_open_rejects_bad_geometry() {
        let (temp, mut records) = fixture();
        records[0].line_bases = 0;

        let result = FastaStore::open(temp.path(), &records);
        assert!(matches!(result, Err(StoreError::InvalidGeometry(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let (_, records) = fixture();
        let result = FastaStore::open(Path::new("/nonexistent/genome.fa"), &records);
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
