//! Iterate-only reader for FASTA files without an index.
//!
//! Random access needs the `.fai` byte layout, but whole-collection
//! traversal does not. This reader streams records straight out of a plain
//! or gzip-compressed FASTA, yielding each sequence upper-cased in file
//! order. There is no catalog and no cache; `get_bases`-style addressing is
//! not offered.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnindexedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA record: {0}")]
    Parse(String),

    #[error("Reader is closed")]
    Closed,
}

/// Streaming reader over an unindexed FASTA file
pub struct UnindexedFastaReader {
    /// `None` once closed; closing is one-way
    reader: Option<fasta::io::Reader<Box<dyn BufRead>>>,
}

impl UnindexedFastaReader {
    /// Open a plain or gzip-compressed FASTA file.
    ///
    /// # Errors
    ///
    /// Returns `UnindexedError::Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UnindexedError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;

        let inner: Box<dyn BufRead> = if is_gzipped(path) {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self {
            reader: Some(fasta::io::Reader::new(inner)),
        })
    }

    /// Iterate `(name, uppercased_sequence)` pairs in file order.
    ///
    /// # Errors
    ///
    /// Returns `UnindexedError::Closed` if the reader was closed; individual
    /// items carry `UnindexedError::Parse` for malformed records.
    pub fn records(
        &mut self,
    ) -> Result<impl Iterator<Item = Result<(String, String), UnindexedError>> + '_, UnindexedError>
    {
        let reader = self.reader.as_mut().ok_or(UnindexedError::Closed)?;

        Ok(reader.records().map(|result| {
            result
                .map_err(|e| UnindexedError::Parse(e.to_string()))
                .map(|record| {
                    let name = String::from_utf8_lossy(record.name()).to_string();
                    let mut sequence = record.sequence().as_ref().to_vec();
                    sequence.make_ascii_uppercase();
                    (name, String::from_utf8_lossy(&sequence).into_owned())
                })
        }))
    }

    /// Release the file handle. Closing is one-way.
    ///
    /// # Errors
    ///
    /// Returns `UnindexedError::Closed` if the reader was already closed.
    pub fn close(&mut self) -> Result<(), UnindexedError> {
        match self.reader.take() {
            Some(_) => Ok(()),
            None => Err(UnindexedError::Closed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

/// Check if the path looks gzip-compressed
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FASTA: &[u8] = b">chrM mitochondrion\ngatcacaggt\nctatc\n>chr1\nACGTacgt\n";

    #[test]
    fn test_records_uppercased_in_file_order() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(FASTA).unwrap();
        temp.flush().unwrap();

        let mut reader = UnindexedFastaReader::open(temp.path()).unwrap();
        let records: Vec<_> = reader.records().unwrap().map(Result::unwrap).collect();

        assert_eq!(
            records,
            vec![
                ("chrM".to_string(), "GATCACAGGTCTATC".to_string()),
                ("chr1".to_string(), "ACGTACGT".to_string()),
            ]
        );
    }

    #[test]
    fn test_gzipped_input() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        let mut encoder = GzEncoder::new(&mut temp, Compression::default());
        encoder.write_all(FASTA).unwrap();
        encoder.finish().unwrap();
        temp.flush().unwrap();

        let mut reader = UnindexedFastaReader::open(temp.path()).unwrap();
        let records: Vec<_> = reader.records().unwrap().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, "chrM");
    }

    #[test]
    fn test_close_is_one_way() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(FASTA).unwrap();
        temp.flush().unwrap();

        let mut reader = UnindexedFastaReader::open(temp.path()).unwrap();
        reader.close().unwrap();
        assert!(reader.is_closed());
        assert!(matches!(reader.records(), Err(UnindexedError::Closed)));
        assert!(matches!(reader.close(), Err(UnindexedError::Closed)));
    }

    #[test]
    fn test_open_missing_file() {
        let result = UnindexedFastaReader::open("/nonexistent/genome.fa");
        assert!(matches!(result, Err(UnindexedError::Io(_))));
    }
}
