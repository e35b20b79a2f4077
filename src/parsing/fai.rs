//! Parser for FASTA index (.fai) files using noodles.
//!
//! Format: `name\tlength\toffset\tline_bases\tline_width`

use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FAI format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// One record of a FASTA index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaiRecord {
    pub name: String,
    pub length: u64,
    pub offset: u64,
    pub line_bases: u64,
    pub line_width: u64,
}

/// Read a FASTA index (.fai) file using noodles
///
/// # Errors
///
/// Returns `FaiError::Io` if the file cannot be read, `FaiError::Noodles` if
/// parsing fails, or `FaiError::InvalidFormat` if the index has no entries.
pub fn read_fai(path: &Path) -> Result<Vec<FaiRecord>, FaiError> {
    use noodles::fasta;

    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| FaiError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    let mut records = Vec::new();
    for record in index.as_ref() {
        records.push(FaiRecord {
            name: String::from_utf8_lossy(record.name()).to_string(),
            length: record.length(),
            offset: record.offset(),
            line_bases: u64::from(record.line_bases()),
            line_width: u64::from(record.line_width()),
        });
    }

    if records.is_empty() {
        return Err(FaiError::InvalidFormat(
            "No entries found in FAI file".to_string(),
        ));
    }

    Ok(records)
}

/// Parse a FASTA index from text (fallback for raw text input)
///
/// # Errors
///
/// Returns `FaiError::InvalidFormat` if a line has too few fields, a
/// non-numeric field, or the text contains no entries.
pub fn parse_fai_text(text: &str) -> Result<Vec<FaiRecord>, FaiError> {
    let mut records = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 5 {
            return Err(FaiError::InvalidFormat(format!(
                "FAI line has {} fields, expected 5: {}",
                fields.len(),
                line
            )));
        }

        let name = fields[0].to_string();
        let parse_u64 = |label: &str, value: &str| {
            value.parse::<u64>().map_err(|_| {
                FaiError::InvalidFormat(format!("Invalid {label} for contig '{name}': {value}"))
            })
        };

        records.push(FaiRecord {
            length: parse_u64("length", fields[1])?,
            offset: parse_u64("offset", fields[2])?,
            line_bases: parse_u64("line_bases", fields[3])?,
            line_width: parse_u64("line_width", fields[4])?,
            name,
        });
    }

    if records.is_empty() {
        return Err(FaiError::InvalidFormat(
            "No entries found in FAI file".to_string(),
        ));
    }

    Ok(records)
}
