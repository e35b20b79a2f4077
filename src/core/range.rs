use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("invalid region format, expected name:start-end: {0}")]
    InvalidFormat(String),

    #[error("invalid coordinate in region '{region}': {value}")]
    InvalidCoordinate { region: String, value: String },
}

/// A 0-based, half-open genomic interval: `[start, end)` on a named sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Name of the sequence this interval addresses
    pub reference_name: String,

    /// First base, 0-based inclusive
    pub start: u64,

    /// Past-the-end base, 0-based exclusive
    pub end: u64,
}

impl Range {
    pub fn new(reference_name: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            reference_name: reference_name.into(),
            start,
            end,
        }
    }

    /// Number of bases covered by this interval
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `other` lies entirely within this interval on the same sequence
    pub fn contains(&self, other: &Range) -> bool {
        self.reference_name == other.reference_name
            && self.start <= other.start
            && other.end <= self.end
    }

    /// Parse a region string of the form `name:start-end` (0-based, half-open).
    ///
    /// The name may itself contain colons (e.g. `HLA-A*01:01`), so the split
    /// is taken at the last colon.
    ///
    /// # Errors
    ///
    /// Returns `RangeParseError::InvalidFormat` if the separator structure is
    /// wrong, or `RangeParseError::InvalidCoordinate` if start/end are not
    /// unsigned integers.
    pub fn parse(region: &str) -> Result<Self, RangeParseError> {
        let (name, span) = region
            .rsplit_once(':')
            .ok_or_else(|| RangeParseError::InvalidFormat(region.to_string()))?;

        if name.is_empty() {
            return Err(RangeParseError::InvalidFormat(region.to_string()));
        }

        let (start, end) = span
            .split_once('-')
            .ok_or_else(|| RangeParseError::InvalidFormat(region.to_string()))?;

        let parse_coord = |value: &str| {
            value
                .parse::<u64>()
                .map_err(|_| RangeParseError::InvalidCoordinate {
                    region: region.to_string(),
                    value: value.to_string(),
                })
        };

        Ok(Self::new(name, parse_coord(start)?, parse_coord(end)?))
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.reference_name, self.start, self.end)
    }
}
