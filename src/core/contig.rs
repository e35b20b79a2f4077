use serde::{Deserialize, Serialize};

/// A single contig/sequence in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigInfo {
    /// Sequence name, unique within the catalog
    pub name: String,

    /// Sequence length in bases
    pub length: u64,

    /// Position of this contig in the source index file
    pub ordinal: usize,

    /// Free-text description from the FASTA header, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContigInfo {
    pub fn new(name: impl Into<String>, length: u64, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            length,
            ordinal,
            description: None,
        }
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
