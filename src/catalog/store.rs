use std::collections::HashMap;

use thiserror::Error;

use crate::core::contig::ContigInfo;
use crate::parsing::fai::FaiRecord;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown contig {0}")]
    UnknownContig(String),

    #[error("Corrupt index: {0}")]
    Corrupt(String),
}

/// Ordered, immutable list of contigs with a name index
#[derive(Debug, Clone)]
pub struct ContigCatalog {
    /// Contigs in index order; position equals `ContigInfo::ordinal`
    contigs: Vec<ContigInfo>,

    /// Index: contig name -> index in contigs vec
    name_to_index: HashMap<String, usize>,
}

impl ContigCatalog {
    /// Build a catalog from parsed FASTA index records, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Corrupt` for an empty contig name or a
    /// duplicate name. Both indicate a structurally broken index rather than
    /// a missing contig, so they are kept distinct from `UnknownContig`.
    pub fn from_fai_records(records: &[FaiRecord]) -> Result<Self, CatalogError> {
        let contigs = records
            .iter()
            .enumerate()
            .map(|(ordinal, record)| ContigInfo::new(record.name.clone(), record.length, ordinal))
            .collect();
        Self::from_contigs(contigs)
    }

    /// Build a catalog from a pre-assembled contig list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Corrupt` for an empty or duplicate contig name.
    pub fn from_contigs(contigs: Vec<ContigInfo>) -> Result<Self, CatalogError> {
        let mut name_to_index = HashMap::with_capacity(contigs.len());

        for (index, contig) in contigs.iter().enumerate() {
            if contig.name.is_empty() {
                return Err(CatalogError::Corrupt(format!(
                    "contig at position {index} has an empty name"
                )));
            }
            if name_to_index.insert(contig.name.clone(), index).is_some() {
                return Err(CatalogError::Corrupt(format!(
                    "duplicate contig name {}",
                    contig.name
                )));
            }
        }

        Ok(Self {
            contigs,
            name_to_index,
        })
    }

    /// Look up a contig by name
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownContig` if the name is absent.
    pub fn lookup(&self, name: &str) -> Result<&ContigInfo, CatalogError> {
        self.name_to_index
            .get(name)
            .map(|&index| &self.contigs[index])
            .ok_or_else(|| CatalogError::UnknownContig(name.to_string()))
    }

    pub fn has_contig(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// All contigs in index order
    pub fn contigs(&self) -> &[ContigInfo] {
        &self.contigs
    }

    /// Contig names in index order
    pub fn names(&self) -> Vec<&str> {
        self.contigs.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of contigs in the catalog
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }
}
