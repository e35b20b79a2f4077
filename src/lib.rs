//! # refwindow
//!
//! A library for random-access retrieval of subsequences from indexed FASTA
//! files, addressed by `(sequence-name, start, end)` half-open intervals.
//!
//! Tools that scan a genome in small sliding windows (pileup, realignment,
//! feature extraction) issue many overlapping or adjacent requests against
//! the same contig. Fetching each window straight from disk repeats most of
//! the work of the previous fetch. `refwindow` puts a single-slot prefetch
//! cache in front of the store: a small request pulls in a larger forward
//! window once, and subsequent requests contained in that window are served
//! without touching the file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use refwindow::{IndexedSequenceReader, Range};
//!
//! // Opens "genome.fa" and its sibling "genome.fa.fai" index.
//! let mut reader = IndexedSequenceReader::from_fasta("genome.fa", 64 * 1024).unwrap();
//!
//! let bases = reader.get_bases(&Range::new("chr1", 10_000, 10_050)).unwrap();
//! assert_eq!(bases.len(), 50);
//!
//! for result in reader.iterate() {
//!     let (name, sequence) = result.unwrap();
//!     println!(">{name} ({} bp)", sequence.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for contigs and genomic ranges
//! - [`catalog`]: The ordered contig catalog loaded from the index
//! - [`parsing`]: FASTA index (.fai) parsing
//! - [`reader`]: The cached reader, its cache, and the sequence store
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod reader;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, ContigCatalog};
pub use core::contig::ContigInfo;
pub use core::range::Range;
pub use reader::cache::RangeCache;
pub use reader::indexed::{IndexedSequenceReader, ReaderError};
pub use reader::store::{FastaStore, SequenceStore, StoreError};
pub use reader::unindexed::UnindexedFastaReader;
