//! The cached interval-retrieval engine.
//!
//! [`indexed::IndexedSequenceReader`] orchestrates validation, the
//! [`cache::RangeCache`] consult, and the fetch through a
//! [`store::SequenceStore`]. The cache holds at most one contiguous window;
//! small requests pull in a larger forward window once and later requests
//! contained in it are answered without touching the store.
//!
//! [`unindexed::UnindexedFastaReader`] is the iterate-only fallback for
//! FASTA files that have no index.

pub mod cache;
pub mod indexed;
pub mod store;
pub mod unindexed;

pub use cache::RangeCache;
pub use indexed::{IndexedSequenceReader, ReaderError};
pub use store::{FastaStore, SequenceStore, StoreError};
pub use unindexed::UnindexedFastaReader;
