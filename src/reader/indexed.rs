//! The cached random-access reader.
//!
//! Control flow for a request: validate the interval against the catalog,
//! shortcut empty intervals, consult the [`RangeCache`], and on a miss fetch
//! an expanded forward window through the [`SequenceStore`], upper-case it,
//! and install it before slicing out the answer. Requests larger than the
//! cache budget bypass the cache entirely and leave the slot untouched.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::catalog::store::{CatalogError, ContigCatalog};
use crate::core::contig::ContigInfo;
use crate::core::range::Range;
use crate::parsing::fai::{read_fai, FaiError};
use crate::reader::cache::RangeCache;
use crate::reader::store::{FastaStore, SequenceStore, StoreError};

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Could not load fasta and/or fai for {path}: {source}")]
    Open { path: PathBuf, source: FaiError },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid interval {0}")]
    InvalidInterval(Range),

    #[error("Could not fetch bases for {range}: {source}")]
    Fetch { range: Range, source: StoreError },

    #[error("Reader is closed")]
    Closed,
}

/// Random-access sequence reader with a single-slot prefetch cache.
///
/// The reader owns the immutable [`ContigCatalog`], the mutable cache slot,
/// and an exclusive handle to the store. Cache consults mutate hidden state,
/// so retrieval takes `&mut self`; sharing one reader across threads without
/// a lock is rejected at compile time rather than racing at runtime. Give
/// each thread its own reader, or wrap one in a mutex held across the whole
/// call.
#[derive(Debug)]
pub struct IndexedSequenceReader<S> {
    catalog: ContigCatalog,
    cache: RangeCache,

    /// `None` once closed; closing is one-way
    store: Option<S>,
}

impl IndexedSequenceReader<FastaStore> {
    /// Open a FASTA file with an explicit index path.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Open` if the index cannot be loaded, or
    /// `ReaderError::Catalog` if the index is structurally corrupt.
    pub fn open(
        fasta_path: impl AsRef<Path>,
        fai_path: impl AsRef<Path>,
        cache_size_bases: u64,
    ) -> Result<Self, ReaderError> {
        let fasta_path = fasta_path.as_ref();

        let records = read_fai(fai_path.as_ref()).map_err(|source| ReaderError::Open {
            path: fasta_path.to_path_buf(),
            source,
        })?;
        let catalog = ContigCatalog::from_fai_records(&records)?;
        let store = FastaStore::open(fasta_path, &records).map_err(|source| match source {
            StoreError::Io(e) => ReaderError::Open {
                path: fasta_path.to_path_buf(),
                source: FaiError::Io(e),
            },
            // FastaStore::open otherwise only rejects unusable line
            // geometry, which means the index itself is broken.
            other => ReaderError::Catalog(CatalogError::Corrupt(other.to_string())),
        })?;

        Ok(Self::with_store(catalog, store, cache_size_bases))
    }

    /// Open a FASTA file whose index sits next to it as `<fasta>.fai`.
    ///
    /// # Errors
    ///
    /// Same as [`IndexedSequenceReader::open`].
    pub fn from_fasta(
        fasta_path: impl AsRef<Path>,
        cache_size_bases: u64,
    ) -> Result<Self, ReaderError> {
        let fasta_path = fasta_path.as_ref();
        let mut fai_path = fasta_path.as_os_str().to_owned();
        fai_path.push(".fai");
        Self::open(fasta_path, PathBuf::from(fai_path), cache_size_bases)
    }
}

impl<S: SequenceStore> IndexedSequenceReader<S> {
    /// Assemble a reader from its parts. Used by `open` and by tests that
    /// inject an in-memory store.
    pub fn with_store(catalog: ContigCatalog, store: S, cache_size_bases: u64) -> Self {
        Self {
            catalog,
            cache: RangeCache::new(cache_size_bases),
            store: Some(store),
        }
    }

    pub fn catalog(&self) -> &ContigCatalog {
        &self.catalog
    }

    /// Look up a contig by name
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownContig` if the name is absent.
    pub fn contig(&self, name: &str) -> Result<&ContigInfo, CatalogError> {
        self.catalog.lookup(name)
    }

    /// Whether the range names a known contig and satisfies
    /// `start <= end <= contig.length`
    pub fn is_valid_interval(&self, range: &Range) -> bool {
        match self.catalog.lookup(&range.reference_name) {
            Ok(contig) => range.start <= range.end && range.end <= contig.length,
            Err(_) => false,
        }
    }

    /// Retrieve the bases covered by a half-open interval, upper-cased.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Closed` after [`IndexedSequenceReader::close`],
    /// `ReaderError::InvalidInterval` for an unknown contig or a range
    /// violating `start <= end <= length`, and `ReaderError::Fetch` when the
    /// store cannot produce the bytes. A failed fetch never modifies the
    /// cache.
    pub fn get_bases(&mut self, range: &Range) -> Result<String, ReaderError> {
        if self.store.is_none() {
            return Err(ReaderError::Closed);
        }
        if !self.is_valid_interval(range) {
            return Err(ReaderError::InvalidInterval(range.clone()));
        }

        // The store cannot represent an empty fetch, so answer it here.
        if range.start == range.end {
            return Ok(String::new());
        }

        let use_cache = self.cache.covers(range.len());

        if use_cache {
            if let Some(hit) = self.cache.lookup(range) {
                return Ok(hit.to_string());
            }
        }

        // The window starts exactly at the requested start and extends
        // forward up to the cache budget or the contig end.
        let window = if use_cache {
            let n_bases = self.catalog.lookup(&range.reference_name)?.length;
            Range::new(
                range.reference_name.clone(),
                range.start,
                (range.start + self.cache.capacity()).min(n_bases),
            )
        } else {
            range.clone()
        };

        debug!(range = %range, window = %window, use_cache, "cache miss, fetching");

        // Public intervals are half-open; the store ends are inclusive.
        let store = self.store.as_mut().ok_or(ReaderError::Closed)?;
        let mut raw = store
            .fetch(&window.reference_name, window.start, window.end - 1)
            .map_err(|source| ReaderError::Fetch {
                range: range.clone(),
                source,
            })?;

        if raw.len() as u64 != window.len() {
            return Err(ReaderError::Fetch {
                range: range.clone(),
                source: StoreError::ShortFetch {
                    expected: window.len(),
                    actual: raw.len() as u64,
                },
            });
        }

        raw.make_ascii_uppercase();
        // The bases must convert byte-for-byte: a lossy conversion would
        // change the string length and break the window slicing below and
        // the cache's length invariant.
        let bases = String::from_utf8(raw).map_err(|e| ReaderError::Fetch {
            range: range.clone(),
            source: StoreError::InvalidBases(e.utf8_error().valid_up_to()),
        })?;

        if use_cache {
            let result = bases[..range.len() as usize].to_string();
            self.cache.install(window, bases);
            Ok(result)
        } else {
            Ok(bases)
        }
    }

    /// Iterate every contig in catalog order as `(name, full_sequence)`.
    ///
    /// Sequences are retrieved through the same cached path as
    /// [`IndexedSequenceReader::get_bases`]. The iterator borrows the reader
    /// mutably; re-traversal means calling `iterate` again.
    pub fn iterate(&mut self) -> ContigSequences<'_, S> {
        ContigSequences {
            reader: self,
            pos: 0,
        }
    }

    /// Release the store handle. Closing is one-way.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Closed` if the reader was already closed.
    pub fn close(&mut self) -> Result<(), ReaderError> {
        match self.store.take() {
            Some(_) => Ok(()),
            None => Err(ReaderError::Closed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }
}

/// Lazy traversal of all contigs, in catalog order
pub struct ContigSequences<'a, S> {
    reader: &'a mut IndexedSequenceReader<S>,
    pos: usize,
}

impl<S: SequenceStore> Iterator for ContigSequences<'_, S> {
    type Item = Result<(String, String), ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let contig = self.reader.catalog.contigs().get(self.pos)?.clone();
        self.pos += 1;

        let range = Range::new(contig.name.clone(), 0, contig.length);
        Some(
            self.reader
                .get_bases(&range)
                .map(|sequence| (contig.name, sequence)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory store with a fetch counter, for pinning cache behavior.
    struct MockStore {
        sequences: HashMap<String, String>,
        fetch_count: usize,
    }

    impl MockStore {
        fn new(sequences: &[(&str, &str)]) -> Self {
            Self {
                sequences: sequences
                    .iter()
                    .map(|(name, seq)| (name.to_string(), seq.to_string()))
                    .collect(),
                fetch_count: 0,
            }
        }
    }

    impl SequenceStore for MockStore {
        fn fetch(
            &mut self,
            name: &str,
            start: u64,
            end_inclusive: u64,
        ) -> Result<Vec<u8>, StoreError> {
            self.fetch_count += 1;
            let sequence = self
                .sequences
                .get(name)
                .ok_or_else(|| StoreError::UnknownSequence(name.to_string()))?;
            if end_inclusive < start || end_inclusive >= sequence.len() as u64 {
                return Err(StoreError::OutOfBounds {
                    name: name.to_string(),
                    start,
                    end_inclusive,
                });
            }
            Ok(sequence.as_bytes()[start as usize..=end_inclusive as usize].to_vec())
        }
    }

    /// A store that always fails, for cache-poisoning tests.
    struct FailingStore;

    impl SequenceStore for FailingStore {
        fn fetch(&mut self, name: &str, _: u64, _: u64) -> Result<Vec<u8>, StoreError> {
            Err(StoreError::UnknownSequence(name.to_string()))
        }
    }

    fn chr1_sequence() -> String {
        // 1000 bases with a position-dependent pattern so slices are distinctive.
        (0..1000)
            .map(|i| match i % 4 {
                0 => 'a',
                1 => 'c',
                2 => 'g',
                _ => 't',
            })
            .collect()
    }

    fn test_reader(cache_size_bases: u64) -> IndexedSequenceReader<MockStore> {
        let sequence = chr1_sequence();
        let catalog =
            ContigCatalog::from_contigs(vec![ContigInfo::new("chr1", 1000, 0)]).unwrap();
        IndexedSequenceReader::with_store(
            catalog,
            MockStore::new(&[("chr1", &sequence)]),
            cache_size_bases,
        )
    }

    #[test]
    fn test_prefetch_then_contained_hits() {
        let mut reader = test_reader(100);
        let expected = chr1_sequence().to_uppercase();

        // First small read pulls in the [0, 100) window.
        let bases = reader.get_bases(&Range::new("chr1", 0, 50)).unwrap();
        assert_eq!(bases, &expected[0..50]);
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 1);

        // Contained in the cached window: no store access.
        let bases = reader.get_bases(&Range::new("chr1", 10, 60)).unwrap();
        assert_eq!(bases, &expected[10..60]);
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 1);

        let bases = reader.get_bases(&Range::new("chr1", 99, 100)).unwrap();
        assert_eq!(bases, &expected[99..100]);
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 1);

        // Fits the budget but extends past window.end: a full miss that
        // replaces the window with [90, 190).
        let bases = reader.get_bases(&Range::new("chr1", 90, 150)).unwrap();
        assert_eq!(bases, &expected[90..150]);
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 2);
        assert_eq!(reader.cache.window(), Some(&Range::new("chr1", 90, 190)));
    }

    #[test]
    fn test_left_overlap_is_a_full_miss() {
        let mut reader = test_reader(100);

        reader.get_bases(&Range::new("chr1", 50, 60)).unwrap();
        assert_eq!(reader.cache.window(), Some(&Range::new("chr1", 50, 150)));

        // Starts before the cached window: the overlap is discarded, not merged.
        reader.get_bases(&Range::new("chr1", 40, 60)).unwrap();
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 2);
        assert_eq!(reader.cache.window(), Some(&Range::new("chr1", 40, 140)));
    }

    #[test]
    fn test_window_clipped_at_contig_end() {
        let mut reader = test_reader(100);

        let bases = reader.get_bases(&Range::new("chr1", 950, 1000)).unwrap();
        assert_eq!(bases.len(), 50);
        // Not [950, 1050): the expansion stops at the contig end.
        assert_eq!(reader.cache.window(), Some(&Range::new("chr1", 950, 1000)));
    }

    #[test]
    fn test_oversized_request_bypasses_cache() {
        let mut reader = test_reader(100);

        reader.get_bases(&Range::new("chr1", 0, 50)).unwrap();
        let cached = reader.cache.window().cloned();

        // 200 > 100: fetched directly, cache slot untouched.
        let bases = reader.get_bases(&Range::new("chr1", 300, 500)).unwrap();
        assert_eq!(bases.len(), 200);
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 2);
        assert_eq!(reader.cache.window(), cached.as_ref());

        // The old window still answers.
        reader.get_bases(&Range::new("chr1", 20, 80)).unwrap();
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 2);
    }

    #[test]
    fn test_cache_disabled() {
        let mut reader = test_reader(0);

        reader.get_bases(&Range::new("chr1", 0, 10)).unwrap();
        reader.get_bases(&Range::new("chr1", 0, 10)).unwrap();
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 2);
        assert!(reader.cache.window().is_none());
    }

    #[test]
    fn test_idempotent_and_uppercased() {
        let mut reader = test_reader(100);

        let first = reader.get_bases(&Range::new("chr1", 5, 25)).unwrap();
        let second = reader.get_bases(&Range::new("chr1", 5, 25)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
        assert!(first.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_empty_interval_skips_store() {
        let mut reader = test_reader(100);

        assert_eq!(reader.get_bases(&Range::new("chr1", 0, 0)).unwrap(), "");
        assert_eq!(reader.get_bases(&Range::new("chr1", 10, 10)).unwrap(), "");
        assert_eq!(reader.get_bases(&Range::new("chr1", 1000, 1000)).unwrap(), "");
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 0);
    }

    #[test]
    fn test_invalid_intervals() {
        let mut reader = test_reader(100);

        for range in [
            Range::new("unknown_chr", 0, 1),
            Range::new("chr1", 10, 9),
            Range::new("chr1", 0, 1001),
            Range::new("chr1", 1000, 1010),
        ] {
            assert!(!reader.is_valid_interval(&range));
            assert!(matches!(
                reader.get_bases(&range),
                Err(ReaderError::InvalidInterval(_))
            ));
        }
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 0);

        assert!(reader.is_valid_interval(&Range::new("chr1", 0, 1000)));
        assert!(reader.is_valid_interval(&Range::new("chr1", 999, 1000)));
    }

    #[test]
    fn test_contig_lookup() {
        let reader = test_reader(100);
        assert_eq!(reader.contig("chr1").unwrap().length, 1000);
        assert!(matches!(
            reader.contig("missing"),
            Err(CatalogError::UnknownContig(_))
        ));
    }

    /// A store whose bytes are not valid UTF-8, as from a corrupt FASTA body.
    struct ByteStore {
        bytes: Vec<u8>,
    }

    impl SequenceStore for ByteStore {
        fn fetch(
            &mut self,
            _name: &str,
            start: u64,
            end_inclusive: u64,
        ) -> Result<Vec<u8>, StoreError> {
            Ok(self.bytes[start as usize..=end_inclusive as usize].to_vec())
        }
    }

    #[test]
    fn test_corrupt_bytes_are_an_error_not_a_panic() {
        let catalog = ContigCatalog::from_contigs(vec![ContigInfo::new("chrM", 10, 0)]).unwrap();
        let mut reader = IndexedSequenceReader::with_store(
            catalog,
            ByteStore {
                bytes: b"A\xFFGTACGTAC".to_vec(),
            },
            100,
        );

        // The bad byte sits inside the prefetched window, so even a request
        // that stops before it must fail rather than install a window whose
        // char boundaries no longer line up with base coordinates.
        let err = reader.get_bases(&Range::new("chrM", 0, 2)).unwrap_err();
        assert!(matches!(
            err,
            ReaderError::Fetch {
                source: StoreError::InvalidBases(1),
                ..
            }
        ));
        assert!(reader.cache.window().is_none());
    }

    #[test]
    fn test_failed_fetch_does_not_poison_cache() {
        let catalog = ContigCatalog::from_contigs(vec![
            ContigInfo::new("chr1", 1000, 0),
            ContigInfo::new("chr2", 500, 1),
        ])
        .unwrap();
        let sequence = chr1_sequence();
        // chr2 is in the catalog but missing from the store, so its fetches fail.
        let mut reader = IndexedSequenceReader::with_store(
            catalog,
            MockStore::new(&[("chr1", &sequence)]),
            100,
        );

        reader.get_bases(&Range::new("chr1", 0, 50)).unwrap();
        let cached = reader.cache.window().cloned();

        assert!(matches!(
            reader.get_bases(&Range::new("chr2", 0, 50)),
            Err(ReaderError::Fetch { .. })
        ));
        assert_eq!(reader.cache.window(), cached.as_ref());

        // The surviving window still serves hits.
        reader.get_bases(&Range::new("chr1", 10, 60)).unwrap();
        assert_eq!(reader.store.as_ref().unwrap().fetch_count, 2);
    }

    #[test]
    fn test_close_semantics() {
        let mut reader = test_reader(100);

        reader.get_bases(&Range::new("chr1", 0, 10)).unwrap();
        reader.close().unwrap();
        assert!(reader.is_closed());

        assert!(matches!(
            reader.get_bases(&Range::new("chr1", 0, 10)),
            Err(ReaderError::Closed)
        ));
        assert!(matches!(reader.close(), Err(ReaderError::Closed)));
    }

    #[test]
    fn test_iterate_in_catalog_order() {
        let catalog = ContigCatalog::from_contigs(vec![
            ContigInfo::new("chrM", 8, 0),
            ContigInfo::new("chr1", 4, 1),
        ])
        .unwrap();
        let mut reader = IndexedSequenceReader::with_store(
            catalog,
            MockStore::new(&[("chrM", "gatcacag"), ("chr1", "acgt")]),
            100,
        );

        let records: Vec<_> = reader.iterate().map(Result::unwrap).collect();
        assert_eq!(
            records,
            vec![
                ("chrM".to_string(), "GATCACAG".to_string()),
                ("chr1".to_string(), "ACGT".to_string()),
            ]
        );

        // A fresh iterator starts over.
        assert_eq!(reader.iterate().count(), 2);
    }

    #[test]
    fn test_iterate_empty_catalog() {
        let catalog = ContigCatalog::from_contigs(Vec::new()).unwrap();
        let mut reader =
            IndexedSequenceReader::with_store(catalog, MockStore::new(&[]), 100);
        assert_eq!(reader.iterate().count(), 0);
    }
}
