//! Single-slot prefetch cache for small reads.
//!
//! The cache holds at most one contiguous window of upper-cased bases. A
//! request is a hit only when it is fully contained in that window on the
//! same contig; any miss replaces the slot wholesale. There is no merging
//! and no multi-contig residency: a request overlapping the window's left
//! edge discards the overlap and refetches. Keeping the policy this plain
//! makes fetch counts predictable for scan workloads.

use tracing::trace;

use crate::core::range::Range;

/// The one cached window and its bases
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The contiguous interval the bases cover
    window: Range,

    /// Upper-cased bases; always exactly `window.len()` characters
    bases: String,
}

/// A zero-or-one-entry cache keyed by interval containment
#[derive(Debug)]
pub struct RangeCache {
    /// Maximum bases fetched into the slot; 0 disables caching entirely
    capacity: u64,

    entry: Option<CacheEntry>,
}

impl RangeCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            entry: None,
        }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Whether a request of `len` bases should go through the cache at all
    pub fn covers(&self, len: u64) -> bool {
        self.capacity > 0 && len <= self.capacity
    }

    /// Return the bases for `range` if the cached window fully contains it
    pub fn lookup(&self, range: &Range) -> Option<&str> {
        let entry = self.entry.as_ref()?;
        if !entry.window.contains(range) {
            return None;
        }
        trace!(range = %range, window = %entry.window, "cache hit");
        let offset = (range.start - entry.window.start) as usize;
        Some(&entry.bases[offset..offset + range.len() as usize])
    }

    /// Replace the slot with a freshly fetched window.
    ///
    /// The previous entry is discarded even if it was for another contig or
    /// overlapped the new window.
    pub fn install(&mut self, window: Range, bases: String) {
        debug_assert_eq!(bases.len() as u64, window.len());
        trace!(window = %window, "cache install");
        self.entry = Some(CacheEntry { window, bases });
    }

    /// The currently cached window, if any
    pub fn window(&self) -> Option<&Range> {
        self.entry.as_ref().map(|entry| &entry.window)
    }
}
