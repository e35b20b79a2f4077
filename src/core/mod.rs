//! Core data types shared across the library.
//!
//! - [`ContigInfo`]: A named sequence in the collection with its length and
//!   position in the source index
//! - [`Range`]: A 0-based, half-open genomic interval
//!
//! ## Coordinates
//!
//! All public coordinates are 0-based with an exclusive end, so
//! `chr1:0-100` covers the first 100 bases. The physical store underneath
//! uses inclusive end addressing; translating between the two conventions is
//! the reader's job and never leaks into these types.

pub mod contig;
pub mod range;

pub use contig::ContigInfo;
pub use range::Range;
