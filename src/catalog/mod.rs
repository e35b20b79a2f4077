//! The ordered contig catalog.
//!
//! The catalog is loaded once from the FASTA index at open time and is
//! immutable afterwards. It preserves the order contigs appear in the index
//! (the `ordinal` of each [`crate::ContigInfo`]), which also defines the
//! order of whole-collection iteration.
//!
//! ## Example
//!
//! ```rust
//! use refwindow::catalog::store::ContigCatalog;
//! use refwindow::parsing::fai::parse_fai_text;
//!
//! let records = parse_fai_text("chrM\t100\t6\t70\t71\nchr1\t76\t114\t70\t71\n").unwrap();
//! let catalog = ContigCatalog::from_fai_records(&records).unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.lookup("chr1").unwrap().ordinal, 1);
//! ```

pub mod store;

pub use store::{CatalogError, ContigCatalog};
