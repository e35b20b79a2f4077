//! Parsers for the positional index consumed at open time.
//!
//! A FASTA index (`.fai`) line carries everything needed for random access:
//!
//! | Field | Description |
//! |-------|-------------|
//! | name | Sequence name |
//! | length | Sequence length in bases |
//! | offset | Byte offset of the first base in the FASTA |
//! | `line_bases` | Bases per FASTA line |
//! | `line_width` | Bytes per FASTA line, including the newline |
//!
//! The catalog consumes name/length/order; the physical store consumes the
//! offset and line geometry.

pub mod fai;

pub use fai::{FaiError, FaiRecord};
