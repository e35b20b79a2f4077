//! Command-line interface for refwindow.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **contigs**: List the contigs of an indexed FASTA file
//! - **fetch**: Print the bases of one or more regions
//! - **dump**: Stream every sequence in the collection as FASTA
//!
//! ## Usage
//!
//! ```text
//! # List contigs with lengths
//! refwindow contigs genome.fa
//!
//! # Fetch two regions (0-based, half-open coordinates)
//! refwindow fetch genome.fa chr1:1000-1100 chr1:1050-1150
//!
//! # JSON output for scripting
//! refwindow contigs genome.fa --format json
//!
//! # Re-emit the whole collection, 60 bases per line
//! refwindow dump genome.fa --line-width 60
//! ```

use clap::{Parser, Subcommand};

pub mod contigs;
pub mod dump;
pub mod fetch;

#[derive(Parser)]
#[command(name = "refwindow")]
#[command(version)]
#[command(about = "Random-access retrieval of subsequences from indexed FASTA files")]
#[command(
    long_about = "refwindow retrieves subsequences from an indexed FASTA file by (name, start, end)\ncoordinates. Regions are 0-based and half-open, so chr1:0-100 covers the first 100 bases.\n\nA single-slot prefetch cache makes repeated small reads over nearby coordinates cheap;\ntune it with --cache-size on the fetch and dump commands."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the contigs of an indexed FASTA file
    Contigs(contigs::ContigsArgs),

    /// Print the bases covered by one or more regions
    Fetch(fetch::FetchArgs),

    /// Stream every sequence in the collection as FASTA
    Dump(dump::DumpArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
