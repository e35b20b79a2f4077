use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::contigs::fai_sibling;
use crate::cli::OutputFormat;
use crate::core::range::Range;
use crate::reader::indexed::IndexedSequenceReader;

#[derive(Args)]
pub struct FetchArgs {
    /// Path to the FASTA file (its .fai index must exist)
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// Regions to fetch, as name:start-end (0-based, half-open)
    #[arg(required = true)]
    pub regions: Vec<String>,

    /// Explicit path to the .fai index (defaults to <fasta>.fai)
    #[arg(long)]
    pub fai: Option<PathBuf>,

    /// Prefetch cache budget in bases; 0 disables caching
    #[arg(long, default_value = "65536")]
    pub cache_size: u64,
}

#[derive(Serialize)]
struct FetchedRegion {
    region: String,
    bases: String,
}

pub fn run(args: FetchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let fai_path = args.fai.unwrap_or_else(|| fai_sibling(&args.fasta));

    let mut reader = IndexedSequenceReader::open(&args.fasta, &fai_path, args.cache_size)
        .with_context(|| format!("could not open {}", args.fasta.display()))?;

    let mut fetched = Vec::with_capacity(args.regions.len());
    for region in &args.regions {
        let range = Range::parse(region)?;
        let bases = reader
            .get_bases(&range)
            .with_context(|| format!("could not fetch {region}"))?;
        if verbose {
            eprintln!("{range}: {} bases", bases.len());
        }
        fetched.push(FetchedRegion {
            region: range.to_string(),
            bases,
        });
    }

    match format {
        OutputFormat::Text => {
            for item in &fetched {
                println!("{}", item.bases);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fetched)?);
        }
        OutputFormat::Tsv => {
            println!("region\tbases");
            for item in &fetched {
                println!("{}\t{}", item.region, item.bases);
            }
        }
    }

    Ok(())
}
