use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::fai::read_fai;
use crate::catalog::store::ContigCatalog;

#[derive(Args)]
pub struct ContigsArgs {
    /// Path to the FASTA file (its .fai index must exist)
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// Explicit path to the .fai index (defaults to <fasta>.fai)
    #[arg(long)]
    pub fai: Option<PathBuf>,
}

pub fn run(args: ContigsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let fai_path = args
        .fai
        .unwrap_or_else(|| fai_sibling(&args.fasta));

    let records = read_fai(&fai_path)
        .with_context(|| format!("could not load index {}", fai_path.display()))?;
    let catalog = ContigCatalog::from_fai_records(&records)?;

    if verbose {
        eprintln!(
            "Loaded {} contigs from {}",
            catalog.len(),
            fai_path.display()
        );
    }

    match format {
        OutputFormat::Text => {
            for contig in catalog.contigs() {
                println!("{}\t{} bp", contig.name, contig.length);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.contigs())?);
        }
        OutputFormat::Tsv => {
            println!("name\tlength\tordinal");
            for contig in catalog.contigs() {
                println!("{}\t{}\t{}", contig.name, contig.length, contig.ordinal);
            }
        }
    }

    Ok(())
}

/// Default index path: the FASTA path with ".fai" appended
pub fn fai_sibling(fasta: &std::path::Path) -> PathBuf {
    let mut path = fasta.as_os_str().to_owned();
    path.push(".fai");
    PathBuf::from(path)
}
