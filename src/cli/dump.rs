use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::contigs::fai_sibling;
use crate::cli::OutputFormat;
use crate::reader::indexed::IndexedSequenceReader;
use crate::reader::unindexed::UnindexedFastaReader;

#[derive(Args)]
pub struct DumpArgs {
    /// Path to the FASTA file
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// Explicit path to the .fai index (defaults to <fasta>.fai)
    #[arg(long)]
    pub fai: Option<PathBuf>,

    /// Stream without an index (also handles gzip-compressed input)
    #[arg(long)]
    pub unindexed: bool,

    /// Prefetch cache budget in bases; 0 disables caching
    #[arg(long, default_value = "65536")]
    pub cache_size: u64,

    /// Bases per output line
    #[arg(long, default_value = "70")]
    pub line_width: usize,
}

pub fn run(args: DumpArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    anyhow::ensure!(
        matches!(format, OutputFormat::Text),
        "dump writes FASTA and only supports --format text"
    );
    anyhow::ensure!(args.line_width > 0, "--line-width must be at least 1");

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    if args.unindexed {
        let mut reader = UnindexedFastaReader::open(&args.fasta)
            .with_context(|| format!("could not open {}", args.fasta.display()))?;
        for result in reader.records()? {
            let (name, sequence) = result?;
            write_record(&mut out, &name, &sequence, args.line_width)?;
            if verbose {
                eprintln!("{name}: {} bases", sequence.len());
            }
        }
        return Ok(());
    }

    let fai_path = args.fai.unwrap_or_else(|| fai_sibling(&args.fasta));
    let mut reader = IndexedSequenceReader::open(&args.fasta, &fai_path, args.cache_size)
        .with_context(|| format!("could not open {}", args.fasta.display()))?;

    for result in reader.iterate() {
        let (name, sequence) = result?;
        write_record(&mut out, &name, &sequence, args.line_width)?;
        if verbose {
            eprintln!("{name}: {} bases", sequence.len());
        }
    }

    Ok(())
}

fn write_record(
    out: &mut impl Write,
    name: &str,
    sequence: &str,
    line_width: usize,
) -> anyhow::Result<()> {
    writeln!(out, ">{name}")?;
    for chunk in sequence.as_bytes().chunks(line_width) {
        out.write_all(chunk)?;
        writeln!(out)?;
    }
    Ok(())
}
