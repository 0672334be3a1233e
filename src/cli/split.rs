use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::vcf::VcfReader;
use crate::partition::writer::{PartitionFile, PartitionWriter};
use crate::partition::{PartitionMode, PartitionNaming};

#[derive(Args)]
pub struct SplitArgs {
    /// Input VCF file (plain or gzip compressed). Use '-' for stdin (requires --prefix)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Split into files of this many records instead of one file per chromosome
    #[arg(short = 'l', long = "lines", allow_negative_numbers = true)]
    pub lines: Option<i64>,

    /// Output path prefix (default: input path without extension)
    #[arg(long)]
    pub prefix: Option<PathBuf>,
}

/// Execute split subcommand
///
/// # Errors
///
/// Returns an error for an invalid record count, an unreadable input, or a
/// part that cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SplitArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Validate before touching any file
    let mode = PartitionMode::from_options(args.lines.is_none(), args.lines)?;
    let naming = match &args.prefix {
        Some(prefix) => PartitionNaming::with_prefix(prefix),
        None => PartitionNaming::from_input(&args.input)?,
    };
    let writer = PartitionWriter::new(mode, naming)?;

    let reader = VcfReader::from_path(&args.input)?;
    let header = reader.header().clone();

    if verbose {
        eprintln!("Splitting '{}' ({mode:?})", args.input.display());
    }

    let files = writer.write(&header, reader)?;

    match format {
        OutputFormat::Text => print_text_files(&files),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&files)?),
        OutputFormat::Tsv => print_tsv_files(&files),
    }

    Ok(())
}

fn print_text_files(files: &[PartitionFile]) {
    for file in files {
        println!("{}", file.path.display());
    }
}

fn print_tsv_files(files: &[PartitionFile]) {
    println!("path\tkey\trecords");
    for file in files {
        println!("{}\t{}\t{}", file.path.display(), file.key, file.records);
    }
}
