use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::partition::joiner::PartitionJoiner;
use crate::utils::io::open_output;

#[derive(Args)]
pub struct JoinArgs {
    /// Split VCF files, in the order they should be joined
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the joined VCF here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute join subcommand
///
/// # Errors
///
/// Returns an error if the parts have different headers, a part cannot be
/// read, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: JoinArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Headers are checked before the output is created
    let joined = PartitionJoiner::open(&args.inputs)?;

    let mut out = open_output(args.output.as_deref()).context("Cannot create join output")?;
    let count = joined.write_to(&mut out)?;

    if verbose {
        match format {
            OutputFormat::Text => {
                eprintln!("Joined {count} records from {} files", args.inputs.len());
            }
            OutputFormat::Json => eprintln!(
                "{}",
                serde_json::json!({ "files": args.inputs.len(), "records": count })
            ),
            OutputFormat::Tsv => eprintln!("files\trecords\n{}\t{count}", args.inputs.len()),
        }
    }

    Ok(())
}
