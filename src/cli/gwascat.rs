use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::annotate::gwas::{GwasCatalogAnnotator, GWAS_CATALOG_FIELD};
use crate::annotate::{AnnotationPass, AnnotationStats};
use crate::catalog::index::CatalogIndex;
use crate::cli::OutputFormat;
use crate::parsing::vcf::VcfReader;
use crate::utils::io::{open_output, STDIO_PATH};

/// Environment variable holding the catalog database path
pub const GWASCAT_DB_ENV: &str = "VARSIFT_GWASCAT_DB";

#[derive(Args)]
pub struct GwascatArgs {
    /// Input VCF file (plain or gzip compressed). Use '-' for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// GWAS catalog database (tab-delimited, optionally gzip compressed)
    #[arg(long, env = GWASCAT_DB_ENV)]
    pub db: Option<PathBuf>,

    /// INFO field receiving the trait codes
    #[arg(long, default_value = GWAS_CATALOG_FIELD)]
    pub field: String,

    /// Write the annotated VCF here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute gwascat subcommand
///
/// # Errors
///
/// Returns an error if no database is configured, the database or input
/// cannot be read, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: GwascatArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let db = args.db.as_ref().ok_or_else(|| {
        anyhow::anyhow!("No GWAS catalog database given; use --db or set {GWASCAT_DB_ENV}")
    })?;

    if verbose {
        eprintln!(
            "Annotating\n\tInput file    : '{}'\n\tDatabase file : '{}'",
            input_label(&args.input),
            db.display()
        );
    }

    let catalog = CatalogIndex::load(db)?;
    if verbose {
        eprintln!(
            "Loaded {} catalog entries ({} malformed lines skipped)",
            catalog.len(),
            catalog.skipped()
        );
    }

    let annotator = GwasCatalogAnnotator::with_field(&catalog, &args.field);
    let reader = VcfReader::from_path(&args.input)?;
    let mut out = open_output(args.output.as_deref())
        .with_context(|| format!("Cannot create output for '{}'", input_label(&args.input)))?;

    let stats = AnnotationPass::new(&annotator).run(reader, &mut out)?;

    if verbose {
        print_stats(&stats, format)?;
    }

    Ok(())
}

fn input_label(input: &Path) -> String {
    if input.as_os_str() == STDIO_PATH {
        "STDIN".to_string()
    } else {
        input.display().to_string()
    }
}

/// Summary goes to stderr; stdout carries the VCF
fn print_stats(stats: &AnnotationStats, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            eprintln!("Done.");
            eprintln!("\tTotal annotated entries : {}", stats.annotated);
            eprintln!("\tTotal entries           : {}", stats.processed);
            eprintln!("\tPercent                 : {:.2}%", stats.percent());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "annotated": stats.annotated,
                "processed": stats.processed,
                "percent": stats.percent(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            eprintln!("annotated\tprocessed\tpercent");
            eprintln!(
                "{}\t{}\t{:.4}",
                stats.annotated,
                stats.processed,
                stats.percent()
            );
        }
    }
    Ok(())
}
