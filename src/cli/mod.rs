//! Command-line interface for varsift.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **gwascat**: Annotate a VCF file with traits from the GWAS catalog
//! - **split**: Split a VCF file by chromosome or into fixed-size parts
//! - **join**: Join previously split parts back into one VCF file
//!
//! ## Usage
//!
//! ```text
//! # Annotate, database given explicitly
//! varsift gwascat --db gwascatalog.txt calls.vcf > calls.gwas.vcf
//!
//! # Database path from the environment, VCF from stdin
//! export VARSIFT_GWASCAT_DB=gwascatalog.txt
//! cat calls.vcf | varsift gwascat - > calls.gwas.vcf
//!
//! # One file per chromosome: calls.1.vcf, calls.2.vcf, ...
//! varsift split calls.vcf
//!
//! # 10000 records per file: calls.0.vcf, calls.1.vcf, ...
//! varsift split -l 10000 calls.vcf
//!
//! # Join parts in the given order
//! varsift join calls.1.vcf calls.2.vcf > calls.vcf
//! ```

use clap::{Parser, Subcommand};

pub mod gwascat;
pub mod join;
pub mod split;

#[derive(Parser)]
#[command(name = "varsift")]
#[command(version)]
#[command(about = "Annotate VCF files with GWAS catalog traits, split and join VCF files")]
#[command(
    long_about = "varsift works on VCF files as plain streams.\n\nIt can:\n- Annotate records with the traits reported by the GWAS catalog at their position\n- Split a file into one part per chromosome, or into parts of N records\n- Join the parts back into the original file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for summaries
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate a VCF file using the GWAS catalog
    Gwascat(gwascat::GwascatArgs),

    /// Split a VCF file into several files
    Split(split::SplitArgs),

    /// Join split VCF files
    Join(join::JoinArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
