//! # varsift
//!
//! A library for annotating and reorganizing VCF files.
//!
//! VCF records are handled as plain text lines: columns that are not edited are
//! written back byte for byte, so a file that goes through varsift without
//! annotation comes out unchanged.
//!
//! ## Features
//!
//! - **GWAS catalog annotation**: Tags each record with the trait codes that the
//!   GWAS catalog reports at its chromosome and position
//! - **Chromosome normalization**: `chr1`, `Chromosome1` and `1` are the same chromosome
//! - **Split by chromosome**: One valid VCF per chromosome
//! - **Split by record count**: Consecutive VCF files of N records
//! - **Join**: Concatenate split files after checking their headers match
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use varsift::{AnnotationPass, CatalogIndex, GwasCatalogAnnotator, VcfReader};
//!
//! let catalog = CatalogIndex::load(Path::new("gwascatalog.txt")).unwrap();
//! let annotator = GwasCatalogAnnotator::new(&catalog);
//!
//! let reader = VcfReader::from_path(Path::new("calls.vcf")).unwrap();
//! let mut out = std::io::stdout().lock();
//! let stats = AnnotationPass::new(&annotator).run(reader, &mut out).unwrap();
//!
//! eprintln!("{} of {} records annotated", stats.annotated, stats.processed);
//! ```
//!
//! ## Modules
//!
//! - [`annotate`]: Annotation passes and the GWAS catalog annotator
//! - [`catalog`]: GWAS catalog entries and the position index
//! - [`core`]: VCF header and record types, chromosome names
//! - [`parsing`]: Readers for VCF files and catalog lines
//! - [`partition`]: Splitting VCF files and joining the parts
//! - [`cli`]: Command-line interface implementation

pub mod annotate;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod partition;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotate::gwas::GwasCatalogAnnotator;
pub use annotate::{AnnotationPass, AnnotationStats, Annotator};
pub use catalog::entry::CatalogEntry;
pub use catalog::index::CatalogIndex;
pub use crate::core::chromosome::normalize_chromosome;
pub use crate::core::header::{InfoDeclaration, VcfHeader};
pub use crate::core::record::VcfRecord;
pub use parsing::vcf::VcfReader;
pub use partition::joiner::PartitionJoiner;
pub use partition::writer::{PartitionFile, PartitionWriter};
pub use partition::{PartitionMode, PartitionNaming};
