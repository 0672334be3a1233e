//! Parsers for the text formats varsift reads.
//!
//! - **VCF files**: Streaming reader yielding a header and then one record per line
//! - **GWAS catalog lines**: Column layout detection and entry parsing
//!
//! Both accept plain or gzip compressed input (see [`crate::utils::io`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use varsift::parsing::vcf::VcfReader;
//! use std::path::Path;
//!
//! let reader = VcfReader::from_path(Path::new("calls.vcf.gz")).unwrap();
//! println!("{} samples", reader.header().sample_names().len());
//! for record in reader {
//!     let record = record.unwrap();
//!     println!("{}:{}", record.chromosome(), record.position());
//! }
//! ```

pub mod catalog;
pub mod vcf;
