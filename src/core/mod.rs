//! Core data types for VCF processing.
//!
//! - [`VcfHeader`](header::VcfHeader): The meta-information and column header lines
//! - [`VcfRecord`](record::VcfRecord): One data line, kept as its original columns
//! - [`normalize_chromosome`](chromosome::normalize_chromosome): Canonical chromosome names
//!
//! ## Chromosome Naming
//!
//! Different sources name the same chromosome differently:
//!
//! | Source        | Chromosome 1 | Chromosome X |
//! |---------------|--------------|--------------|
//! | UCSC          | chr1         | chrX         |
//! | NCBI, Ensembl | 1            | X            |
//! | GWAS catalog  | 1            | X            |
//!
//! Lookups and partition keys always use the normalized name, while records
//! keep the name they were read with.

pub mod chromosome;
pub mod header;
pub mod record;
