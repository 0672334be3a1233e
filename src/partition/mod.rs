//! Splitting a VCF stream into parts and joining the parts back.
//!
//! - [`PartitionWriter`](writer::PartitionWriter) routes records to one file per
//!   chromosome, or to consecutive files holding a fixed number of records.
//!   Every part starts with the full original header, so each is a valid VCF.
//! - [`PartitionJoiner`](joiner::PartitionJoiner) concatenates parts in the
//!   order given by the caller after checking that all headers are identical.
//!
//! Splitting by chromosome and joining the parts in the order their
//! chromosomes first appeared reproduces the input exactly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use varsift::parsing::vcf::VcfReader;
//! use varsift::partition::{PartitionMode, PartitionNaming};
//! use varsift::partition::writer::PartitionWriter;
//! use varsift::partition::joiner::PartitionJoiner;
//!
//! let input = Path::new("calls.vcf");
//! let reader = VcfReader::from_path(input).unwrap();
//! let header = reader.header().clone();
//!
//! let naming = PartitionNaming::from_input(input).unwrap();
//! let writer = PartitionWriter::new(PartitionMode::ByChromosome, naming).unwrap();
//! let parts = writer.write(&header, reader).unwrap();
//!
//! let paths: Vec<PathBuf> = parts.into_iter().map(|p| p.path).collect();
//! let joined = PartitionJoiner::open(&paths).unwrap();
//! joined.write_to(&mut std::io::stdout().lock()).unwrap();
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parsing::vcf::ParseError;
use crate::utils::io::{is_gzipped, STDIO_PATH};
use crate::utils::validation::ValidationError;

pub mod joiner;
pub mod writer;

/// Extension of every partition file
pub const PARTITION_EXTENSION: &str = "vcf";

#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Invalid partition configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Cannot use chromosome '{key}' in a file name: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to write partition '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// How records are grouped into output files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionMode {
    /// One file per (normalized) chromosome
    ByChromosome,
    /// Consecutive files of at most this many records
    ByCount(usize),
}

impl PartitionMode {
    /// Pick a mode from the two mutually exclusive options.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError::InvalidConfiguration` if neither or both are
    /// selected, or if the record count is not positive.
    pub fn from_options(
        by_chromosome: bool,
        records_per_file: Option<i64>,
    ) -> Result<Self, PartitionError> {
        match (by_chromosome, records_per_file) {
            (true, None) => Ok(Self::ByChromosome),
            (false, Some(n)) => usize::try_from(n)
                .ok()
                .filter(|&n| n > 0)
                .map(Self::ByCount)
                .ok_or_else(|| {
                    PartitionError::InvalidConfiguration(format!(
                        "records per file must be positive, got {n}"
                    ))
                }),
            (true, Some(_)) => Err(PartitionError::InvalidConfiguration(
                "split by chromosome and by record count are mutually exclusive".to_string(),
            )),
            (false, None) => Err(PartitionError::InvalidConfiguration(
                "no partition mode selected".to_string(),
            )),
        }
    }

    pub(crate) fn validate(self) -> Result<Self, PartitionError> {
        match self {
            Self::ByCount(0) => Err(PartitionError::InvalidConfiguration(
                "records per file must be positive, got 0".to_string(),
            )),
            mode => Ok(mode),
        }
    }
}

/// Derives partition file names as `{base}.{key}.vcf`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionNaming {
    base: PathBuf,
}

impl PartitionNaming {
    /// Use an explicit prefix, e.g. `out/sample` gives `out/sample.1.vcf`
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        Self {
            base: prefix.into(),
        }
    }

    /// Derive the base from the input path by dropping its extension
    /// (and a trailing `.gz`/`.bgz`): `dir/in.vcf.gz` gives `dir/in`.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError::InvalidConfiguration` for stdin or a path
    /// without a file name.
    pub fn from_input(input: &Path) -> Result<Self, PartitionError> {
        if input.as_os_str() == STDIO_PATH {
            return Err(PartitionError::InvalidConfiguration(
                "cannot derive partition names from stdin, give an output prefix".to_string(),
            ));
        }

        let mut base = input.to_path_buf();
        if is_gzipped(&base) {
            base.set_extension("");
        }
        if base.extension().is_some() {
            base.set_extension("");
        }

        if base.file_name().is_none() {
            return Err(PartitionError::InvalidConfiguration(format!(
                "cannot derive partition names from '{}'",
                input.display()
            )));
        }

        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File name for a group key
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(format!(".{key}.{PARTITION_EXTENSION}"));
        PathBuf::from(name)
    }
}
