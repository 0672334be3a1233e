//! Record annotation.
//!
//! An [`Annotator`] declares the INFO fields it writes and annotates one
//! record at a time. [`AnnotationPass`] drives an annotator over a whole VCF
//! stream:
//!
//! 1. The header is extended with the annotator's declarations and written
//!    once, before the first record (or at end of input when there are none).
//! 2. Every record is annotated and written in input order.
//! 3. Processed/annotated counts are returned as [`AnnotationStats`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use varsift::annotate::AnnotationPass;
//! use varsift::annotate::gwas::GwasCatalogAnnotator;
//! use varsift::catalog::index::CatalogIndex;
//! use varsift::parsing::vcf::VcfReader;
//!
//! let catalog = CatalogIndex::load(Path::new("gwascatalog.txt")).unwrap();
//! let annotator = GwasCatalogAnnotator::new(&catalog);
//! let reader = VcfReader::from_path(Path::new("calls.vcf")).unwrap();
//!
//! let mut out = std::io::stdout().lock();
//! let stats = AnnotationPass::new(&annotator).run(reader, &mut out).unwrap();
//! eprintln!("{:.2}% annotated", stats.percent());
//! ```

use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::header::{InfoDeclaration, VcfHeader};
use crate::core::record::VcfRecord;
use crate::parsing::vcf::{ParseError, VcfReader};

pub mod gwas;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to write annotated output: {0}")]
    Io(#[from] io::Error),
}

/// Something that can add INFO fields to records
pub trait Annotator {
    /// INFO fields this annotator may set; declared in the header up front
    fn info_declarations(&self) -> Vec<InfoDeclaration>;

    /// Annotate a record in place. Returns `true` if anything was added.
    fn annotate(&self, record: &mut VcfRecord) -> bool;
}

/// Counts gathered during an annotation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    pub processed: usize,
    pub annotated: usize,
}

impl AnnotationStats {
    /// Percentage of processed records that were annotated (0 when empty)
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        100.0 * self.annotated as f64 / self.processed as f64
    }
}

/// Runs an [`Annotator`] over a VCF stream
pub struct AnnotationPass<'a, A: Annotator> {
    annotator: &'a A,
}

impl<'a, A: Annotator> AnnotationPass<'a, A> {
    pub fn new(annotator: &'a A) -> Self {
        Self { annotator }
    }

    /// Annotate every record from `reader` and write the result to `out`.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::Parse` on a malformed input record and
    /// `AnnotateError::Io` if writing fails.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: VcfReader<R>,
        out: &mut W,
    ) -> Result<AnnotationStats, AnnotateError> {
        let header = self.extended_header(reader.header());
        let mut header_written = false;
        let mut stats = AnnotationStats::default();

        for result in reader {
            let mut record = result?;

            if !header_written {
                header.write_to(out)?;
                header_written = true;
            }

            if self.annotator.annotate(&mut record) {
                stats.annotated += 1;
            }
            stats.processed += 1;

            writeln!(out, "{record}")?;
        }

        // Keep the output a valid VCF even without records
        if !header_written {
            header.write_to(out)?;
        }
        out.flush()?;

        debug!(
            "Annotation pass done: {} of {} records annotated",
            stats.annotated, stats.processed
        );
        Ok(stats)
    }

    fn extended_header(&self, header: &VcfHeader) -> VcfHeader {
        let mut header = header.clone();
        for declaration in self.annotator.info_declarations() {
            header.add_info(&declaration);
        }
        header
    }
}
