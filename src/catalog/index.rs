use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::entry::CatalogEntry;
use crate::core::chromosome::normalize_chromosome;
use crate::parsing::catalog::ColumnLayout;
use crate::utils::io::open_input;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog database '{}' is unavailable: {source}", path.display())]
    DatabaseUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog entry on line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },
}

/// In-memory GWAS catalog indexed by (chromosome, position).
///
/// The whole database is loaded up front, so the source file may be in any
/// order. Entries sharing a key are kept in load order.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    by_chromosome: HashMap<String, HashMap<u64, Vec<CatalogEntry>>>,
    entries: usize,
    skipped: usize,
}

impl CatalogIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file (plain or gzip compressed).
    ///
    /// Malformed lines are skipped and counted, see [`CatalogIndex::skipped`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DatabaseUnavailable` if the file cannot be
    /// opened or a read fails part-way through.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading catalog database '{}'", path.display());

        let unavailable = |source| CatalogError::DatabaseUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let reader = open_input(path).map_err(unavailable)?;
        let index = Self::from_reader(reader).map_err(unavailable)?;

        info!(
            "Loaded {} catalog entries on {} chromosomes ({} malformed lines skipped)",
            index.len(),
            index.chromosome_count(),
            index.skipped()
        );
        if index.is_empty() {
            warn!(
                "Catalog database '{}' has no usable entries; nothing will be annotated",
                path.display()
            );
        }
        Ok(index)
    }

    /// Build an index from catalog text.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut index = Self::new();
        let mut layout: Option<ColumnLayout> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = i + 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            // The first data-bearing line decides between header and positional layout
            if layout.is_none() {
                let fields: Vec<&str> = line.split('\t').collect();
                if let Some(found) = ColumnLayout::from_header(&fields) {
                    debug!("Catalog header found on line {line_num}: {found:?}");
                    layout = Some(found);
                    continue;
                }
            }
            let current = layout.get_or_insert(ColumnLayout::POSITIONAL);

            match current.parse_line(&line, line_num) {
                Ok(entry) => index.insert(entry),
                Err(e) => {
                    debug!("Skipping catalog line: {e}");
                    index.skipped += 1;
                }
            }
        }

        Ok(index)
    }

    /// Add an entry under its own (chromosome, position) key
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.by_chromosome
            .entry(entry.chromosome().to_string())
            .or_default()
            .entry(entry.position())
            .or_default()
            .push(entry);
        self.entries += 1;
    }

    /// All entries at exactly this position, in load order.
    ///
    /// The chromosome is normalized first, so `chr1` and `1` are the same key.
    pub fn lookup(&self, chromosome: &str, position: u64) -> &[CatalogEntry] {
        self.by_chromosome
            .get(&normalize_chromosome(chromosome))
            .and_then(|positions| positions.get(&position))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of entries indexed
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of malformed lines skipped while loading
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of distinct chromosomes
    pub fn chromosome_count(&self) -> usize {
        self.by_chromosome.len()
    }
}
