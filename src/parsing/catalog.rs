//! Parser for GWAS catalog lines.
//!
//! The NHGRI-EBI GWAS catalog is distributed as a tab-delimited file with a
//! header row. Only a handful of columns matter here:
//!
//! | Column          | Meaning                     | Required |
//! |-----------------|-----------------------------|----------|
//! | `CHR_ID`        | Chromosome                  | Yes      |
//! | `CHR_POS`       | 1-based position            | Yes      |
//! | `DISEASE/TRAIT` | Free-text trait             | Yes      |
//! | `SNPS`          | rs identifier               | No       |
//! | `PUBMEDID`      | PubMed identifier           | No       |
//! | `MAPPED_GENE`   | Gene(s) mapped to the SNP   | No       |
//!
//! Files without a recognisable header are read positionally as
//! `chromosome, position, trait[, rs_id[, pubmed_id[, gene]]]`.

use crate::catalog::entry::CatalogEntry;
use crate::catalog::index::CatalogError;

const CHROMOSOME_COLUMNS: &[&str] = &["chr_id", "chrom", "chr", "chromosome"];
const POSITION_COLUMNS: &[&str] = &["chr_pos", "pos", "position"];
const TRAIT_COLUMNS: &[&str] = &["disease/trait", "trait"];
const RS_ID_COLUMNS: &[&str] = &["snps", "rsid", "snp"];
const PUBMED_COLUMNS: &[&str] = &["pubmedid", "pubmed_id"];
const GENE_COLUMNS: &[&str] = &["mapped_gene", "reported gene(s)", "gene"];

/// Where each field lives in a catalog line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub chromosome: usize,
    pub position: usize,
    pub trait_name: usize,
    pub rs_id: Option<usize>,
    pub pubmed_id: Option<usize>,
    pub gene: Option<usize>,
}

impl ColumnLayout {
    /// Layout for headerless files
    pub const POSITIONAL: ColumnLayout = ColumnLayout {
        chromosome: 0,
        position: 1,
        trait_name: 2,
        rs_id: Some(3),
        pubmed_id: Some(4),
        gene: Some(5),
    };

    /// Build a layout from a header row.
    ///
    /// Returns `None` unless the chromosome, position and trait columns are all
    /// present, in which case the line is not a header.
    pub fn from_header(fields: &[&str]) -> Option<Self> {
        let find = |names: &[&str]| {
            names.iter().find_map(|name| {
                fields
                    .iter()
                    .position(|f| f.trim().eq_ignore_ascii_case(name))
            })
        };

        Some(Self {
            chromosome: find(CHROMOSOME_COLUMNS)?,
            position: find(POSITION_COLUMNS)?,
            trait_name: find(TRAIT_COLUMNS)?,
            rs_id: find(RS_ID_COLUMNS),
            pubmed_id: find(PUBMED_COLUMNS),
            gene: find(GENE_COLUMNS),
        })
    }

    /// Parse one data line into an entry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MalformedEntry` if a required column is missing,
    /// the position is not an integer, or the entry itself is invalid.
    pub fn parse_line(&self, line: &str, line_num: usize) -> Result<CatalogEntry, CatalogError> {
        let fields: Vec<&str> = line.split('\t').collect();

        let required = |idx: usize, what: &str| {
            fields
                .get(idx)
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .ok_or_else(|| CatalogError::MalformedEntry {
                    line: line_num,
                    reason: format!("missing {what} column"),
                })
        };
        let optional = |idx: Option<usize>| idx.and_then(|i| fields.get(i).copied());

        let chromosome = required(self.chromosome, "chromosome")?;
        let position = required(self.position, "position")?;
        let trait_name = required(self.trait_name, "trait")?;

        let position: u64 = position.parse().map_err(|_| CatalogError::MalformedEntry {
            line: line_num,
            reason: format!("invalid position '{position}'"),
        })?;

        Ok(CatalogEntry::new(chromosome, position, trait_name, line_num)?
            .with_rs_id(optional(self.rs_id))
            .with_pubmed_id(optional(self.pubmed_id))
            .with_gene(optional(self.gene)))
    }
}
