use serde::Serialize;

use crate::catalog::index::CatalogError;
use crate::core::chromosome::normalize_chromosome;

/// A single trait/position association from the GWAS catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    chromosome: String,
    position: u64,
    trait_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    trait_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rs_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pubmed_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gene: Option<String>,
}

impl CatalogEntry {
    /// Build an entry from the raw chromosome token, position and trait text.
    ///
    /// The chromosome is normalized and the trait code is derived from the
    /// trait text (see [`derive_trait_code`]). `line` is only used for error
    /// context.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MalformedEntry` if the chromosome is empty or the
    /// trait yields an empty code.
    pub fn new(
        chromosome: &str,
        position: u64,
        trait_name: &str,
        line: usize,
    ) -> Result<Self, CatalogError> {
        let chromosome = normalize_chromosome(chromosome);
        if chromosome.is_empty() {
            return Err(CatalogError::MalformedEntry {
                line,
                reason: "empty chromosome".to_string(),
            });
        }

        let trait_code = derive_trait_code(trait_name);
        if trait_code.is_empty() {
            return Err(CatalogError::MalformedEntry {
                line,
                reason: format!("trait '{}' has no usable characters", trait_name.trim()),
            });
        }

        Ok(Self {
            chromosome,
            position,
            trait_code,
            trait_name: Some(trait_name.trim().to_string()),
            rs_id: None,
            pubmed_id: None,
            gene: None,
        })
    }

    #[must_use]
    pub fn with_rs_id(mut self, rs_id: Option<&str>) -> Self {
        self.rs_id = non_empty(rs_id);
        self
    }

    #[must_use]
    pub fn with_pubmed_id(mut self, pubmed_id: Option<&str>) -> Self {
        self.pubmed_id = non_empty(pubmed_id);
        self
    }

    #[must_use]
    pub fn with_gene(mut self, gene: Option<&str>) -> Self {
        self.gene = non_empty(gene);
        self
    }

    /// Normalized chromosome name
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Trait identifier used in annotations
    pub fn trait_code(&self) -> &str {
        &self.trait_code
    }

    /// Trait text as it appears in the catalog
    pub fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    pub fn rs_id(&self) -> Option<&str> {
        self.rs_id.as_deref()
    }

    pub fn pubmed_id(&self) -> Option<&str> {
        self.pubmed_id.as_deref()
    }

    pub fn gene(&self) -> Option<&str> {
        self.gene.as_deref()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Turn free trait text into a code that is legal inside a VCF INFO value.
///
/// Each run of non-alphanumeric characters becomes a single `_`, and leading
/// or trailing underscores are dropped.
///
/// ```
/// use varsift::catalog::entry::derive_trait_code;
///
/// assert_eq!(derive_trait_code("Type 2 diabetes"), "Type_2_diabetes");
/// assert_eq!(derive_trait_code("Crohn's disease"), "Crohn_s_disease");
/// ```
#[must_use]
pub fn derive_trait_code(trait_name: &str) -> String {
    let mut code = String::with_capacity(trait_name.len());
    let mut pending_separator = false;

    for c in trait_name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !code.is_empty() {
                code.push('_');
            }
            pending_separator = false;
            code.push(c);
        } else {
            pending_separator = true;
        }
    }

    code
}
