use crate::annotate::Annotator;
use crate::catalog::entry::CatalogEntry;
use crate::catalog::index::CatalogIndex;
use crate::core::header::InfoDeclaration;
use crate::core::record::VcfRecord;

/// Default INFO field written by [`GwasCatalogAnnotator`]
pub const GWAS_CATALOG_FIELD: &str = "GWASCAT";

const GWAS_CATALOG_DESCRIPTION: &str =
    "Trait related to this chromosomal position, according to GWAS catalog";

/// Separator between trait codes in the annotation value
const TRAIT_SEPARATOR: &str = ",";

/// Annotates records with the traits the GWAS catalog reports at their position
pub struct GwasCatalogAnnotator<'a> {
    catalog: &'a CatalogIndex,
    field: String,
}

impl<'a> GwasCatalogAnnotator<'a> {
    pub fn new(catalog: &'a CatalogIndex) -> Self {
        Self::with_field(catalog, GWAS_CATALOG_FIELD)
    }

    /// Write trait codes to a custom INFO field
    pub fn with_field(catalog: &'a CatalogIndex, field: impl Into<String>) -> Self {
        Self {
            catalog,
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Annotator for GwasCatalogAnnotator<'_> {
    fn info_declarations(&self) -> Vec<InfoDeclaration> {
        vec![InfoDeclaration::new(
            self.field.clone(),
            ".",
            "String",
            GWAS_CATALOG_DESCRIPTION,
        )]
    }

    fn annotate(&self, record: &mut VcfRecord) -> bool {
        let matches = self.catalog.lookup(record.chromosome(), record.position());
        if matches.is_empty() {
            return false;
        }

        record.set_info(&self.field, join_trait_codes(matches));
        true
    }
}

/// Trait codes in lookup order, comma separated, duplicates kept
fn join_trait_codes(entries: &[CatalogEntry]) -> String {
    entries
        .iter()
        .map(CatalogEntry::trait_code)
        .collect::<Vec<_>>()
        .join(TRAIT_SEPARATOR)
}
