//! Fixed catalog of recap sheets, one per staff member.

use crate::error::{RecapError, Result};
use crate::models::Source;

/// Workbook holding every staff recap sheet.
pub const DEFAULT_SHEET_ID: &str = "12sCC92_qOCOTEGDsst_elS7gT4I1ko2CmPBqg9Y6NEU";

/// Built-in `(sheet key, staff name)` pairs, in display order.
pub const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("caleb%20recap", "Caleb"),
    ("yous%20recap", "Yous"),
    ("serbian%20recap", "Serbian"),
    ("cryp%20esports", "Cryp Esports"),
];

/// Build the CSV export URL for one sheet of a workbook.
pub fn sheet_export_url(sheet_id: &str, sheet_key: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
        sheet_id, sheet_key
    )
}

/// Immutable list of configured sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCatalog {
    sources: Vec<Source>,
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCES
                .iter()
                .map(|(key, name)| Source::new(*key, *name))
                .collect(),
        )
    }
}

impl SourceCatalog {
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Staff names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up the sources for `names`, preserving the order of `names`.
    ///
    /// Fails with [`RecapError::UnknownEntity`] on the first name that is not
    /// in the catalog.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Source>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.sources
                    .iter()
                    .find(|s| s.name == name)
                    .cloned()
                    .ok_or_else(|| RecapError::UnknownEntity(name.to_string()))
            })
            .collect()
    }
}
