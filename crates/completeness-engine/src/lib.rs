//! Completeness audit for administrative case files
//!
//! Given the text of every page of a case file and a catalog of legally
//! required documents, find which documents are present (and on which
//! pages) and which are missing.
//!
//! Flow: pages → blank filter → normalization → matching against the
//! catalog → per-document page lists → completeness report.

pub mod analyzer;
pub mod blank;
pub mod catalog;
pub mod catalogs;
pub mod error;
pub mod extractors;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod process;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use shared_types::{CompletenessReport, PageRecord};
use tracing::info;

pub use analyzer::{analyze, format_ranges, parse_ranges};
pub use blank::BlankPageFilter;
pub use catalog::{CatalogConfig, DocumentCatalog, DocumentSignature, SignatureSpec};
pub use error::{AuditError, CatalogError, OcrError, RangeError, RasterError};
pub use matcher::{match_all, match_page};
pub use normalize::normalize;
pub use pipeline::{OcrEngine, PagePipeline, PageSource, PipelineConfig, Rasterizer};
pub use process::ProcessType;

/// Audit a case file whose page text is already known
pub fn analyze_completeness(pages: &[PageRecord], catalog: &DocumentCatalog) -> CompletenessReport {
    let matches = match_all(pages, catalog);
    build_report(pages, &matches, catalog)
}

/// Assemble the report once matching is done
pub(crate) fn build_report(
    pages: &[PageRecord],
    matches: &BTreeMap<String, Vec<u32>>,
    catalog: &DocumentCatalog,
) -> CompletenessReport {
    let total_pages = pages
        .iter()
        .map(|p| p.page_number)
        .collect::<BTreeSet<_>>()
        .len() as u32;
    let analyzed_pages = pages
        .iter()
        .filter(|p| p.is_analyzed())
        .map(|p| p.page_number)
        .collect::<BTreeSet<_>>()
        .len() as u32;

    let mut report = analyze(matches, catalog, total_pages, analyzed_pages);
    report.metadata = extractors::extract_case_metadata(pages);

    info!(
        "Analyzed {}/{} pages: {} documents found, {} missing",
        report.analyzed_pages,
        report.total_pages,
        report.found_documents.len(),
        report.missing_documents.len()
    );

    report
}

/// CompletenessEngine entry point
///
/// Owns a validated catalog and shares it read-only with every analysis.
#[derive(Debug, Clone)]
pub struct CompletenessEngine {
    catalog: Arc<DocumentCatalog>,
}

impl CompletenessEngine {
    pub fn new(catalog: DocumentCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Engine using the built-in catalog of a process type
    pub fn for_process(process: ProcessType) -> Result<Self, CatalogError> {
        Ok(Self::new(process.catalog()?))
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    pub fn check_pages(&self, pages: &[PageRecord]) -> CompletenessReport {
        analyze_completeness(pages, &self.catalog)
    }

    /// Documents recognized in a single text (for testing)
    pub fn check_text(&self, text: &str) -> BTreeSet<String> {
        match_page(&PageRecord::new(1, text), &self.catalog)
    }

    /// Pipeline sharing this engine's catalog
    pub fn pipeline(&self, ocr: Arc<dyn OcrEngine>, config: PipelineConfig) -> PagePipeline {
        PagePipeline::new(ocr, Arc::clone(&self.catalog), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn engine() -> CompletenessEngine {
        CompletenessEngine::new(
            DocumentCatalog::new(vec![
                SignatureSpec::new("Atestado de Origem")
                    .patterns(["ATESTADO DE ORIGEM"])
                    .keywords(["atestado", "origem", "lesão"])
                    .reference_page(17),
                SignatureSpec::new("CNH").patterns([r"\bCNH\b"]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_blank_pages_excluded_from_analyzed_count() {
        let pages = vec![
            PageRecord::new(1, "ATESTADO DE ORIGEM"),
            PageRecord::blank(2),
            PageRecord::new(3, ""),
        ];
        let report = engine().check_pages(&pages);

        assert_eq!(report.total_pages, 3);
        assert_eq!(report.analyzed_pages, 1);
        assert_eq!(report.found("Atestado de Origem").unwrap().pages, vec![1]);
        assert_eq!(report.missing_documents, vec!["CNH"]);
    }

    #[test]
    fn test_report_carries_metadata() {
        let pages = vec![PageRecord::new(1, "PROA nº 21/1203-0004567-8 - Data do fato: 05/06/2021")];
        let report = engine().check_pages(&pages);

        assert_eq!(report.metadata.case_number.as_deref(), Some("21/1203-0004567-8"));
        assert_eq!(report.metadata.incident_date.as_deref(), Some("05/06/2021"));
    }

    #[test]
    fn test_check_text() {
        let found = engine().check_text("Cópia da CNH do condutor");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["CNH"]);
    }

    #[test]
    fn test_empty_document() {
        let report = engine().check_pages(&[]);
        assert_eq!(report.total_pages, 0);
        assert_eq!(report.analyzed_pages, 0);
        assert_eq!(report.missing_documents.len(), 2);
    }

    #[test]
    fn test_for_process_loads_builtin_catalog() {
        let engine = CompletenessEngine::for_process(ProcessType::Accident).unwrap();
        assert_eq!(engine.catalog().len(), 16);
    }
}
