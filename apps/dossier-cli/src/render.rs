//! Report output: JSON envelope and plain-text summary

use completeness_engine::{DocumentCatalog, ProcessType};
use serde::Serialize;
use shared_types::CompletenessReport;

use crate::input::LoadedPages;

/// JSON output: the report plus what it was computed from
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: &'a str,
    pub sha256: Option<&'a str>,
    pub process: Option<&'a str>,
    pub completeness_percent: f64,
    pub report: &'a CompletenessReport,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        loaded: &'a LoadedPages,
        process: Option<&'a str>,
        report: &'a CompletenessReport,
    ) -> Self {
        Self {
            source: &loaded.label,
            sha256: loaded.sha256.as_deref(),
            process,
            completeness_percent: percent(report),
            report,
        }
    }
}

/// Ratio as a percentage with one decimal
fn percent(report: &CompletenessReport) -> f64 {
    (report.completeness_ratio() * 1000.0).round() / 10.0
}

/// Human-readable checklist of found and missing documents
pub fn summary(
    report: &CompletenessReport,
    catalog: &DocumentCatalog,
    source: &str,
    process: Option<&str>,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Case file: {}", source));
    if let Some(process) = process {
        match ProcessType::parse_code(process) {
            Some(known) => lines.push(format!("Process: {}", known.name())),
            None => lines.push(format!("Process: {}", process)),
        }
    }
    if let Some(case_number) = &report.metadata.case_number {
        lines.push(format!("PROA: {}", case_number));
    }
    if let Some(date) = &report.metadata.incident_date {
        lines.push(format!("Incident date: {}", date));
    }
    lines.push(format!(
        "Pages analyzed: {} of {}",
        report.analyzed_pages, report.total_pages
    ));

    lines.push(String::new());
    lines.push(format!("FOUND ({})", report.found_documents.len()));
    for found in &report.found_documents {
        lines.push(format!(
            "  [x] {}{}: p. {}",
            found.document_name,
            citation(&found.legal_reference),
            found.page_ranges()
        ));
    }

    lines.push(String::new());
    lines.push(format!("MISSING ({})", report.missing_documents.len()));
    for name in &report.missing_documents {
        let mut line = format!("  [ ] {}", name);
        if let Some(signature) = catalog.get(name) {
            line.push_str(&citation(signature.legal_reference()));
            if let Some(page) = signature.reference_page() {
                line.push_str(&format!(", expected around p. {}", page));
            }
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(format!(
        "Completeness: {}/{} documents ({:.1}%)",
        report.found_documents.len(),
        report.catalog_size(),
        percent(report)
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn citation(reference: &str) -> String {
    if reference.is_empty() {
        String::new()
    } else {
        format!(" ({})", reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use completeness_engine::SignatureSpec;
    use pretty_assertions::assert_eq;
    use shared_types::PageRecord;

    fn catalog() -> DocumentCatalog {
        DocumentCatalog::new(vec![
            SignatureSpec::new("Portaria da Sindicância Especial")
                .legal_reference("NI 1.26 Art. 5º")
                .patterns([r"PORTARIA"])
                .reference_page(3),
            SignatureSpec::new("CNH").patterns([r"\bCNH\b"]),
            SignatureSpec::new("Atestado de Origem")
                .patterns(["ATESTADO DE ORIGEM"])
                .reference_page(17),
            SignatureSpec::new("RHE").patterns([r"\bRHE\b"]),
        ])
        .unwrap()
    }

    fn report() -> CompletenessReport {
        let pages = vec![
            PageRecord::new(1, "PROA nº 23/1203-0001234-5"),
            PageRecord::new(3, "PORTARIA Nº 045"),
            PageRecord::new(4, "CNH"),
            PageRecord::new(5, "CNH verso"),
            PageRecord::blank(6),
        ];
        completeness_engine::analyze_completeness(&pages, &catalog())
    }

    #[test]
    fn test_summary_layout() {
        let text = summary(&report(), &catalog(), "processo.pdf", Some("accident"));

        let expected = "\
Case file: processo.pdf
Process: Sindicância Especial de Acidente
PROA: 23/1203-0001234-5
Pages analyzed: 4 of 5

FOUND (2)
  [x] Portaria da Sindicância Especial (NI 1.26 Art. 5º): p. 3
  [x] CNH: p. 4-5

MISSING (2)
  [ ] Atestado de Origem, expected around p. 17
  [ ] RHE

Completeness: 2/4 documents (50.0%)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_custom_process_label_kept() {
        let text = summary(&report(), &catalog(), "x.json", Some("custom-audit"));
        assert!(text.contains("Process: custom-audit"));
    }

    #[test]
    fn test_json_envelope() {
        let report = report();
        let loaded = LoadedPages {
            label: "processo.pdf".to_string(),
            sha256: Some("ab".repeat(32)),
            pages: Vec::new(),
        };
        let envelope = JsonReport::new(&loaded, Some("accident"), &report);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["source"], "processo.pdf");
        assert_eq!(value["process"], "accident");
        assert_eq!(value["completeness_percent"], 50.0);
        assert_eq!(value["report"]["missing_documents"][1], "RHE");
        assert_eq!(value["report"]["found_documents"][1]["pages"][1], 5);
    }
}
