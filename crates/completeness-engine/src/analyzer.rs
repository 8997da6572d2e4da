//! Found/missing classification and page-range formatting

use std::collections::{BTreeMap, BTreeSet};

pub use shared_types::format_ranges;
use shared_types::{CaseMetadata, CompletenessReport, MatchResult};

use crate::catalog::DocumentCatalog;
use crate::error::RangeError;

/// Classify every catalog entry as found or missing
///
/// Entries come out in catalog order. Names in `matches` that the catalog
/// does not know are ignored, as are empty page lists.
pub fn analyze(
    matches: &BTreeMap<String, Vec<u32>>,
    catalog: &DocumentCatalog,
    total_pages: u32,
    analyzed_pages: u32,
) -> CompletenessReport {
    let mut found_documents = Vec::new();
    let mut missing_documents = Vec::new();

    for signature in catalog {
        match matches.get(signature.name()) {
            Some(pages) if !pages.is_empty() => {
                let pages: BTreeSet<u32> = pages.iter().copied().collect();
                found_documents.push(MatchResult {
                    document_name: signature.name().to_string(),
                    legal_reference: signature.legal_reference().to_string(),
                    pages: pages.into_iter().collect(),
                });
            }
            _ => missing_documents.push(signature.name().to_string()),
        }
    }

    CompletenessReport {
        found_documents,
        missing_documents,
        total_pages,
        analyzed_pages: analyzed_pages.min(total_pages),
        metadata: CaseMetadata::default(),
        checked_at: chrono::Utc::now().timestamp() as u64,
    }
}

/// Parse run notation like `1-3, 5, 8-10` into sorted unique pages
pub fn parse_ranges(input: &str) -> Result<Vec<u32>, RangeError> {
    let mut pages = BTreeSet::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start = parse_page(start)?;
            let end = parse_page(end)?;
            if start > end {
                return Err(RangeError::Reversed { start, end });
            }
            pages.extend(start..=end);
        } else {
            pages.insert(parse_page(part)?);
        }
    }

    Ok(pages.into_iter().collect())
}

fn parse_page(text: &str) -> Result<u32, RangeError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| RangeError::InvalidPage(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SignatureSpec;
    use pretty_assertions::assert_eq;

    fn catalog() -> DocumentCatalog {
        DocumentCatalog::new(vec![
            SignatureSpec::new("Portaria da Sindicância Especial")
                .legal_reference("NI 1.26 Art. 5º")
                .keywords(["portaria"]),
            SignatureSpec::new("Parte de acidente").keywords(["parte"]),
            SignatureSpec::new("Atestado de Origem").keywords(["atestado"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_ranges_examples() {
        assert_eq!(format_ranges(&[1, 2, 3, 5, 6, 8]), "1-3, 5-6, 8");
        assert_eq!(format_ranges(&[]), "");
        assert_eq!(format_ranges(&[4]), "4");
        assert_eq!(format_ranges(&[2, 4, 6]), "2, 4, 6");
        assert_eq!(format_ranges(&[10, 11]), "10-11");
    }

    #[test]
    fn test_format_ranges_at_integer_limit() {
        assert_eq!(format_ranges(&[u32::MAX - 1, u32::MAX]), format!("{}-{}", u32::MAX - 1, u32::MAX));
    }

    #[test]
    fn test_parse_ranges() {
        assert_eq!(parse_ranges("1-3, 5, 8-10").unwrap(), vec![1, 2, 3, 5, 8, 9, 10]);
        assert_eq!(parse_ranges("1-3, 2-4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(parse_ranges("").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_ranges_errors() {
        assert_eq!(
            parse_ranges("5-2"),
            Err(RangeError::Reversed { start: 5, end: 2 })
        );
        assert_eq!(
            parse_ranges("1, x"),
            Err(RangeError::InvalidPage("x".to_string()))
        );
    }

    #[test]
    fn test_analyze_splits_found_and_missing_in_catalog_order() {
        let mut matches = BTreeMap::new();
        matches.insert("Atestado de Origem".to_string(), vec![17]);
        matches.insert("Portaria da Sindicância Especial".to_string(), vec![3, 4]);

        let report = analyze(&matches, &catalog(), 20, 18);

        let found: Vec<&str> = report
            .found_documents
            .iter()
            .map(|r| r.document_name.as_str())
            .collect();
        assert_eq!(found, vec!["Portaria da Sindicância Especial", "Atestado de Origem"]);
        assert_eq!(report.missing_documents, vec!["Parte de acidente"]);
        assert_eq!(
            report.found("Portaria da Sindicância Especial").unwrap().legal_reference,
            "NI 1.26 Art. 5º"
        );
        assert_eq!(report.total_pages, 20);
        assert_eq!(report.analyzed_pages, 18);
    }

    #[test]
    fn test_analyze_treats_empty_page_list_as_missing() {
        let mut matches = BTreeMap::new();
        matches.insert("Parte de acidente".to_string(), vec![]);
        let report = analyze(&matches, &catalog(), 1, 1);
        assert!(report.is_missing("Parte de acidente"));
        assert!(report.found("Parte de acidente").is_none());
    }

    #[test]
    fn test_analyze_ignores_unknown_names() {
        let mut matches = BTreeMap::new();
        matches.insert("Documento estranho".to_string(), vec![1]);
        let report = analyze(&matches, &catalog(), 1, 1);
        assert!(report.found_documents.is_empty());
        assert_eq!(report.missing_documents.len(), 3);
    }

    #[test]
    fn test_analyze_sorts_pages() {
        let mut matches = BTreeMap::new();
        matches.insert("Parte de acidente".to_string(), vec![9, 2, 9, 5]);
        let report = analyze(&matches, &catalog(), 10, 10);
        assert_eq!(report.found("Parte de acidente").unwrap().pages, vec![2, 5, 9]);
    }

    #[test]
    fn test_analyzed_pages_capped_by_total() {
        let report = analyze(&BTreeMap::new(), &catalog(), 3, 7);
        assert_eq!(report.analyzed_pages, 3);
    }
}
