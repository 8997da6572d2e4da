// Case metadata extraction: incident date and PROA case number
use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{CaseMetadata, PageRecord};

lazy_static! {
    /// "Data do fato: 12/03/2024" or "Data do acidente 12/03/2024"
    static ref INCIDENT_DATE_PATTERN: Regex =
        Regex::new(r"(?i)data\s+do\s+(?:fato|acidente)\s*:?\s*(\d{2}/\d{2}/\d{4})").unwrap();

    /// "PROA nº 23/1203-0001234-5"
    static ref CASE_NUMBER_PATTERN: Regex =
        Regex::new(r"(?i)\bPROA\s*(?:n\s*[º°o.]*)?\s*(\d[\d./-]*)").unwrap();
}

/// Returns the incident date (dd/mm/yyyy) if the text states one
pub fn extract_incident_date(text: &str) -> Option<String> {
    INCIDENT_DATE_PATTERN
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Returns the PROA case number if the text cites one
pub fn extract_case_number(text: &str) -> Option<String> {
    CASE_NUMBER_PATTERN
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim_end_matches(['.', '/', '-']).to_string())
        .filter(|number| !number.is_empty())
}

/// Scan pages in order and collect the first date and case number seen
///
/// Runs on raw text: normalization strips the slashes these values need.
pub fn extract_case_metadata(pages: &[PageRecord]) -> CaseMetadata {
    let mut ordered: Vec<&PageRecord> = pages.iter().filter(|p| !p.is_blank).collect();
    ordered.sort_by_key(|p| p.page_number);

    let mut metadata = CaseMetadata::default();
    let mut reference_pages = BTreeSet::new();

    for page in ordered {
        if let Some(date) = extract_incident_date(&page.raw_text) {
            reference_pages.insert(page.page_number);
            metadata.incident_date.get_or_insert(date);
        }
        if let Some(number) = extract_case_number(&page.raw_text) {
            reference_pages.insert(page.page_number);
            metadata.case_number.get_or_insert(number);
        }
    }

    metadata.reference_pages = reference_pages.into_iter().collect();
    metadata
}
