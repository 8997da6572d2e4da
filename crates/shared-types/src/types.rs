use serde::{Deserialize, Serialize};

/// A single page of a case file, after text extraction or OCR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_number: u32, // 1-based
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub is_blank: bool,
}

impl PageRecord {
    pub fn new(page_number: u32, raw_text: impl Into<String>) -> Self {
        Self {
            page_number,
            raw_text: raw_text.into(),
            is_blank: false,
        }
    }

    /// A page judged void of content. Its text is always empty.
    pub fn blank(page_number: u32) -> Self {
        Self {
            page_number,
            raw_text: String::new(),
            is_blank: true,
        }
    }

    /// Build a record from natively extracted text: empty text means blank
    pub fn from_extracted_text(page_number: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::blank(page_number)
        } else {
            Self::new(page_number, text)
        }
    }

    /// Whether this page was actually scanned for matches
    pub fn is_analyzed(&self) -> bool {
        !self.is_blank && !self.raw_text.trim().is_empty()
    }
}

/// A required document located in the case file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub document_name: String,
    pub legal_reference: String, // e.g., "NI 1.26 Art. 5º"
    pub pages: Vec<u32>,         // Sorted ascending, no duplicates
}

impl MatchResult {
    /// Pages in run notation, e.g. `4-5, 9`
    pub fn page_ranges(&self) -> String {
        format_ranges(&self.pages)
    }
}

/// Identifying data pulled from the case file text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub incident_date: Option<String>,
    pub case_number: Option<String>,
    pub reference_pages: Vec<u32>,
}

impl CaseMetadata {
    pub fn is_empty(&self) -> bool {
        self.incident_date.is_none() && self.case_number.is_none()
    }
}

/// Found/missing classification of every catalog entry for one case file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// In catalog order
    pub found_documents: Vec<MatchResult>,
    /// In catalog order
    pub missing_documents: Vec<String>,
    pub total_pages: u32,
    pub analyzed_pages: u32,
    #[serde(default)]
    pub metadata: CaseMetadata,
    pub checked_at: u64,
}

impl CompletenessReport {
    /// Look up a found document by name
    pub fn found(&self, name: &str) -> Option<&MatchResult> {
        self.found_documents
            .iter()
            .find(|result| result.document_name == name)
    }

    pub fn is_missing(&self, name: &str) -> bool {
        self.missing_documents.iter().any(|missing| missing == name)
    }

    pub fn catalog_size(&self) -> usize {
        self.found_documents.len() + self.missing_documents.len()
    }

    /// Fraction of catalog entries found. An empty catalog counts as complete.
    pub fn completeness_ratio(&self) -> f64 {
        let total = self.catalog_size();
        if total == 0 {
            return 1.0;
        }
        self.found_documents.len() as f64 / total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.missing_documents.is_empty()
    }
}

/// Compress a sorted page list into run notation, e.g. `1-3, 5-6, 8`
pub fn format_ranges(pages: &[u32]) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut iter = pages.iter().copied();

    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut start = first;
    let mut end = first;
    for page in iter {
        if end.checked_add(1) == Some(page) {
            end = page;
        } else {
            runs.push(format_run(start, end));
            start = page;
            end = page;
        }
    }
    runs.push(format_run(start, end));

    runs.join(", ")
}

fn format_run(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}
