use thiserror::Error;

/// Problems found while building a document catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Document signature has an empty name")]
    EmptyName,

    #[error("Duplicate document name in catalog: {0}")]
    DuplicateName(String),

    #[error("Invalid pattern for '{name}': {pattern}")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Document '{0}' has neither text patterns nor keywords")]
    NoMatchCriteria(String),

    #[error("Keyword threshold for '{name}' must be in (0, 1], got {threshold}")]
    InvalidThreshold { name: String, threshold: f64 },

    #[error("Unsupported catalog version: {0}")]
    UnsupportedVersion(u32),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fatal failures of the page rasterizer
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Unreadable document: {0}")]
    Unreadable(String),

    #[error("Document is encrypted")]
    Encrypted,
}

/// Failures that abort a whole analysis run
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Could not process document: {0}")]
    Rasterization(#[from] RasterError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Page worker failed: {0}")]
    Worker(String),
}

/// Per-page OCR failures. These never abort an analysis.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("OCR timed out after {0}ms")]
    Timeout(u64),
}

/// A page range string that could not be parsed
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error("Invalid page range: start {start} > end {end}")]
    Reversed { start: u32, end: u32 },
}
