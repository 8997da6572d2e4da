//! Shared PDF handling utilities
//!
//! Native per-page text extraction and document fingerprints. Scanned
//! pages carry no text layer; they come out blank here and need OCR
//! upstream.

pub mod text;

pub use text::{extract_pages, hash_document, page_count, PdfTextError};
