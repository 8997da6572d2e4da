use lopdf::Document;
use sha2::{Digest, Sha256};
use shared_types::PageRecord;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum PdfTextError {
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF is encrypted")]
    Encrypted,
}

fn load(bytes: &[u8]) -> Result<Document, PdfTextError> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfTextError::Parse(e.to_string()))?;
    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(PdfTextError::Encrypted);
    }
    Ok(doc)
}

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<u32, PdfTextError> {
    Ok(load(bytes)?.get_pages().len() as u32)
}

/// Extract the text layer of every page
///
/// An unreadable file is fatal. A single page whose text cannot be decoded
/// is logged and comes out with empty text, still counted as a non-blank
/// page; the remaining pages are unaffected.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PageRecord>, PdfTextError> {
    let doc = load(bytes)?;
    let mut pages = Vec::new();

    for page_number in doc.get_pages().keys().copied() {
        match doc.extract_text(&[page_number]) {
            Ok(text) => {
                debug!("Page {}: {} chars of native text", page_number, text.len());
                pages.push(PageRecord::from_extracted_text(page_number, text));
            }
            Err(e) => {
                warn!("Text extraction failed on page {}: {}", page_number, e);
                pages.push(failed_page(page_number));
            }
        }
    }

    Ok(pages)
}

/// A page whose text layer could not be decoded: no text, but not blank
fn failed_page(page_number: u32) -> PageRecord {
    PageRecord::new(page_number, String::new())
}

/// Compute SHA-256 hash of document bytes
pub fn hash_document(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
