//! Text canonicalization shared by matching and metadata extraction
//!
//! OCR output is noisy: stray punctuation, inconsistent casing and runs of
//! whitespace. Every comparison in the engine runs on normalized text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything outside word characters, whitespace, Portuguese accented
    /// letters, ordinal/degree marks and hyphens
    static ref DISALLOWED_CHARS: Regex =
        Regex::new(r"[^\w\sáéíóúâêîôûãõçÁÉÍÓÚÂÊÎÔÛÃÕÇº°-]").unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonicalize raw page text for matching
///
/// Disallowed characters are replaced by a space so that `A/B` becomes
/// `A B` rather than `AB`, then whitespace is collapsed, trimmed and the
/// result uppercased.
pub fn normalize(text: &str) -> String {
    let filtered = DISALLOWED_CHARS.replace_all(text, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&filtered, " ");
    collapsed.trim().to_uppercase()
}
