//! Built-in catalogs of required documents
//!
//! One module per process type. Patterns run against normalized text:
//! uppercase, punctuation replaced by spaces. They tolerate missing
//! diacritics since OCR often drops them.

pub mod accident;
pub mod disciplinary;

use crate::catalog::SignatureSpec;
use crate::process::ProcessType;

/// Uncompiled signatures for a process type, in catalog order
pub fn signatures_for(process: ProcessType) -> Vec<SignatureSpec> {
    match process {
        ProcessType::Accident => accident::signatures(),
        ProcessType::Disciplinary => disciplinary::signatures(),
    }
}
