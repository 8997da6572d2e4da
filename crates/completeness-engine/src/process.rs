//! Administrative process types
//!
//! Each process type has its own list of legally required documents.
//! The built-in lists live in [`crate::catalogs`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::DocumentCatalog;
use crate::catalogs;
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessType {
    /// Special inquiry into an on-duty accident (NI 1.26)
    Accident,
    /// Disciplinary proceeding (RDBM)
    Disciplinary,
}

impl ProcessType {
    pub const ALL: [ProcessType; 2] = [ProcessType::Accident, ProcessType::Disciplinary];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessType::Accident => "accident",
            ProcessType::Disciplinary => "disciplinary",
        }
    }

    /// Display name as used on the case file cover
    pub fn name(&self) -> &'static str {
        match self {
            ProcessType::Accident => "Sindicância Especial de Acidente",
            ProcessType::Disciplinary => "Processo Disciplinar",
        }
    }

    /// Accepts the English identifiers and the Portuguese ones
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "accident" | "acidente" => Some(ProcessType::Accident),
            "disciplinary" | "disciplinar" => Some(ProcessType::Disciplinary),
            _ => None,
        }
    }

    /// Build the validated catalog of required documents
    pub fn catalog(&self) -> Result<DocumentCatalog, CatalogError> {
        DocumentCatalog::new(catalogs::signatures_for(*self))
    }

    /// Legal citations backing the required documents, in catalog order
    pub fn covered_references(&self) -> Vec<String> {
        let mut references: Vec<String> = Vec::new();
        for spec in catalogs::signatures_for(*self) {
            if !spec.legal_reference.is_empty() && !references.contains(&spec.legal_reference) {
                references.push(spec.legal_reference);
            }
        }
        references
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
