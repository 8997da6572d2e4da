//! Document signatures and the validated catalog that holds them
//!
//! A catalog is built once, validated up front, and then only read. Every
//! signature is compiled at construction so analysis never meets an invalid
//! regex or a malformed entry.

use std::collections::{BTreeSet, HashSet};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::normalize::normalize;

/// Keyword threshold used when a signature does not set one
pub const DEFAULT_KEYWORD_THRESHOLD: f64 = 0.7;

/// Catalog file format understood by [`DocumentCatalog::from_json`]
pub const CATALOG_FORMAT_VERSION: u32 = 1;

/// Uncompiled signature, as written in a catalog file or built in code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureSpec {
    pub name: String,
    #[serde(default)]
    pub legal_reference: String,
    #[serde(default)]
    pub text_patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_threshold")]
    pub keyword_threshold: f64,
    #[serde(default)]
    pub reference_page: Option<u32>,
}

fn default_threshold() -> f64 {
    DEFAULT_KEYWORD_THRESHOLD
}

impl SignatureSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legal_reference: String::new(),
            text_patterns: Vec::new(),
            keywords: Vec::new(),
            keyword_threshold: DEFAULT_KEYWORD_THRESHOLD,
            reference_page: None,
        }
    }

    pub fn legal_reference(mut self, reference: impl Into<String>) -> Self {
        self.legal_reference = reference.into();
        self
    }

    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.keyword_threshold = threshold;
        self
    }

    pub fn reference_page(mut self, page: u32) -> Self {
        self.reference_page = Some(page);
        self
    }
}

/// How to recognize one required document type
#[derive(Debug, Clone)]
pub struct DocumentSignature {
    name: String,
    legal_reference: String,
    text_patterns: Vec<Regex>,
    keywords: BTreeSet<String>,
    keyword_threshold: f64,
    reference_page: Option<u32>,
}

impl DocumentSignature {
    /// Validate and compile a signature
    ///
    /// Patterns are compiled case-insensitive. Keywords are normalized the
    /// same way page text is, so they compare against normalized pages.
    pub fn compile(spec: SignatureSpec) -> Result<Self, CatalogError> {
        let name = spec.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let threshold = spec.keyword_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(CatalogError::InvalidThreshold { name, threshold });
        }

        let keywords: BTreeSet<String> = spec
            .keywords
            .iter()
            .map(|keyword| normalize(keyword))
            .filter(|keyword| !keyword.is_empty())
            .collect();

        if spec.text_patterns.is_empty() && keywords.is_empty() {
            return Err(CatalogError::NoMatchCriteria(name));
        }

        let mut text_patterns = Vec::with_capacity(spec.text_patterns.len());
        for pattern in spec.text_patterns {
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(regex) => text_patterns.push(regex),
                Err(source) => {
                    return Err(CatalogError::InvalidPattern {
                        name,
                        pattern,
                        source,
                    })
                }
            }
        }

        Ok(Self {
            name,
            legal_reference: spec.legal_reference.trim().to_string(),
            text_patterns,
            keywords,
            keyword_threshold: threshold,
            reference_page: spec.reference_page,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn legal_reference(&self) -> &str {
        &self.legal_reference
    }

    /// Compiled patterns, in evaluation order
    pub fn text_patterns(&self) -> &[Regex] {
        &self.text_patterns
    }

    /// Normalized keywords
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn keyword_threshold(&self) -> f64 {
        self.keyword_threshold
    }

    /// Page where this document usually sits in a well-formed file.
    /// Informational only.
    pub fn reference_page(&self) -> Option<u32> {
        self.reference_page
    }

    /// Convert back to the uncompiled form
    pub fn to_spec(&self) -> SignatureSpec {
        SignatureSpec {
            name: self.name.clone(),
            legal_reference: self.legal_reference.clone(),
            text_patterns: self
                .text_patterns
                .iter()
                .map(|regex| regex.as_str().to_string())
                .collect(),
            keywords: self.keywords.iter().cloned().collect(),
            keyword_threshold: self.keyword_threshold,
            reference_page: self.reference_page,
        }
    }
}

/// Serialized catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub version: u32,
    #[serde(default)]
    pub process: Option<String>,
    pub documents: Vec<SignatureSpec>,
}

/// Ordered, immutable registry of required documents
///
/// Order is significant: it fixes the order of found and missing entries
/// in every report built from this catalog.
#[derive(Debug, Clone, Default)]
pub struct DocumentCatalog {
    signatures: Vec<DocumentSignature>,
}

impl DocumentCatalog {
    /// Build a catalog, rejecting the first malformed or duplicate entry
    pub fn new<I>(specs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = SignatureSpec>,
    {
        let mut seen = HashSet::new();
        let mut signatures = Vec::new();

        for spec in specs {
            let signature = DocumentSignature::compile(spec)?;
            if !seen.insert(signature.name().to_string()) {
                return Err(CatalogError::DuplicateName(signature.name().to_string()));
            }
            signatures.push(signature);
        }

        Ok(Self { signatures })
    }

    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.version != CATALOG_FORMAT_VERSION {
            return Err(CatalogError::UnsupportedVersion(config.version));
        }
        Self::new(config.documents)
    }

    /// Load a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    pub fn to_config(&self, process: Option<String>) -> CatalogConfig {
        CatalogConfig {
            version: CATALOG_FORMAT_VERSION,
            process,
            documents: self.signatures.iter().map(|s| s.to_spec()).collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentSignature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DocumentSignature> {
        self.signatures.iter().find(|s| s.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(|s| s.name())
    }
}

impl<'a> IntoIterator for &'a DocumentCatalog {
    type Item = &'a DocumentSignature;
    type IntoIter = std::slice::Iter<'a, DocumentSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.iter()
    }
}
