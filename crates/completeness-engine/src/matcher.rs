//! Page classification against the document catalog
//!
//! Each page is matched independently of every other page, and each
//! signature independently of every other signature. A page may therefore
//! contribute to several document types at once.

use std::collections::{BTreeMap, BTreeSet};

use shared_types::PageRecord;
use tracing::debug;

use crate::catalog::{DocumentCatalog, DocumentSignature};
use crate::normalize::normalize;

/// Why a signature matched a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// Index of the first text pattern that matched
    Pattern(usize),
    /// Keyword fallback with the observed hit count
    Keywords { hits: usize, total: usize },
}

/// Test one signature against already-normalized page text
///
/// Patterns are tried in listed order and the first hit wins. Keywords are
/// only consulted when no pattern matched, and must exceed the threshold
/// strictly: exactly at the threshold is not a match.
pub fn match_signature(normalized: &str, signature: &DocumentSignature) -> Option<MatchKind> {
    if let Some(index) = signature
        .text_patterns()
        .iter()
        .position(|pattern| pattern.is_match(normalized))
    {
        return Some(MatchKind::Pattern(index));
    }

    let total = signature.keywords().len();
    if total == 0 {
        return None;
    }

    let hits = signature
        .keywords()
        .iter()
        .filter(|keyword| normalized.contains(keyword.as_str()))
        .count();

    if hits as f64 / total as f64 > signature.keyword_threshold() {
        Some(MatchKind::Keywords { hits, total })
    } else {
        None
    }
}

/// Names of every catalog document found on this page
pub fn match_page(page: &PageRecord, catalog: &DocumentCatalog) -> BTreeSet<String> {
    let mut matched = BTreeSet::new();

    if page.is_blank {
        return matched;
    }

    let normalized = normalize(&page.raw_text);
    if normalized.is_empty() {
        return matched;
    }

    for signature in catalog {
        if let Some(kind) = match_signature(&normalized, signature) {
            debug!(
                "Page {} matched '{}' ({:?})",
                page.page_number,
                signature.name(),
                kind
            );
            matched.insert(signature.name().to_string());
        }
    }

    matched
}

/// Fold per-page partial results into per-document page lists
///
/// Input order does not matter; every list comes out sorted ascending
/// without duplicates.
pub fn merge_page_matches<I>(partials: I) -> BTreeMap<String, Vec<u32>>
where
    I: IntoIterator<Item = (u32, BTreeSet<String>)>,
{
    let mut by_document: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();

    for (page_number, names) in partials {
        for name in names {
            by_document.entry(name).or_default().insert(page_number);
        }
    }

    by_document
        .into_iter()
        .map(|(name, pages)| (name, pages.into_iter().collect()))
        .collect()
}

/// Match every page and aggregate pages per document
pub fn match_all(pages: &[PageRecord], catalog: &DocumentCatalog) -> BTreeMap<String, Vec<u32>> {
    merge_page_matches(
        pages
            .iter()
            .map(|page| (page.page_number, match_page(page, catalog))),
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn names() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set(prop::sample::select(vec!["CNH", "LTS", "RHE", "Escala"]), 0..4)
            .prop_map(|set| set.into_iter().map(String::from).collect())
    }

    proptest! {
        /// Property: merging in any order yields the same sorted lists
        #[test]
        fn merge_is_order_independent(
            partials in prop::collection::vec((1u32..200, names()), 0..40),
            seed in any::<u64>()
        ) {
            let mut shuffled = partials.clone();
            // Deterministic Fisher-Yates driven by the seed
            let mut state = seed;
            for i in (1..shuffled.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (state >> 33) as usize % (i + 1);
                shuffled.swap(i, j);
            }

            let forward = merge_page_matches(partials);
            let reordered = merge_page_matches(shuffled);
            prop_assert_eq!(&forward, &reordered);

            for pages in forward.values() {
                prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
