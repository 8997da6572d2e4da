pub mod types;

pub use types::{format_ranges, CaseMetadata, CompletenessReport, MatchResult, PageRecord};
