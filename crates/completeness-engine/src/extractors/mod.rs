pub mod metadata;

pub use metadata::{extract_case_metadata, extract_case_number, extract_incident_date};
