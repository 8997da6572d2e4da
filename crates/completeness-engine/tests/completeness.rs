//! End-to-end completeness audits
//!
//! Run with: cargo test -p completeness-engine --test completeness

use completeness_engine::{
    analyze_completeness, format_ranges, CompletenessEngine, DocumentCatalog, ProcessType,
    SignatureSpec,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shared_types::PageRecord;

fn origin_certificate_catalog() -> DocumentCatalog {
    DocumentCatalog::new(vec![SignatureSpec::new("Atestado de Origem")
        .patterns(["ATESTADO DE ORIGEM"])
        .keywords(["atestado", "origem", "lesão", "serviço"])
        .threshold(0.7)
        .reference_page(17)])
    .unwrap()
}

#[test]
fn test_origin_certificate_found_on_two_pages() {
    let pages = vec![
        PageRecord::new(1, "..."),
        PageRecord::new(5, "ATESTADO DE ORIGEM Nº 123"),
        PageRecord::new(10, "ver atestado de origem anexo"),
    ];

    let report = analyze_completeness(&pages, &origin_certificate_catalog());

    assert_eq!(report.found("Atestado de Origem").unwrap().pages, vec![5, 10]);
    assert!(report.missing_documents.is_empty());
    assert_eq!(report.completeness_ratio(), 1.0);
}

#[test]
fn test_accident_file_audit() {
    let engine = CompletenessEngine::for_process(ProcessType::Accident).unwrap();
    let pages = vec![
        PageRecord::new(1, "PROCESSO PROA nº 23/1203-0001234-5"),
        PageRecord::blank(2),
        PageRecord::new(3, "PORTARIA Nº 045/SINDASV/2023\nInstauração de Sindicância Especial"),
        PageRecord::new(4, "Parte de acidente - Data do acidente: 14/02/2023"),
        PageRecord::new(5, "Parte de acidente (continuação)"),
        PageRecord::new(6, "Escala de serviço do dia 14/02"),
        PageRecord::new(17, "ATESTADO DE ORIGEM"),
        PageRecord::new(18, "Cópia da CNH do condutor"),
        PageRecord::new(19, "Cópia da CNH (verso)"),
        PageRecord::new(21, "CNH - categoria D"),
    ];

    let report = engine.check_pages(&pages);

    let found: Vec<(&str, String)> = report
        .found_documents
        .iter()
        .map(|r| (r.document_name.as_str(), format_ranges(&r.pages)))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Portaria da Sindicância Especial", "3".to_string()),
            ("Parte de acidente", "4-5".to_string()),
            ("Atestado de Origem", "17".to_string()),
            ("Escala de serviço", "6".to_string()),
            ("CNH", "18-19, 21".to_string()),
        ]
    );
    assert_eq!(report.missing_documents.len(), 11);
    assert_eq!(report.missing_documents.first().map(String::as_str), Some("Primeiro Boletim de atendimento médico"));
    assert_eq!(report.total_pages, 10);
    assert_eq!(report.analyzed_pages, 9);
    assert_eq!(
        report.found("Portaria da Sindicância Especial").unwrap().legal_reference,
        "NI 1.26 Art. 5º"
    );
    assert_eq!(report.metadata.case_number.as_deref(), Some("23/1203-0001234-5"));
    assert_eq!(report.metadata.incident_date.as_deref(), Some("14/02/2023"));
    assert_eq!(report.metadata.reference_pages, vec![1, 4]);
}

#[test]
fn test_catalog_loaded_from_json() {
    let json = r#"{
        "version": 1,
        "process": "accident",
        "documents": [
            { "name": "RHE", "text_patterns": ["\\bRHE\\b"] },
            { "name": "LTS", "legal_reference": "Lei 10.098 Art. 130", "keywords": ["licença", "saúde", "tratamento"] }
        ]
    }"#;
    let catalog = DocumentCatalog::from_json(json).unwrap();
    let pages = vec![PageRecord::new(2, "Licença para tratamento de saúde")];

    let report = analyze_completeness(&pages, &catalog);

    assert_eq!(report.missing_documents, vec!["RHE"]);
    let lts = report.found("LTS").unwrap();
    assert_eq!(lts.legal_reference, "Lei 10.098 Art. 130");
    assert_eq!(lts.pages, vec![2]);
}

fn page_text() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "ATESTADO DE ORIGEM",
        "Parte de acidente",
        "Oitiva das testemunhas",
        "Cópia da CNH",
        "despacho",
        "",
    ])
    .prop_map(String::from)
}

proptest! {
    /// Property: page order in the input never changes the report
    #[test]
    fn report_independent_of_page_order(
        texts in prop::collection::vec(page_text(), 1..30),
        rotation in 0usize..30
    ) {
        let catalog = ProcessType::Accident.catalog().unwrap();
        let pages: Vec<PageRecord> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| PageRecord::new(i as u32 + 1, text.clone()))
            .collect();

        let mut reordered = pages.clone();
        reordered.reverse();
        let len = reordered.len();
        reordered.rotate_left(rotation % len);

        let forward = analyze_completeness(&pages, &catalog);
        let shuffled = analyze_completeness(&reordered, &catalog);

        prop_assert_eq!(&forward.found_documents, &shuffled.found_documents);
        prop_assert_eq!(&forward.missing_documents, &shuffled.missing_documents);
        prop_assert_eq!(forward.analyzed_pages, shuffled.analyzed_pages);
    }

    /// Property: a page whose text contains a pattern always matches it
    #[test]
    fn pattern_text_always_matches(prefix in "[a-z ]{0,40}", suffix in "[a-z ]{0,40}") {
        let catalog = origin_certificate_catalog();
        let text = format!("{} ATESTADO DE ORIGEM {}", prefix, suffix);
        let report = analyze_completeness(&[PageRecord::new(1, text)], &catalog);
        prop_assert!(report.found("Atestado de Origem").is_some());
    }
}
