//! Tests for compass-model types.

use compass_model::{ComplianceRecord, FilterCriteria, ModelError, parse_records};

#[test]
fn parses_full_record_document() {
    let json = br#"[
        {
            "id": "OPSC-C1-1",
            "standard": "OWASP",
            "category": "Access Control",
            "title": "Enforce least privilege",
            "description": "Grant only the permissions a role needs.",
            "mappings": {"iso27001": ["A.9.1.2", "A.9.2.3"], "nist": []},
            "recommendation": "Review role grants quarterly."
        }
    ]"#;

    let records = parse_records(json).expect("parse records");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.standard, "OWASP");
    assert_eq!(record.mapping_count(), 2);
    assert_eq!(record.active_mappings().count(), 1);
    assert_eq!(
        record.recommendation.as_deref(),
        Some("Review role grants quarterly.")
    );
}

#[test]
fn null_mappings_object_is_empty() {
    let records = parse_records(br#"[{"id": "X", "mappings": null}]"#).unwrap();
    assert_eq!(records[0].mapping_count(), 0);
}

#[test]
fn malformed_document_is_an_error() {
    let err = parse_records(b"{not json").unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
}

#[test]
fn record_without_id_is_rejected() {
    assert!(parse_records(br#"[{"title": "orphan"}]"#).is_err());
}

#[test]
fn serialization_omits_absent_recommendation() {
    let record = ComplianceRecord::new("ID-1", "Title", "NIST", "Governance")
        .with_mapping("owasp", ["OPSC-C2"]);
    let value = serde_json::to_value(&record).expect("serialize record");
    assert!(value.get("recommendation").is_none());
    assert_eq!(value["mappings"]["owasp"][0], "OPSC-C2");
}

#[test]
fn builder_keeps_blank_recommendation_but_hides_it() {
    let record =
        ComplianceRecord::new("ID-1", "Title", "NIST", "Governance").with_recommendation("");
    assert_eq!(record.recommendation.as_deref(), Some(""));
    assert!(record.recommendation_text().is_none());
}

#[test]
fn document_round_trips_unchanged() {
    let document = r#"[
  {
    "id": "OPSC-C1-1",
    "standard": "OWASP",
    "category": "Access Control",
    "title": "Enforce least privilege",
    "description": "",
    "mappings": {
      "owasp": [
        "OPSC-C1"
      ],
      "iso27001": [
        "A.9.1.1"
      ],
      "nist": []
    },
    "recommendation": "",
    "tags": [
      "x"
    ]
  }
]"#;

    let records = parse_records(document.as_bytes()).expect("parse records");
    assert_eq!(records[0].extra["tags"], serde_json::json!(["x"]));

    let written = serde_json::to_string_pretty(&records).expect("serialize records");
    assert_eq!(written, document);
}

#[test]
fn default_criteria_is_empty() {
    let criteria = FilterCriteria::default();
    assert!(criteria.is_empty());
    assert!(!criteria.with_category("Logging").is_empty());
}
