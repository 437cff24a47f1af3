use std::fs;
use std::path::{Path, PathBuf};

use compass_store::{LoadOutcome, RecordStore, StoreError, load_records, load_records_from_reader};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "compliance-compass-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const DOCUMENT: &str = r#"[
  {"id": "OPSC-C1", "standard": "OWASP", "category": "Access Control", "title": "Define access", "description": "d1",
   "mappings": {"iso27001": ["A.9.1.1"], "nist": ["PO.1.1", "PO.1.2"]}},
  {"id": "A.12.4.1", "standard": "ISO27001", "category": "Logging", "title": "Event logging", "description": "d2",
   "mappings": {}},
  {"id": "PO.1.1", "standard": "NIST", "category": "Access Control", "title": "Requirements", "description": "d3"}
]"#;

#[test]
fn loads_document_into_store() {
    let dir = unique_temp_dir("load");
    let path = dir.join("app-data.json");
    fs::write(&path, DOCUMENT).unwrap();

    let outcome = load_records(&path);
    assert_eq!(outcome.record_count(), 3);

    let store = RecordStore::from_outcome(outcome);
    assert_eq!(store.size(), 3);
    assert_eq!(store.mapping_count(), 3);
    assert_eq!(
        store.categories(),
        vec!["Access Control".to_string(), "Logging".to_string()]
    );
    assert_eq!(
        store.standards(),
        vec![
            "ISO27001".to_string(),
            "NIST".to_string(),
            "OWASP".to_string()
        ]
    );
}

#[test]
fn missing_file_is_a_failed_outcome() {
    let dir = unique_temp_dir("missing");
    let outcome = load_records(&dir.join("nope.json"));
    assert!(outcome.is_failed());
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(StoreError::Io { .. })
    ));
    assert!(RecordStore::from_outcome(outcome).is_empty());
}

#[test]
fn malformed_document_is_a_failed_outcome() {
    let outcome = load_records_from_reader("[{\"id\": 1".as_bytes(), Path::new("inline"));
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(StoreError::Parse { .. })
    ));
}

#[test]
fn empty_array_is_an_empty_outcome() {
    let outcome = load_records_from_reader("[]".as_bytes(), Path::new("inline"));
    assert!(matches!(outcome, LoadOutcome::Empty));
    assert!(!outcome.is_failed());
}
