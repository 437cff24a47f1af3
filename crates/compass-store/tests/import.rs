use std::fs;
use std::path::PathBuf;

use compass_store::{ImportSource, import_csv, import_sources, load_records, write_records};

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

const OWASP_SHEET: &str = "cntrl_code,cntrl_number,addressed_control,recommendations,Description,mapping_id,action_items
OPSC-C1,1,Access Control,Enforce least privilege,Limit grants,ISO27001:2013:A.9.1.2;NIST-SSDF-PO-1-1;,Review grants
OPSC-C2,,Logging,Log security events,,,
";

const NIST_SHEET: &str = "cntrl_code,cntrl_number,addressed_control,recommendations,mapping_id,action_items
PO.1,1,Governance,Define requirements,OPSC-C1-1;A.5.1.1,
";

#[test]
fn imports_sheet_rows_as_records() {
    let dir = unique_temp_dir("import");
    let path = dir.join("owasp_controls.csv");
    fs::write(&path, OWASP_SHEET).unwrap();

    let records = import_csv(&path, "OWASP").expect("import sheet");

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.id, "OPSC-C1-1");
    assert_eq!(first.category, "Access Control");
    assert_eq!(first.title, "Enforce least privilege");
    assert_eq!(first.description, "Limit grants");
    assert_eq!(first.mappings["iso27001"], vec!["A.9.1.2".to_string()]);
    assert_eq!(first.mappings["nist"], vec!["PO.1.1".to_string()]);
    assert!(first.mappings["owasp"].is_empty());
    assert_eq!(first.recommendation.as_deref(), Some("Review grants"));

    let second = &records[1];
    assert_eq!(second.id, "OPSC-C2");
    assert!(second.description.is_empty());
    assert_eq!(second.recommendation.as_deref(), Some(""));
    assert!(second.recommendation_text().is_none());
    assert_eq!(second.mapping_count(), 0);
}

#[test]
fn missing_description_column_defaults_to_empty() {
    let dir = unique_temp_dir("import-nodesc");
    let path = dir.join("nist_ssdf.csv");
    fs::write(&path, NIST_SHEET).unwrap();

    let records = import_csv(&path, "NIST").expect("import sheet");

    assert_eq!(records[0].id, "PO.1-1");
    assert!(records[0].description.is_empty());
    assert_eq!(records[0].mappings["owasp"], vec!["OPSC-C1-1".to_string()]);
    assert_eq!(records[0].mappings["iso27001"], vec!["A.5.1.1".to_string()]);
}

#[test]
fn combined_import_round_trips_through_the_loader() {
    let dir = unique_temp_dir("import-combined");
    let owasp = dir.join("owasp_controls.csv");
    let nist = dir.join("nist_ssdf.csv");
    fs::write(&owasp, OWASP_SHEET).unwrap();
    fs::write(&nist, NIST_SHEET).unwrap();

    let records = import_sources(&[
        ImportSource::new(&owasp, "OWASP"),
        ImportSource::new(&nist, "NIST"),
    ])
    .expect("import sources");
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].standard, "NIST");

    let output = dir.join("out").join("app-data.json");
    write_records(&output, &records).expect("write records");
    assert_eq!(load_records(&output).record_count(), 3);
}
