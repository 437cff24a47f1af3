//! Conversion of per-standard CSV control sheets into the record document.
//!
//! Each sheet carries one standard. The `mapping_id` column is a `;`
//! separated list of references in mixed notations (`OPSC-C3`,
//! `ISO27001:2013:A.14.1.1`, `NIST-SSDF-PO-1-1`, `PO.1.1`, ...) which is
//! normalized into the `owasp`, `iso27001` and `nist` mapping keys.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use compass_model::{ComplianceRecord, Mappings};

use crate::error::StoreError;

pub const OWASP_KEY: &str = "owasp";
pub const ISO27001_KEY: &str = "iso27001";
pub const NIST_KEY: &str = "nist";

const NIST_SSDF_PREFIX: &str = "NIST-SSDF-";
const NIST_PRACTICE_PREFIXES: [&str; 4] = ["PO.", "PS.", "PW.", "RV."];

/// A control sheet and the standard its rows belong to.
#[derive(Debug, Clone)]
pub struct ImportSource {
    pub path: PathBuf,
    pub standard: String,
}

impl ImportSource {
    pub fn new(path: impl Into<PathBuf>, standard: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            standard: standard.into(),
        }
    }
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}') == name)
}

fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Read one control sheet.
pub fn import_csv(path: &Path, standard: &str) -> Result<Vec<ComplianceRecord>, StoreError> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| StoreError::csv(path, &e))?
        .clone();

    let code_idx = header_index(&headers, "cntrl_code");
    let number_idx = header_index(&headers, "cntrl_number");
    let category_idx = header_index(&headers, "addressed_control");
    let title_idx = header_index(&headers, "recommendations");
    let description_idx = header_index(&headers, "Description");
    let mapping_idx = header_index(&headers, "mapping_id");
    let action_idx = header_index(&headers, "action_items");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StoreError::csv(path, &e))?;
        let code = get_string(&row, code_idx);
        let number = get_string(&row, number_idx);
        let id = if number.is_empty() {
            code
        } else {
            format!("{code}-{number}")
        };
        let record = ComplianceRecord {
            id,
            standard: standard.to_string(),
            category: get_string(&row, category_idx),
            title: get_string(&row, title_idx),
            description: get_string(&row, description_idx),
            mappings: parse_mapping_ids(&get_string(&row, mapping_idx)),
            recommendation: Some(get_string(&row, action_idx)),
            extra: Default::default(),
        };
        records.push(record);
    }
    debug!(path = %path.display(), standard, record_count = records.len(), "imported sheet");
    Ok(records)
}

/// Read several sheets and concatenate their records in order.
pub fn import_sources(sources: &[ImportSource]) -> Result<Vec<ComplianceRecord>, StoreError> {
    let mut records = Vec::new();
    for source in sources {
        records.extend(import_csv(&source.path, &source.standard)?);
    }
    info!(
        sheet_count = sources.len(),
        record_count = records.len(),
        "import complete"
    );
    Ok(records)
}

/// Write records as a pretty-printed record document.
pub fn write_records(path: &Path, records: &[ComplianceRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Split a `mapping_id` cell into the three mapping keys.
///
/// The result always carries `owasp`, `iso27001` and `nist`, possibly empty.
pub fn parse_mapping_ids(raw: &str) -> Mappings {
    let mut mappings = Mappings::new();
    for key in [OWASP_KEY, ISO27001_KEY, NIST_KEY] {
        mappings.insert(key.to_string(), Vec::new());
    }
    for reference in raw.split(';').map(str::trim).filter(|m| !m.is_empty()) {
        if let Some((key, normalized)) = classify_reference(reference) {
            mappings.entry(key.to_string()).or_default().push(normalized);
        }
    }
    mappings
}

/// Route one reference to its mapping key, normalizing its notation.
pub fn classify_reference(reference: &str) -> Option<(&'static str, String)> {
    if reference.starts_with("OPSC-") {
        return Some((OWASP_KEY, reference.to_string()));
    }
    if reference.contains("ISO27001") || reference.starts_with("A.") {
        return Some((ISO27001_KEY, last_segment(reference).to_string()));
    }
    if reference.contains("NIST")
        || NIST_PRACTICE_PREFIXES
            .iter()
            .any(|prefix| reference.starts_with(prefix))
    {
        let normalized = if reference.contains(':') {
            last_segment(reference).to_string()
        } else if let Some(rest) = reference.strip_prefix(NIST_SSDF_PREFIX) {
            rest.replace('-', ".")
        } else {
            reference.to_string()
        };
        return Some((NIST_KEY, normalized));
    }
    None
}

fn last_segment(reference: &str) -> &str {
    reference.rsplit(':').next().unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reference_notations() {
        assert_eq!(
            classify_reference("OPSC-C1-1"),
            Some((OWASP_KEY, "OPSC-C1-1".to_string()))
        );
        assert_eq!(
            classify_reference("ISO27001:2013:A.14.1.1"),
            Some((ISO27001_KEY, "A.14.1.1".to_string()))
        );
        assert_eq!(
            classify_reference("A.9.4.1"),
            Some((ISO27001_KEY, "A.9.4.1".to_string()))
        );
        assert_eq!(
            classify_reference("NIST-SSDF-PO-1-1"),
            Some((NIST_KEY, "PO.1.1".to_string()))
        );
        assert_eq!(
            classify_reference("NIST:NIST-SSDF:PO.2"),
            Some((NIST_KEY, "PO.2".to_string()))
        );
        assert_eq!(
            classify_reference("PW.4.1"),
            Some((NIST_KEY, "PW.4.1".to_string()))
        );
        assert_eq!(classify_reference("CIS-5"), None);
    }

    #[test]
    fn mapping_ids_always_carry_three_keys() {
        let mappings = parse_mapping_ids("");
        assert_eq!(mappings.len(), 3);
        assert!(mappings.values().all(Vec::is_empty));
    }

    #[test]
    fn mapping_ids_skip_blank_segments() {
        let mappings = parse_mapping_ids("ISO27001:2013:A.14.1.1;NIST-SSDF-PO-1-1;OPSC-C3; ;");
        assert_eq!(mappings[OWASP_KEY], vec!["OPSC-C3".to_string()]);
        assert_eq!(mappings[ISO27001_KEY], vec!["A.14.1.1".to_string()]);
        assert_eq!(mappings[NIST_KEY], vec!["PO.1.1".to_string()]);
    }
}
